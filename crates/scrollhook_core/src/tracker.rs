//! Scroll transition tracker
//!
//! Keeps pending registrations keyed by trigger position and fires them as
//! the viewport bottom passes each position.
//!
//! # Invariants
//!
//! - `positions` holds exactly the keys of `events`, without duplicates
//! - `min` is `None` iff `positions` is empty, else its minimum
//! - a fired position is removed from both and never comes back

use std::time::Duration;

use rustc_hash::FxHashMap;
use scrollhook_platform::Element;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::config::DEFAULT_THROTTLE_MS;
use crate::options::{RegisterOptions, States};

/// One element, its class transition and its trigger position
#[derive(Clone, Debug)]
pub struct Registration<E> {
    element: E,
    initial_states: States,
    final_states: States,
    position: i64,
}

impl<E: Element> Registration<E> {
    /// The element this registration acts on
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Classes removed when fired
    pub fn initial_states(&self) -> &States {
        &self.initial_states
    }

    /// Classes added when fired
    pub fn final_states(&self) -> &States {
        &self.final_states
    }

    /// Trigger position
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Remove the initial classes, then add the final ones
    pub fn apply(&self) {
        for class in self.initial_states.iter() {
            self.element.remove_class(class);
        }
        for class in self.final_states.iter() {
            self.element.add_class(class);
        }
    }
}

/// Registrations sharing a position, in registration order
type PositionEvents<E> = SmallVec<[Registration<E>; 1]>;

/// The scroll transition tracker
///
/// Pure state: it never touches the window. [`crate::Page`] feeds it the
/// viewport and wires it to scroll listeners.
#[derive(Debug)]
pub struct ScrollHook<E> {
    events: FxHashMap<i64, PositionEvents<E>>,
    positions: Vec<i64>,
    min: Option<i64>,
    throttle_ms: u64,
}

impl<E: Element> Default for ScrollHook<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> ScrollHook<E> {
    /// Create an empty tracker with the default throttle interval
    pub fn new() -> Self {
        Self {
            events: FxHashMap::default(),
            positions: Vec::new(),
            min: None,
            throttle_ms: DEFAULT_THROTTLE_MS,
        }
    }

    /// Set the interval for throttles created after this call
    pub fn set_throttle_time(&mut self, ms: u64) -> &mut Self {
        self.throttle_ms = ms;
        self
    }

    /// Throttle interval for new throttles
    pub fn throttle_time(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Register an element to transition when scrolled into view
    ///
    /// ```rust
    /// use scrollhook_core::{RegisterOptions, ScrollHook};
    /// use scrollhook_headless::HeadlessElement;
    ///
    /// let hero = HeadlessElement::new("hero", 1008);
    /// let footer = HeadlessElement::new("footer", 2400);
    ///
    /// let mut hook = ScrollHook::new();
    /// hook.register(hero, RegisterOptions::new().final_states("visible"))
    ///     .register(footer, RegisterOptions::new().position(2000));
    ///
    /// assert_eq!(hook.min(), Some(1008));
    /// ```
    pub fn register(&mut self, element: E, options: RegisterOptions) -> &mut Self {
        let RegisterOptions {
            position,
            initial_states,
            final_states,
        } = options;
        let position = position.unwrap_or_else(|| element.offset_top());

        let slot = self.events.entry(position).or_default();
        if slot.is_empty() {
            self.positions.push(position);
        }
        slot.push(Registration {
            element,
            initial_states,
            final_states,
            position,
        });

        self.min = Some(self.min.map_or(position, |min| min.min(position)));
        debug!(position, pending = self.positions.len(), "registered scroll hook");
        self
    }

    /// Recompute the nearest pending position
    pub fn determine_min(&mut self) -> &mut Self {
        self.min = self.positions.iter().copied().min();
        self
    }

    /// Nearest pending position, `None` once everything has fired
    pub fn min(&self) -> Option<i64> {
        self.min
    }

    /// Pending positions in registration order
    pub fn positions(&self) -> &[i64] {
        &self.positions
    }

    /// Registrations waiting at `position`
    pub fn registrations_at(&self, position: i64) -> &[Registration<E>] {
        self.events
            .get(&position)
            .map(|events| events.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of registrations still pending
    pub fn pending_count(&self) -> usize {
        self.events.values().map(SmallVec::len).sum()
    }

    /// Whether every registration has fired
    pub fn is_done(&self) -> bool {
        self.positions.is_empty()
    }

    /// Apply one registration's class transition
    pub fn transition_states(registration: &Registration<E>) {
        registration.apply();
    }

    /// Fire every position at or above the viewport bottom
    ///
    /// Each pending position is visited once. Returns how many registrations
    /// fired; already fired positions are gone, so repeated calls are no-ops.
    pub fn transition_elements_at(&mut self, view_bottom: i64) -> usize {
        if self.positions.is_empty() {
            return 0;
        }

        let events = &mut self.events;
        let mut fired = 0;

        self.positions.retain(|&position| {
            if position > view_bottom {
                return true;
            }
            if let Some(registrations) = events.remove(&position) {
                for registration in &registrations {
                    Self::transition_states(registration);
                }
                fired += registrations.len();
                debug!(position, count = registrations.len(), "scroll hooks fired");
            }
            false
        });

        self.determine_min();
        trace!(view_bottom, fired, min = ?self.min, "transition pass");
        fired
    }
}
