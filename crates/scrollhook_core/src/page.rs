//! Page context
//!
//! Owns a tracker together with the host window and the listeners that drive
//! it. This is the entry point for hosts:
//!
//! ```text
//! raw scroll ──► Throttle ──► synthetic scroll ──► fire_hooks ──► ScrollHook
//!                                                      │
//! DOMContentLoaded (once) ─────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use scrollhook_core::{Page, RegisterOptions};
//! use scrollhook_headless::{HeadlessDocument, HeadlessWindow};
//!
//! let window = Rc::new(HeadlessWindow::new(600));
//! let mut doc = HeadlessDocument::new();
//! doc.spacer(1000);
//! let card = doc.append("card", 400).unwrap();
//!
//! let mut page = Page::new(Rc::clone(&window));
//! page.register(card.clone(), RegisterOptions::new().final_states("visible"))
//!     .start();
//!
//! window.scroll_view_bottom_to(1008);
//! assert_eq!(card.class_name(), "visible");
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use scrollhook_platform::{EventTarget, ListenerId, Window};
use tracing::{debug, warn};

use crate::config::{ConfigError, HookConfig};
use crate::options::RegisterOptions;
use crate::throttle::Throttle;
use crate::tracker::ScrollHook;

type SharedHook<W> = Rc<RefCell<ScrollHook<<W as Window>::Element>>>;

/// Listener ids installed by `start`, cleared as listeners go away
#[derive(Default)]
struct ListenerSlots {
    raw: Cell<Option<ListenerId>>,
    synthetic: Cell<Option<ListenerId>>,
    ready: Cell<Option<ListenerId>>,
}

impl ListenerSlots {
    fn remove_scroll<W: Window>(&self, window: &W) {
        for id in [self.synthetic.take(), self.raw.take()].into_iter().flatten() {
            window.remove_listener(id);
        }
    }

    fn remove_all<W: Window>(&self, window: &W) {
        self.remove_scroll(window);
        if let Some(id) = self.ready.take() {
            window.remove_listener(id);
        }
    }

    fn is_listening(&self) -> bool {
        let raw = self.raw.get();
        let synthetic = self.synthetic.get();
        let ready = self.ready.get();
        raw.is_some() || synthetic.is_some() || ready.is_some()
    }
}

struct Session<W> {
    throttle: Throttle<W>,
    slots: Rc<ListenerSlots>,
}

/// A tracker bound to a host window
///
/// Dropping the page removes its listeners and cancels any pending
/// throttled dispatch.
pub struct Page<W: Window + 'static> {
    window: Rc<W>,
    hook: SharedHook<W>,
    config: HookConfig,
    session: Option<Session<W>>,
}

impl<W: Window + 'static> Page<W> {
    /// Create a page with the default configuration
    pub fn new(window: Rc<W>) -> Self {
        Self::from_valid_config(window, HookConfig::default())
    }

    /// Create a page with a custom configuration
    ///
    /// Fails if the configuration does not pass [`HookConfig::validate`].
    pub fn with_config(window: Rc<W>, config: HookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(window, config))
    }

    fn from_valid_config(window: Rc<W>, config: HookConfig) -> Self {
        let mut hook = ScrollHook::new();
        hook.set_throttle_time(config.throttle_ms);

        Self {
            window,
            hook: Rc::new(RefCell::new(hook)),
            config,
            session: None,
        }
    }

    /// The host window
    pub fn window(&self) -> &Rc<W> {
        &self.window
    }

    /// The active configuration
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Borrow the tracker
    ///
    /// Do not hold the borrow across window dispatches; listeners need it.
    pub fn tracker(&self) -> Ref<'_, ScrollHook<W::Element>> {
        self.hook.borrow()
    }

    /// Register an element, see [`ScrollHook::register`]
    pub fn register(&mut self, element: W::Element, options: RegisterOptions) -> &mut Self {
        self.hook.borrow_mut().register(element, options);
        self
    }

    /// Set the interval for throttles created after this call
    pub fn set_throttle_time(&mut self, ms: u64) -> &mut Self {
        self.hook.borrow_mut().set_throttle_time(ms);
        self.config.throttle_ms = ms;
        self
    }

    /// Recompute the nearest pending position
    pub fn determine_min(&mut self) -> &mut Self {
        self.hook.borrow_mut().determine_min();
        self
    }

    /// Nearest pending position
    pub fn min(&self) -> Option<i64> {
        self.hook.borrow().min()
    }

    /// Pending positions in registration order
    pub fn pending_positions(&self) -> Vec<i64> {
        self.hook.borrow().positions().to_vec()
    }

    /// Fire everything at or above the current viewport bottom
    pub fn transition_elements(&self) -> usize {
        transition_in_view(&self.hook, self.window.as_ref())
    }

    /// Create a throttle dispatching `event` on this page's window
    pub fn create_throttle(&self, event: &str) -> Throttle<W> {
        let delay = self.hook.borrow().throttle_time();
        Throttle::new(&self.window, event, delay)
    }

    /// Install the scroll and document-ready listeners
    ///
    /// Calling `start` while listeners from an earlier `start` are still
    /// installed logs a warning and does nothing. Once they have all removed
    /// themselves the spent session is discarded and `start` installs fresh
    /// listeners, so hooks registered after completion can still fire.
    pub fn start(&mut self) -> &mut Self {
        if let Some(session) = &self.session {
            if session.slots.is_listening() {
                warn!("scroll hooks already started; ignoring duplicate start");
                return self;
            }
            debug!("previous scroll hook session is spent; restarting");
            self.stop();
        }

        self.hook.borrow_mut().determine_min();

        let throttle = self.create_throttle(&self.config.synthetic_event);
        let slots = Rc::new(ListenerSlots::default());
        let window = self.window.as_ref();

        let raw = window.add_listener(
            EventTarget::Window,
            &self.config.scroll_event,
            throttle.clone().into_listener(),
        );
        slots.raw.set(Some(raw));

        let synthetic = window.add_listener(
            EventTarget::Window,
            &self.config.synthetic_event,
            Rc::new(fire_hooks(
                Rc::downgrade(&self.window),
                Rc::downgrade(&self.hook),
                Rc::downgrade(&slots),
            )),
        );
        slots.synthetic.set(Some(synthetic));

        let ready = window.add_listener(
            EventTarget::Document,
            &self.config.ready_event,
            Rc::new(fire_hooks_in_view(
                Rc::downgrade(&self.window),
                Rc::downgrade(&self.hook),
                Rc::downgrade(&slots),
            )),
        );
        slots.ready.set(Some(ready));

        debug!(
            min = ?self.hook.borrow().min(),
            throttle_ms = throttle.delay().as_millis() as u64,
            "scroll hooks started"
        );
        self.session = Some(Session { throttle, slots });
        self
    }

    /// Remove every listener `start` installed and cancel a pending dispatch
    ///
    /// Returns false if the page was not started. Pending registrations are
    /// kept, so the page can be started again.
    pub fn stop(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };

        session.throttle.cancel();
        session.slots.remove_all(self.window.as_ref());
        debug!("scroll hooks stopped");
        true
    }

    /// Whether `start` has been called (and not undone by `stop`)
    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Whether any listener installed by `start` is still registered
    pub fn is_listening(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.slots.is_listening())
    }
}

impl<W: Window + 'static> Drop for Page<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<W: Window + 'static> fmt::Debug for Page<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hook = self.hook.borrow();
        f.debug_struct("Page")
            .field("config", &self.config)
            .field("positions", &hook.positions())
            .field("min", &hook.min())
            .field("started", &self.session.is_some())
            .finish()
    }
}

fn transition_in_view<W: Window>(hook: &SharedHook<W>, window: &W) -> usize {
    let view_bottom = window.viewport().bottom();
    hook.borrow_mut().transition_elements_at(view_bottom)
}

/// Synthetic scroll handler
fn fire_hooks<W: Window + 'static>(
    window: Weak<W>,
    hook: Weak<RefCell<ScrollHook<W::Element>>>,
    slots: Weak<ListenerSlots>,
) -> impl Fn() + 'static {
    move || {
        let (Some(window), Some(hook), Some(slots)) =
            (window.upgrade(), hook.upgrade(), slots.upgrade())
        else {
            return;
        };

        let min = hook.borrow().min();
        let viewport = window.viewport();
        match min {
            None => {
                debug!("all scroll hooks fired; removing scroll listeners");
                slots.remove_scroll(window.as_ref());
            }
            // Nothing in view yet
            Some(min) if !viewport.reaches(min) => {}
            Some(_) => {
                transition_in_view(&hook, window.as_ref());
            }
        }
    }
}

/// One-shot document-ready handler
fn fire_hooks_in_view<W: Window + 'static>(
    window: Weak<W>,
    hook: Weak<RefCell<ScrollHook<W::Element>>>,
    slots: Weak<ListenerSlots>,
) -> impl Fn() + 'static {
    move || {
        let (Some(window), Some(hook), Some(slots)) =
            (window.upgrade(), hook.upgrade(), slots.upgrade())
        else {
            return;
        };

        let fired = transition_in_view(&hook, window.as_ref());
        debug!(fired, "initial transition pass");

        if let Some(id) = slots.ready.take() {
            window.remove_listener(id);
        }
    }
}
