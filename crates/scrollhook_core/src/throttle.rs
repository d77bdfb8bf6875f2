//! Scroll throttle
//!
//! Turns a burst of raw scroll events into at most one synthetic event per
//! interval. The first call in an idle period opens a window and schedules
//! the dispatch at the end of it; calls while the window is open are dropped,
//! not queued.

use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use scrollhook_platform::{EventTarget, Listener, TimerHandle, Window};
use tracing::trace;

struct ThrottleState<W> {
    window: Weak<W>,
    event: String,
    delay: Duration,
    running: Cell<bool>,
    pending: Cell<Option<TimerHandle>>,
}

/// Rate limiter that dispatches a named window event
///
/// Clones share the same window state.
pub struct Throttle<W> {
    state: Rc<ThrottleState<W>>,
}

impl<W> Clone for Throttle<W> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<W: Window + 'static> Throttle<W> {
    /// Create a throttle dispatching `event` on `window` at most once per `delay`
    pub fn new(window: &Rc<W>, event: impl Into<String>, delay: Duration) -> Self {
        Self {
            state: Rc::new(ThrottleState {
                window: Rc::downgrade(window),
                event: event.into(),
                delay,
                running: Cell::new(false),
                pending: Cell::new(None),
            }),
        }
    }

    /// Feed one raw event into the throttle
    pub fn call(&self) {
        let state = &self.state;
        if state.running.get() {
            trace!(event = %state.event, "throttled call dropped");
            return;
        }

        let Some(window) = state.window.upgrade() else {
            return;
        };

        state.running.set(true);
        let deferred = Rc::clone(state);
        let handle = window.set_timeout(
            state.delay,
            Box::new(move || {
                deferred.pending.set(None);
                if let Some(window) = deferred.window.upgrade() {
                    window.dispatch(EventTarget::Window, &deferred.event);
                }
                deferred.running.set(false);
            }),
        );
        state.pending.set(Some(handle));
    }

    /// Drop a scheduled dispatch and close the window
    ///
    /// Returns false if nothing was pending.
    pub fn cancel(&self) -> bool {
        let state = &self.state;
        let Some(handle) = state.pending.take() else {
            return false;
        };

        state.running.set(false);
        match state.window.upgrade() {
            Some(window) => window.clear_timeout(handle),
            None => false,
        }
    }

    /// Whether a dispatch is scheduled
    pub fn is_running(&self) -> bool {
        self.state.running.get()
    }

    /// Name of the dispatched event
    pub fn event_name(&self) -> &str {
        &self.state.event
    }

    /// Window length
    pub fn delay(&self) -> Duration {
        self.state.delay
    }

    /// Wrap the throttle as a raw event listener
    pub fn into_listener(self) -> Listener {
        Rc::new(move || self.call())
    }
}

impl<W> fmt::Debug for Throttle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("event", &self.state.event)
            .field("delay", &self.state.delay)
            .field("running", &self.state.running.get())
            .finish()
    }
}
