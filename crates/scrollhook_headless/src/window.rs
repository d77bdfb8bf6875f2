//! In-memory window with listeners and a virtual clock
//!
//! Nothing here touches real time. Timers only run when the clock is moved
//! forward with [`HeadlessWindow::advance`], which makes throttle behaviour
//! deterministic in tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::time::Duration;

use scrollhook_platform::{
    event_names, EventTarget, Listener, ListenerId, PlatformError, Result, TimerCallback,
    TimerHandle, Window,
};
use tracing::trace;

use crate::element::HeadlessElement;

/// Default viewport height, matching a common laptop browser window
pub const DEFAULT_INNER_HEIGHT: i64 = 800;

struct ListenerEntry {
    id: ListenerId,
    target: EventTarget,
    event: String,
    listener: Listener,
}

/// A dispatched event, recorded for inspection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchRecord {
    /// Virtual time of the dispatch
    pub at: Duration,
    /// Target the event was dispatched on
    pub target: EventTarget,
    /// Event name
    pub event: String,
}

/// In-memory window
///
/// Wrap it in an `Rc` to share it with a page; listeners and timers call back
/// into the window while it is dispatching, so all state uses interior
/// mutability.
pub struct HeadlessWindow {
    scroll_y: Cell<i64>,
    inner_height: Cell<i64>,
    listeners: RefCell<Vec<ListenerEntry>>,
    next_listener: Cell<u64>,
    /// Pending timers keyed by (deadline in ms, handle) so ties run in
    /// scheduling order
    timers: RefCell<BTreeMap<(u64, u64), TimerCallback>>,
    next_timer: Cell<u64>,
    now_ms: Cell<u64>,
    dispatch_log: RefCell<Vec<DispatchRecord>>,
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new(DEFAULT_INNER_HEIGHT)
    }
}

impl HeadlessWindow {
    /// Create a window scrolled to the top with the given viewport height
    pub fn new(inner_height: i64) -> Self {
        Self {
            scroll_y: Cell::new(0),
            inner_height: Cell::new(inner_height.max(0)),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(1),
            timers: RefCell::new(BTreeMap::new()),
            next_timer: Cell::new(1),
            now_ms: Cell::new(0),
            dispatch_log: RefCell::new(Vec::new()),
        }
    }

    /// Resize the viewport
    pub fn set_inner_height(&self, height: i64) -> Result<()> {
        if height < 0 {
            return Err(PlatformError::InvalidViewport(format!(
                "negative viewport height {height}"
            )));
        }
        self.inner_height.set(height);
        Ok(())
    }

    /// Set the scroll offset without firing any event
    ///
    /// Offsets above the top of the document clamp to zero.
    pub fn set_scroll_y(&self, y: i64) {
        self.scroll_y.set(y.max(0));
    }

    /// Scroll to `y` and fire the raw `scroll` event
    pub fn scroll_to(&self, y: i64) {
        self.set_scroll_y(y);
        self.dispatch(EventTarget::Window, event_names::SCROLL);
    }

    /// Scroll so the viewport bottom sits at `bottom`, then fire the
    /// synthetic scroll event directly, skipping the throttle
    pub fn scroll_view_bottom_to(&self, bottom: i64) {
        self.set_scroll_y(bottom - self.inner_height.get());
        self.dispatch(EventTarget::Window, event_names::OPTIMIZED_SCROLL);
    }

    /// Fire `DOMContentLoaded` on the document
    pub fn load(&self) {
        self.dispatch(EventTarget::Document, event_names::DOM_CONTENT_LOADED);
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.get())
    }

    /// Move the clock forward, running every timer that comes due in order
    ///
    /// Timers scheduled by callbacks run too if they fall inside the window.
    pub fn advance(&self, by: Duration) {
        let target = self.now_ms.get().saturating_add(duration_ms(by));

        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due_now = timers
                    .first_key_value()
                    .is_some_and(|(&(due, _), _)| due <= target);
                if due_now {
                    timers.pop_first()
                } else {
                    None
                }
            };

            let Some(((due, handle), callback)) = next else {
                break;
            };

            self.now_ms.set(due);
            trace!(timer = handle, at_ms = due, "running timer");
            callback();
        }

        self.now_ms.set(target);
    }

    /// Number of timers waiting to run
    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Number of listeners registered for `event` on `target`
    pub fn listener_count(&self, target: EventTarget, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|entry| entry.target == target && entry.event == event)
            .count()
    }

    /// Number of listeners registered on any target
    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Every dispatch since creation (or the last [`Self::take_dispatch_log`])
    pub fn dispatch_log(&self) -> Vec<DispatchRecord> {
        self.dispatch_log.borrow().clone()
    }

    /// Drain the dispatch log
    pub fn take_dispatch_log(&self) -> Vec<DispatchRecord> {
        std::mem::take(&mut *self.dispatch_log.borrow_mut())
    }

    /// How many times `event` was dispatched on `target`
    pub fn dispatch_count(&self, target: EventTarget, event: &str) -> usize {
        self.dispatch_log
            .borrow()
            .iter()
            .filter(|record| record.target == target && record.event == event)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|entry| entry.id == id)
    }
}

impl Window for HeadlessWindow {
    type Element = HeadlessElement;

    fn scroll_y(&self) -> i64 {
        self.scroll_y.get()
    }

    fn inner_height(&self) -> i64 {
        self.inner_height.get()
    }

    fn add_listener(&self, target: EventTarget, event: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);

        self.listeners.borrow_mut().push(ListenerEntry {
            id,
            target,
            event: event.to_string(),
            listener,
        });
        trace!(?id, %target, event, "listener added");
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|entry| entry.id != id);
        let removed = listeners.len() != before;
        if removed {
            trace!(?id, "listener removed");
        }
        removed
    }

    fn dispatch(&self, target: EventTarget, event: &str) {
        self.dispatch_log.borrow_mut().push(DispatchRecord {
            at: self.now(),
            target,
            event: event.to_string(),
        });

        // Snapshot so handlers can add or remove listeners mid-dispatch
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|entry| entry.target == target && entry.event == event)
            .map(|entry| (entry.id, entry.listener.clone()))
            .collect();

        for (id, listener) in snapshot {
            // A listener removed by an earlier handler in this dispatch is skipped
            if self.is_registered(id) {
                listener();
            }
        }
    }

    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle(self.next_timer.get());
        self.next_timer.set(handle.0 + 1);

        let due = self.now_ms.get().saturating_add(duration_ms(delay));
        self.timers.borrow_mut().insert((due, handle.0), callback);
        trace!(timer = handle.0, due_ms = due, "timer scheduled");
        handle
    }

    fn clear_timeout(&self, handle: TimerHandle) -> bool {
        let mut timers = self.timers.borrow_mut();
        let key = timers.keys().find(|(_, id)| *id == handle.0).copied();
        match key {
            Some(key) => timers.remove(&key).is_some(),
            None => false,
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_timers_run_in_deadline_order() {
        let window = HeadlessWindow::default();
        let order: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));

        for (delay, tag) in [(30, 3), (10, 1), (20, 2)] {
            let order = Rc::clone(&order);
            window.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(tag)),
            );
        }

        window.advance(Duration::from_millis(15));
        assert_eq!(*order.borrow(), vec![1]);

        window.advance(Duration::from_millis(15));
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
        assert_eq!(window.now(), Duration::from_millis(30));
        assert_eq!(window.pending_timers(), 0);
    }

    #[test]
    fn test_clear_timeout() {
        let window = HeadlessWindow::default();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = Rc::clone(&fired);

        let handle = window.set_timeout(
            Duration::from_millis(5),
            Box::new(move || fired_clone.set(true)),
        );

        assert!(window.clear_timeout(handle));
        assert!(!window.clear_timeout(handle));

        window.advance(Duration::from_millis(10));
        assert!(!fired.get());
    }

    #[test]
    fn test_listener_can_remove_itself_during_dispatch() {
        let window = Rc::new(HeadlessWindow::default());
        let calls = Rc::new(Cell::new(0));
        let id_slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let listener: Listener = {
            let window = Rc::downgrade(&window);
            let calls = Rc::clone(&calls);
            let id_slot = Rc::clone(&id_slot);
            Rc::new(move || {
                calls.set(calls.get() + 1);
                if let (Some(window), Some(id)) = (window.upgrade(), id_slot.get()) {
                    window.remove_listener(id);
                }
            })
        };

        let id = window.add_listener(EventTarget::Document, "ping", listener);
        id_slot.set(Some(id));

        window.dispatch(EventTarget::Document, "ping");
        window.dispatch(EventTarget::Document, "ping");

        assert_eq!(calls.get(), 1);
        assert_eq!(window.total_listeners(), 0);
        assert_eq!(window.dispatch_count(EventTarget::Document, "ping"), 2);
    }

    #[test]
    fn test_targets_are_separate() {
        let window = HeadlessWindow::default();
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);

        window.add_listener(
            EventTarget::Window,
            event_names::SCROLL,
            Rc::new(move || calls_clone.set(calls_clone.get() + 1)),
        );

        window.dispatch(EventTarget::Document, event_names::SCROLL);
        assert_eq!(calls.get(), 0);

        window.scroll_to(120);
        assert_eq!(calls.get(), 1);
        assert_eq!(window.scroll_y(), 120);
    }

    #[test]
    fn test_scroll_view_bottom_to_clamps_at_top() {
        let window = HeadlessWindow::new(600);

        window.scroll_view_bottom_to(1008);
        assert_eq!(window.viewport().bottom(), 1008);

        window.scroll_view_bottom_to(100);
        assert_eq!(window.scroll_y(), 0);
        assert_eq!(window.viewport().bottom(), 600);
    }

    #[test]
    fn test_negative_inner_height_rejected() {
        let window = HeadlessWindow::default();
        assert!(matches!(
            window.set_inner_height(-1),
            Err(PlatformError::InvalidViewport(_))
        ));
        assert_eq!(window.inner_height(), DEFAULT_INNER_HEIGHT);
    }
}
