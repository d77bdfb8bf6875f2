//! Window abstraction and viewport geometry

use crate::element::Element;
use crate::event::{EventTarget, Listener, ListenerId, TimerCallback, TimerHandle};
use std::time::Duration;

/// Snapshot of the visible region of the document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    /// Current vertical scroll offset in pixels
    pub scroll_y: i64,
    /// Viewport height in pixels
    pub height: i64,
}

impl Viewport {
    /// Create a viewport snapshot
    pub fn new(scroll_y: i64, height: i64) -> Self {
        Self { scroll_y, height }
    }

    /// Bottom edge of the viewport in document coordinates
    pub fn bottom(&self) -> i64 {
        self.scroll_y + self.height
    }

    /// Whether a document position is at or above the bottom edge
    pub fn reaches(&self, position: i64) -> bool {
        position <= self.bottom()
    }
}

/// Window abstraction trait
///
/// Implemented by host windows. All methods take `&self`; hosts use interior
/// mutability because listeners call back into the window while it is
/// dispatching.
pub trait Window {
    /// Element handle type living in this window's document
    type Element: Element;

    /// Current vertical scroll offset
    fn scroll_y(&self) -> i64;

    /// Viewport height
    fn inner_height(&self) -> i64;

    /// Current viewport snapshot
    fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_y(), self.inner_height())
    }

    /// Register a listener for `event` on `target`
    fn add_listener(&self, target: EventTarget, event: &str, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns false if it was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;

    /// Dispatch a synthetic event with no payload
    fn dispatch(&self, target: EventTarget, event: &str);

    /// Run `callback` once after `delay`
    fn set_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    /// Cancel a scheduled timer. Returns false if it already ran or was cancelled.
    fn clear_timeout(&self, handle: TimerHandle) -> bool;
}
