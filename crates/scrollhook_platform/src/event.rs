//! Event targets, names, listeners and timers

use std::fmt;
use std::rc::Rc;

/// Well-known event names
pub mod event_names {
    /// Raw scroll event fired by the window on every scroll step
    pub const SCROLL: &str = "scroll";
    /// Raw wheel event, an alternative scroll source on some hosts
    pub const WHEEL: &str = "wheel";
    /// Fired once on the document after initial layout
    pub const DOM_CONTENT_LOADED: &str = "DOMContentLoaded";
    /// Synthetic, throttled scroll event dispatched by the tracker
    pub const OPTIMIZED_SCROLL: &str = "optimizedScroll";
}

/// Object a listener is attached to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The window (scroll and synthetic events)
    #[default]
    Window,
    /// The document (load lifecycle)
    Document,
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventTarget::Window => f.write_str("window"),
            EventTarget::Document => f.write_str("document"),
        }
    }
}

/// Listener callback
///
/// Events carry no payload. Uses Rc since the host loop is single-threaded.
pub type Listener = Rc<dyn Fn()>;

/// Deferred callback scheduled with [`crate::Window::set_timeout`]
pub type TimerCallback = Box<dyn FnOnce()>;

/// Identifies a registered listener so it can be removed later
///
/// Closures have no identity, so hosts hand out ids instead of comparing
/// callbacks the way a DOM does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Handle to a scheduled timer, used to cancel it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);
