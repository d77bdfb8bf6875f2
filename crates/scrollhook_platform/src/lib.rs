//! Scrollhook Platform Abstraction Layer
//!
//! This crate provides the host-side traits and types the scroll tracker
//! talks to: elements with class lists, a window with scroll state, named
//! event listeners and deferred timers.
//!
//! # Architecture
//!
//! - [`Element`] - Natural offset and class list of a document node
//! - [`Window`] - Viewport, listener registry, synthetic dispatch and timers
//!
//! # Implementations
//!
//! - `scrollhook_headless` - In-memory host with a virtual clock
//!
//! # Example
//!
//! ```ignore
//! use scrollhook_platform::*;
//!
//! fn log_bottom<W: Window>(window: &W) {
//!     let viewport = window.viewport();
//!     println!("viewport bottom at {}", viewport.bottom());
//! }
//! ```

mod element;
mod error;
mod event;
mod window;

// Re-export all public types
pub use element::Element;
pub use error::{PlatformError, Result};
pub use event::{event_names, EventTarget, Listener, ListenerId, TimerCallback, TimerHandle};
pub use window::{Viewport, Window};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::element::Element;
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{
        event_names, EventTarget, Listener, ListenerId, TimerCallback, TimerHandle,
    };
    pub use crate::window::{Viewport, Window};
}
