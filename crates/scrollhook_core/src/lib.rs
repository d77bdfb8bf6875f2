//! Scrollhook Core
//!
//! Toggles CSS class sets on elements as the page scrolls past registered
//! pixel positions:
//!
//! - **Registrations**: element + trigger position + classes to remove/add
//! - **Fire-once**: a position's registrations apply once, then are evicted
//! - **Nearest position**: a running minimum lets scroll handlers bail early
//! - **Throttle**: raw scroll events collapse into one synthetic event per window
//! - **Page**: owns the tracker and its listener lifecycle on a host window
//!
//! Everything is single-threaded: shared state lives in `Rc<RefCell<_>>` and
//! is only touched from host event callbacks.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use scrollhook_core::{Page, RegisterOptions};
//! use scrollhook_headless::{HeadlessElement, HeadlessWindow};
//!
//! let window = Rc::new(HeadlessWindow::new(800));
//! let banner = HeadlessElement::new("banner", 1500).classes(["hidden"]);
//!
//! let mut page = Page::new(Rc::clone(&window));
//! page.register(
//!     banner.clone(),
//!     RegisterOptions::new().initial_states("hidden").final_states("slide-up"),
//! )
//! .start();
//!
//! window.scroll_to(900);
//! window.advance(Duration::from_millis(50));
//! assert_eq!(banner.class_name(), "slide-up");
//! ```

pub mod config;
pub mod options;
pub mod page;
pub mod throttle;
pub mod tracker;

pub use config::{ConfigError, HookConfig, DEFAULT_THROTTLE_MS};
pub use options::{RegisterOptions, States};
pub use page::Page;
pub use throttle::Throttle;
pub use tracker::{Registration, ScrollHook};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, HookConfig};
    pub use crate::options::{RegisterOptions, States};
    pub use crate::page::Page;
    pub use crate::throttle::Throttle;
    pub use crate::tracker::{Registration, ScrollHook};
    pub use scrollhook_platform::prelude::*;
}
