//! Headless scrollhook host
//!
//! An in-memory implementation of the `scrollhook_platform` traits:
//!
//! - [`HeadlessElement`] - element handle with a shared class list
//! - [`HeadlessWindow`] - scroll state, listener registry and a virtual clock
//! - [`HeadlessDocument`] - single-column layout that assigns natural offsets
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//! use scrollhook_headless::{HeadlessDocument, HeadlessWindow};
//!
//! let window = Rc::new(HeadlessWindow::new(600));
//! let mut doc = HeadlessDocument::new();
//! doc.spacer(1000);
//! let hero = doc.append("hero", 400).unwrap();
//!
//! window.scroll_to(500);
//! window.advance(Duration::from_millis(50));
//! assert_eq!(hero.class_name(), "");
//! ```

mod document;
mod element;
mod window;

pub use document::{HeadlessDocument, DEFAULT_BODY_MARGIN};
pub use element::HeadlessElement;
pub use window::{DispatchRecord, HeadlessWindow, DEFAULT_INNER_HEIGHT};
