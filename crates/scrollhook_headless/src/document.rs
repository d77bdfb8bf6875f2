//! Vertical document layout
//!
//! Stacks elements top to bottom the way block elements flow in a page, so
//! each element gets a natural offset without a real layout engine.

use rustc_hash::FxHashMap;
use scrollhook_platform::{PlatformError, Result};

use crate::element::HeadlessElement;

/// Body margin browsers apply by default
pub const DEFAULT_BODY_MARGIN: i64 = 8;

/// A document of block elements laid out in a single column
#[derive(Debug)]
pub struct HeadlessDocument {
    elements: Vec<HeadlessElement>,
    by_id: FxHashMap<String, usize>,
    cursor: i64,
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessDocument {
    /// Create an empty document with the default body margin
    pub fn new() -> Self {
        Self::with_margin(DEFAULT_BODY_MARGIN)
    }

    /// Create an empty document with a custom body margin
    pub fn with_margin(margin: i64) -> Self {
        Self {
            elements: Vec::new(),
            by_id: FxHashMap::default(),
            cursor: margin.max(0),
        }
    }

    /// Insert vertical space that holds no element
    pub fn spacer(&mut self, height: i64) -> &mut Self {
        self.cursor += height.max(0);
        self
    }

    /// Append a block element below the last one
    pub fn append(&mut self, id: &str, height: i64) -> Result<HeadlessElement> {
        if self.by_id.contains_key(id) {
            return Err(PlatformError::DuplicateElement(id.to_string()));
        }
        if height < 0 {
            return Err(PlatformError::Other(format!(
                "element {id} has negative height {height}"
            )));
        }

        let element = HeadlessElement::new(id, self.cursor);
        self.cursor += height;
        self.by_id.insert(id.to_string(), self.elements.len());
        self.elements.push(element.clone());
        Ok(element)
    }

    /// Look up an element by id
    pub fn get(&self, id: &str) -> Result<HeadlessElement> {
        self.by_id
            .get(id)
            .map(|&index| self.elements[index].clone())
            .ok_or_else(|| PlatformError::UnknownElement(id.to_string()))
    }

    /// Elements in document order
    pub fn elements(&self) -> &[HeadlessElement] {
        &self.elements
    }

    /// Total document height, including the top margin
    pub fn height(&self) -> i64 {
        self.cursor
    }
}
