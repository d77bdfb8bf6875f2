//! In-memory element with a class list

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use scrollhook_platform::Element;
use smallvec::SmallVec;

struct ElementInner {
    id: String,
    offset_top: i64,
    classes: RefCell<SmallVec<[String; 4]>>,
}

/// Handle to an in-memory element
///
/// Clones share the same node, like DOM references.
#[derive(Clone)]
pub struct HeadlessElement {
    inner: Rc<ElementInner>,
}

impl HeadlessElement {
    /// Create an element at a natural offset with no classes
    pub fn new(id: impl Into<String>, offset_top: i64) -> Self {
        Self {
            inner: Rc::new(ElementInner {
                id: id.into(),
                offset_top,
                classes: RefCell::new(SmallVec::new()),
            }),
        }
    }

    /// Set the initial classes (builder style)
    pub fn classes<I, S>(self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for class in classes {
            self.add_class(class.as_ref());
        }
        self
    }

    /// Element identifier
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Classes joined by spaces, like `className`
    pub fn class_name(&self) -> String {
        self.inner.classes.borrow().join(" ")
    }

    /// Whether two handles refer to the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Element for HeadlessElement {
    fn offset_top(&self) -> i64 {
        self.inner.offset_top
    }

    fn add_class(&self, class: &str) {
        let mut classes = self.inner.classes.borrow_mut();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.inner.classes.borrow_mut().retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.classes.borrow().iter().any(|c| c == class)
    }

    fn class_names(&self) -> Vec<String> {
        self.inner.classes.borrow().to_vec()
    }
}

impl fmt::Debug for HeadlessElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessElement")
            .field("id", &self.inner.id)
            .field("offset_top", &self.inner.offset_top)
            .field("classes", &self.class_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_is_idempotent() {
        let el = HeadlessElement::new("a", 0).classes(["one", "two"]);

        el.add_class("one");
        assert_eq!(el.class_name(), "one two");

        el.remove_class("missing");
        assert_eq!(el.class_name(), "one two");

        el.remove_class("one");
        el.remove_class("one");
        assert_eq!(el.class_name(), "two");
    }

    #[test]
    fn test_clones_share_node() {
        let el = HeadlessElement::new("a", 10);
        let other = el.clone();

        other.add_class("shared");
        assert!(el.has_class("shared"));
        assert!(el.ptr_eq(&other));
        assert!(!el.ptr_eq(&HeadlessElement::new("a", 10)));
    }
}
