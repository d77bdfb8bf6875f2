//! Element abstraction

/// A DOM-like element handle
///
/// Handles are cheap to clone and refer to the same underlying node. The
/// tracker never creates or destroys elements; it only reads the natural
/// offset and edits the class list.
pub trait Element: Clone {
    /// Natural vertical offset from the top of the document, in pixels
    fn offset_top(&self) -> i64;

    /// Add a class. Adding a class that is already present is a no-op.
    fn add_class(&self, class: &str);

    /// Remove a class. Removing an absent class is a no-op.
    fn remove_class(&self, class: &str);

    /// Check if the class list contains `class`
    fn has_class(&self, class: &str) -> bool;

    /// Current classes in class-list order
    fn class_names(&self) -> Vec<String>;
}
