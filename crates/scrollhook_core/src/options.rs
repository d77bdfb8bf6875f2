//! Registration options
//!
//! Class lists accept either a single class name or a list, so
//! `"hidden"` and `["hidden"]` are the same thing once normalized.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Ordered list of CSS class names
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StatesRepr", into = "Vec<String>")]
pub struct States(SmallVec<[String; 2]>);

/// Wire shape: a bare string or a list of strings
#[derive(Deserialize)]
#[serde(untagged)]
enum StatesRepr {
    One(String),
    Many(Vec<String>),
}

impl From<StatesRepr> for States {
    fn from(repr: StatesRepr) -> Self {
        match repr {
            StatesRepr::One(class) => Self::from(class),
            StatesRepr::Many(classes) => Self::from(classes),
        }
    }
}

impl From<States> for Vec<String> {
    fn from(states: States) -> Self {
        states.0.into_vec()
    }
}

impl States {
    /// An empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate classes in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for States {
    fn from(class: &str) -> Self {
        Self(SmallVec::from_iter([class.to_string()]))
    }
}

impl From<String> for States {
    fn from(class: String) -> Self {
        Self(SmallVec::from_iter([class]))
    }
}

impl From<Vec<String>> for States {
    fn from(classes: Vec<String>) -> Self {
        Self(SmallVec::from_vec(classes))
    }
}

impl From<Vec<&str>> for States {
    fn from(classes: Vec<&str>) -> Self {
        classes.into_iter().collect()
    }
}

impl From<&[&str]> for States {
    fn from(classes: &[&str]) -> Self {
        classes.iter().copied().collect()
    }
}

impl<const N: usize> From<[&str; N]> for States {
    fn from(classes: [&str; N]) -> Self {
        classes.into_iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for States {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a States {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Options for [`crate::ScrollHook::register`]
///
/// Every field is optional. A missing position falls back to the element's
/// natural offset.
///
/// ```rust
/// use scrollhook_core::RegisterOptions;
///
/// let options = RegisterOptions::new()
///     .position(800)
///     .initial_states("hidden")
///     .final_states(["slide-up", "visible"]);
/// assert_eq!(options.position, Some(800));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterOptions {
    /// Pixel position at which the registration fires
    pub position: Option<i64>,
    /// Classes removed when fired
    pub initial_states: States,
    /// Classes added when fired
    pub final_states: States,
}

impl RegisterOptions {
    /// Empty options: natural offset, no class changes
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire at an explicit position instead of the element's offset
    pub fn position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Classes to remove when fired
    pub fn initial_states(mut self, states: impl Into<States>) -> Self {
        self.initial_states = states.into();
        self
    }

    /// Classes to add when fired
    pub fn final_states(mut self, states: impl Into<States>) -> Self {
        self.final_states = states.into();
        self
    }
}
