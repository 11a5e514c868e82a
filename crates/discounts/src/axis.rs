//! One optional match criterion of a discount rule.

use serde::{Deserialize, Serialize};

/// Match criterion on one axis (client type, product or category).
///
/// `Any` is the wildcard; `Specific(v)` only admits `v`. Serialized as an
/// optional value (`null` for `Any`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<T>", into = "Option<T>")]
pub enum Axis<T: Clone> {
    #[default]
    Any,
    Specific(T),
}

impl<T: Clone + PartialEq> Axis<T> {
    /// Whether a context value passes this criterion.
    ///
    /// A context without a value (`None`) only passes the wildcard: a rule
    /// aimed at a specific value never admits "nothing".
    pub fn admits(&self, value: Option<&T>) -> bool {
        match self {
            Axis::Any => true,
            Axis::Specific(wanted) => value == Some(wanted),
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Axis::Any)
    }

    pub fn specific(&self) -> Option<&T> {
        match self {
            Axis::Any => None,
            Axis::Specific(v) => Some(v),
        }
    }
}

impl<T: Clone> From<Option<T>> for Axis<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Axis::Specific(v),
            None => Axis::Any,
        }
    }
}

impl<T: Clone> From<Axis<T>> for Option<T> {
    fn from(value: Axis<T>) -> Self {
        match value {
            Axis::Any => None,
            Axis::Specific(v) => Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_admits_everything_including_nothing() {
        let any: Axis<u8> = Axis::Any;
        assert!(any.admits(Some(&3)));
        assert!(any.admits(None));
    }

    #[test]
    fn specific_admits_only_its_value() {
        let only_three = Axis::Specific(3u8);
        assert!(only_three.admits(Some(&3)));
        assert!(!only_three.admits(Some(&4)));
        assert!(!only_three.admits(None));
    }

    #[test]
    fn serializes_as_optional_value() {
        assert_eq!(serde_json::to_string(&Axis::<u8>::Any).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Axis::Specific(7u8)).unwrap(), "7");
        let parsed: Axis<u8> = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Axis::Specific(7));
    }
}
