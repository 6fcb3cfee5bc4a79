//! Stable string identifiers.

use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

/// A free-form entity label.
///
/// Labels are display names, not identities: two entities may share a label,
/// and traversal operations filter by label equality.
pub type Label = SmolStr;

/// A stable string identifier for a concept, relation type or instance.
///
/// Vocabulary roots use fixed, path-like identifiers (e.g.
/// `component.interface`) so that installing a vocabulary into two knowledge
/// bases yields the same addresses. Instances created at runtime get
/// generated identifiers via [`Uid::generate`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(SmolStr);

impl Uid {
    /// Create an identifier from a fixed string.
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh, globally unique identifier.
    pub fn generate() -> Self {
        Self(SmolStr::new(uuid::Uuid::new_v4().to_string()))
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Uid {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Uid {
    fn from(s: String) -> Self {
        Self(SmolStr::new(s))
    }
}

impl Borrow<str> for Uid {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_uids_compare_by_content() {
        assert_eq!(Uid::new("component.interface"), Uid::from("component.interface"));
        assert_ne!(Uid::new("a"), Uid::new("b"));
    }

    #[test]
    fn test_generated_uids_are_unique() {
        assert_ne!(Uid::generate(), Uid::generate());
    }
}
