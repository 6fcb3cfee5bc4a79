//! Insertion-ordered identifier sets.
//!
//! Every query and traversal in the crate returns a [`Hyperedges`] value.
//! The set is duplicate-free but remembers insertion order, and all set
//! algebra preserves the order of the left-hand operand. Iteration order is
//! what makes mapping runs deterministic, so it must never depend on hash
//! state.

use crate::base::Uid;
use indexmap::IndexSet;

/// An insertion-ordered set of entity identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hyperedges {
    set: IndexSet<Uid>,
}

impl Hyperedges {
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding a single identifier.
    pub fn one(uid: Uid) -> Self {
        let mut set = IndexSet::new();
        set.insert(uid);
        Self { set }
    }

    /// Insert an identifier, keeping the first occurrence's position.
    ///
    /// Returns `true` if the identifier was not present before.
    pub fn insert(&mut self, uid: Uid) -> bool {
        self.set.insert(uid)
    }

    pub fn contains(&self, uid: &Uid) -> bool {
        self.set.contains(uid)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// First identifier in insertion order, if any.
    pub fn first(&self) -> Option<&Uid> {
        self.set.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uid> {
        self.set.iter()
    }

    /// Union: `self` followed by the members of `other` not already present.
    pub fn unite(&self, other: &Hyperedges) -> Hyperedges {
        let mut result = self.clone();
        for uid in &other.set {
            result.set.insert(uid.clone());
        }
        result
    }

    /// Intersection, in the order of `self`.
    pub fn intersect(&self, other: &Hyperedges) -> Hyperedges {
        Hyperedges {
            set: self
                .set
                .iter()
                .filter(|uid| other.contains(uid))
                .cloned()
                .collect(),
        }
    }

    /// Difference, in the order of `self`.
    pub fn subtract(&self, other: &Hyperedges) -> Hyperedges {
        Hyperedges {
            set: self
                .set
                .iter()
                .filter(|uid| !other.contains(uid))
                .cloned()
                .collect(),
        }
    }

    /// True when every member of `self` is contained in `other`.
    pub fn is_subset_of(&self, other: &Hyperedges) -> bool {
        self.set.iter().all(|uid| other.contains(uid))
    }
}

impl From<Uid> for Hyperedges {
    fn from(uid: Uid) -> Self {
        Self::one(uid)
    }
}

impl From<&Uid> for Hyperedges {
    fn from(uid: &Uid) -> Self {
        Self::one(uid.clone())
    }
}

impl FromIterator<Uid> for Hyperedges {
    fn from_iter<I: IntoIterator<Item = Uid>>(iter: I) -> Self {
        Self {
            set: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Hyperedges {
    type Item = &'a Uid;
    type IntoIter = indexmap::set::Iter<'a, Uid>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.iter()
    }
}

impl IntoIterator for Hyperedges {
    type Item = Uid;
    type IntoIter = indexmap::set::IntoIter<Uid>;

    fn into_iter(self) -> Self::IntoIter {
        self.set.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uids(ids: &[&str]) -> Hyperedges {
        ids.iter().map(|id| Uid::from(*id)).collect()
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let set = uids(&["c", "a", "b"]);
        let order: Vec<&str> = set.iter().map(Uid::as_str).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unite_keeps_left_order() {
        let left = uids(&["a", "b"]);
        let right = uids(&["b", "c"]);
        let union = left.unite(&right);
        let order: Vec<&str> = union.iter().map(Uid::as_str).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_intersect_and_subtract() {
        let left = uids(&["a", "b", "c"]);
        let right = uids(&["c", "a"]);
        assert_eq!(left.intersect(&right), uids(&["a", "c"]));
        assert_eq!(left.subtract(&right), uids(&["b"]));
    }

    #[test]
    fn test_subset() {
        let small = uids(&["a", "b"]);
        let big = uids(&["b", "a", "c"]);
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));
        assert!(Hyperedges::new().is_subset_of(&small));
    }

    #[test]
    fn test_duplicates_collapse() {
        let mut set = Hyperedges::new();
        assert!(set.insert(Uid::from("x")));
        assert!(!set.insert(Uid::from("x")));
        assert_eq!(set.len(), 1);
    }
}
