//! Entity records stored in a knowledge base.

use crate::base::{Hyperedges, Label};
use crate::base::Uid;

/// A labelled entity participating in the *is-a* and *instance-of* lattices.
#[derive(Clone, Debug, PartialEq)]
pub struct Concept {
    /// Display name; not an identity.
    pub label: Label,
    /// Typed quantity for resource instances. The label carries the printable
    /// form; this field is authoritative when present.
    pub quantity: Option<f64>,
}

impl Concept {
    pub fn new(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            quantity: None,
        }
    }
}

/// A directed relation schema.
///
/// An empty domain or codomain set means the endpoint is unconstrained; the
/// core *has-a* / *part-of* / *connects* relations use that, every layer
/// subrelation narrows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationType {
    pub label: Label,
    pub domain: Hyperedges,
    pub codomain: Hyperedges,
}

/// A concrete directed hyperedge of some relation type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fact {
    pub relation: Uid,
    pub sources: Hyperedges,
    pub targets: Hyperedges,
}

/// Traversal direction for fact-based queries.
///
/// `Forward` follows facts from source to target, `Inverse` from target to
/// source, `Both` returns the union of the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Inverse,
    Both,
}
