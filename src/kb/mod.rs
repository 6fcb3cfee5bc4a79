//! # Knowledge base
//!
//! The typed, hyper-relational store every modelling layer is built on.
//!
//! Three kinds of entity live here:
//! - *Concepts* - labelled entities participating in *is-a* and
//!   *instance-of* lattices
//! - *Relation types* - labelled, directed relation schemas with domain and
//!   codomain concept sets; relation types form their own *is-a* lattice
//!   (subrelations)
//! - *Facts* - directed hyperedges of some relation type between two
//!   non-empty entity sets
//!
//! Subrelation closure is the central query primitive: asking for the facts
//! of a relation type returns the facts of that type and of every
//! subrelation of it. Asserting a fact whose endpoints do not fit the
//! declared schema is silently rejected; callers observe the empty result.

mod entity;
mod error;
mod query;
mod store;
mod vocabulary;

pub use entity::{Concept, Direction, Fact, RelationType};
pub use error::ModelError;
pub use store::KnowledgeBase;
pub use vocabulary::CoreVocabulary;
