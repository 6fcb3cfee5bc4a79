//! # Resource/cost model
//!
//! Consumers demand typed quantities of resources, providers supply them.
//! Two resource instances are type-compatible when their *instance-of* sets
//! intersect. [`ResourceVocabulary::satisfies`] scores a (provider,
//! consumer) pair by its tightest slack ratio across matched resource
//! types, recomputing current usage from the *consumes* facts of already
//! mapped consumers on every call.
//!
//! [`run_bipartite`] is the generic matching driver: deterministic,
//! atomic-or-abort, parameterised over partition, score and mutation
//! functions.

mod matcher;
mod model;

pub use matcher::{Assignment, MatchOutcome, run_bipartite};
pub use model::ResourceVocabulary;
