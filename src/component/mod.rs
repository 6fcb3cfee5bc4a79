//! # Component networks
//!
//! The first modelling layer above the knowledge base: *components* own
//! *interfaces* (which may own sub-interfaces and initial *values*),
//! interfaces are wired by *connected-to-interface* facts, components nest
//! via *part-of-component*, and an outer component can re-export an inner
//! interface through *alias-of*.
//!
//! Instantiating a component deep-clones the whole *has-a*-rooted
//! substructure of its classes, so an instance is structurally isomorphic to
//! its class. Endpoint traversal crosses alias chains in both directions.

mod instantiate;
mod ops;
mod vocabulary;

pub use vocabulary::ComponentVocabulary;
