//! # Software networks
//!
//! Refines the component layer with the abstract/concrete split: an
//! *Algorithm* is an abstract computational contract with named *Input* and
//! *Output* interfaces; an *Implementation* is a concrete algorithm class
//! linked to its contract via *implements*. At instance level, *realizes*
//! selects a concrete implementation instance for an algorithm instance,
//! and *depends-on* wires inputs to the outputs they consume.
//!
//! [`SoftwareVocabulary::generate_all_implementation_networks`] expands an
//! algorithm network into every possible implementation network.

mod enumerate;
mod vocabulary;

pub use vocabulary::SoftwareVocabulary;
