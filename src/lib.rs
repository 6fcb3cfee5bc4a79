//! # componentnet
//!
//! Core library for component-network modelling, resource-cost analysis, and
//! software-to-hardware mapping.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! mapper      → software-to-hardware mapping, global cost, entry points
//!   ↓
//! resource    → consumers, providers, typed resources, bipartite matcher
//!   ↓
//! software    → algorithms, implementations, implementation-network enumeration
//! hardware    → devices, processors, hardware interfaces
//!   ↓
//! component   → components, interfaces, values, instantiation, connections
//!   ↓
//! kb          → knowledge base: concepts, relation types, facts, lattices
//!   ↓
//! base        → primitives (Uid, Label, Hyperedges)
//! ```
//!
//! Every modelling layer is a *vocabulary*: the identifiers of its root
//! concepts and relation types, installed idempotently into a shared
//! [`KnowledgeBase`]. Layer operations take the knowledge base as an explicit
//! parameter instead of wrapping it, so a single populated network can be
//! viewed through any combination of vocabularies at once.

// ============================================================================
// MODULES (dependency order: base → kb → component → software/hardware →
// resource → mapper)
// ============================================================================

/// Foundation types: Uid, Label, Hyperedges
pub mod base;

/// Knowledge base: concepts, relation types, facts, specialization lattices
pub mod kb;

/// Component networks: components, interfaces, values, instantiation
pub mod component;

/// Software networks: algorithms, implementations, data-flow wiring
pub mod software;

/// Hardware networks: devices, processors, hardware interfaces
pub mod hardware;

/// Resource/cost model: consumers, providers, satisfiability, matching
pub mod resource;

/// Software-to-hardware mapper and pipeline entry points
pub mod mapper;

/// Model interchange formats: YAML, JSON
#[cfg(feature = "interchange")]
pub mod interchange;

// Re-export foundation types
pub use base::{Hyperedges, Label, Uid};
pub use kb::{Direction, KnowledgeBase, ModelError};
