//! # Model interchange
//!
//! Serialises a [`KnowledgeBase`] to YAML or JSON and back. The document
//! model is flat: concept records (with their *is-a* parents and
//! *instance-of* classes), relation records (with domain, codomain and
//! subsumption parents) and fact records (relation, source set, target
//! set). A round-trip preserves every identifier, label, subsumption edge
//! and fact.
//!
//! Resource quantities travel as their printable labels only; the typed
//! field is rebuilt lazily on the consuming side.

mod document;
mod error;

pub use document::{ConceptRecord, Document, FactRecord, RelationRecord};
pub use error::InterchangeError;

use crate::kb::KnowledgeBase;

/// Serialise a knowledge base to YAML.
pub fn to_yaml(kb: &KnowledgeBase) -> Result<String, InterchangeError> {
    serde_yaml::to_string(&Document::from_network(kb))
        .map_err(|e| InterchangeError::Yaml(e.to_string()))
}

/// Load a knowledge base from YAML.
pub fn from_yaml(input: &str) -> Result<KnowledgeBase, InterchangeError> {
    let document: Document =
        serde_yaml::from_str(input).map_err(|e| InterchangeError::Yaml(e.to_string()))?;
    document.into_network()
}

/// Serialise a knowledge base to pretty-printed JSON.
pub fn to_json(kb: &KnowledgeBase) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(&Document::from_network(kb))
        .map_err(|e| InterchangeError::Json(e.to_string()))
}

/// Load a knowledge base from JSON.
pub fn from_json(input: &str) -> Result<KnowledgeBase, InterchangeError> {
    let document: Document =
        serde_json::from_str(input).map_err(|e| InterchangeError::Json(e.to_string()))?;
    document.into_network()
}
