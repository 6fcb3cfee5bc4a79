//! Error types for knowledge-base invariant violations.
//!
//! Schema violations at assertion time are *not* errors - they are silently
//! rejected and callers detect them through empty result sets. The variants
//! here are the fatal cases: a broken model that a mapping run must not
//! silently paper over. A run aborted with one of these leaves its working
//! copy in an undefined state; callers must discard it.

use crate::base::Uid;
use thiserror::Error;

/// Fatal invariant violations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A resource instance whose label is not a parseable quantity.
    #[error("resource {uid} carries a malformed quantity label {label:?}")]
    MalformedQuantity { uid: Uid, label: String },

    /// Cumulative consumption on a provider exceeds its supply.
    #[error(
        "capacity of provider {provider} exceeded for resource class {resource}: \
         consumed {consumed}, supplied {supplied}"
    )]
    CapacityExceeded {
        provider: Uid,
        resource: Uid,
        consumed: f64,
        supplied: f64,
    },
}
