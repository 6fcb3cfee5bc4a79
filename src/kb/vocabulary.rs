//! The core relation vocabulary shared by every modelling layer.

use crate::base::{Hyperedges, Uid};
use crate::kb::store::KnowledgeBase;

/// Identifiers of the primitive relation types: *has-a*, *part-of* and
/// *connects*.
///
/// The layers never assert facts of these directly; they install
/// subrelations (has-a-interface, part-of-component, connected-to-interface,
/// ...) and rely on subsumption closure when querying. Deep-clone
/// instantiation walks the whole *has-a* family through
/// [`CoreVocabulary::has_a`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreVocabulary {
    pub has_a: Uid,
    pub part_of: Uid,
    pub connects: Uid,
}

impl CoreVocabulary {
    pub const HAS_A: &'static str = "kb.relation.has-a";
    pub const PART_OF: &'static str = "kb.relation.part-of";
    pub const CONNECTS: &'static str = "kb.relation.connects";

    /// Ensure the core relation types exist. Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let has_a = Uid::new(Self::HAS_A);
        let part_of = Uid::new(Self::PART_OF);
        let connects = Uid::new(Self::CONNECTS);
        // Unconstrained schemas: the subrelations narrow the endpoints.
        kb.create_relation(has_a.clone(), "HAS-A", Hyperedges::new(), Hyperedges::new());
        kb.create_relation(part_of.clone(), "PART-OF", Hyperedges::new(), Hyperedges::new());
        kb.create_relation(connects.clone(), "CONNECTS", Hyperedges::new(), Hyperedges::new());
        Self {
            has_a,
            part_of,
            connects,
        }
    }
}
