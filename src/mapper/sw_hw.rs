//! The software-to-hardware mapping engine.

use crate::base::{Hyperedges, Uid};
use crate::hardware::HardwareVocabulary;
use crate::kb::{Direction, KnowledgeBase, ModelError};
use crate::resource::{MatchOutcome, ResourceVocabulary, run_bipartite};
use crate::software::SoftwareVocabulary;
use tracing::trace;

/// The combined vocabulary of a mapping run: software and hardware networks
/// plus the resource model, with the two refinement relations linking them.
///
/// *executed-on* (Implementation → Processor) and *reachable-via* (software
/// Interface → hardware Interface) are subrelations of *mapped-to*, so the
/// resource model's `providers_of`/`consumers_of` queries see mapper
/// assignments without special cases. The matcher records *executed-on*
/// only; *reachable-via* is left to external callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mapper {
    pub software: SoftwareVocabulary,
    pub hardware: HardwareVocabulary,
    pub resources: ResourceVocabulary,
    pub executed_on: Uid,
    pub reachable_via: Uid,
}

impl Mapper {
    pub const EXECUTED_ON: &'static str = "mapper.relation.executed-on";
    pub const REACHABLE_VIA: &'static str = "mapper.relation.reachable-via";

    /// Ensure all three vocabularies and the refinement relations exist.
    /// Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let software = SoftwareVocabulary::install(kb);
        let hardware = HardwareVocabulary::install(kb);
        let resources = ResourceVocabulary::install(kb);
        let executed_on = Uid::new(Self::EXECUTED_ON);
        let reachable_via = Uid::new(Self::REACHABLE_VIA);
        kb.create_subrelation(
            executed_on.clone(),
            "EXECUTED-ON",
            Hyperedges::one(software.implementation.clone()),
            Hyperedges::one(hardware.processor.clone()),
            &resources.mapped_to,
        );
        kb.create_subrelation(
            reachable_via.clone(),
            "REACHABLE-VIA",
            Hyperedges::one(software.interface.clone()),
            Hyperedges::one(hardware.interface.clone()),
            &resources.mapped_to,
        );
        Self {
            software,
            hardware,
            resources,
            executed_on,
            reachable_via,
        }
    }

    /// Left partition: implementation instances that are consumers and not
    /// yet mapped anywhere.
    pub fn left_partition(&self, kb: &KnowledgeBase) -> Hyperedges {
        self.resources
            .unmapped_consumers(kb)
            .intersect(&self.software.implementations(kb, ""))
    }

    /// Right partition: processor instances that are providers.
    pub fn right_partition(&self, kb: &KnowledgeBase) -> Hyperedges {
        self.resources
            .providers(kb, "")
            .intersect(&self.hardware.processors(kb, ""))
    }

    /// Score an (implementation, processor) pair.
    ///
    /// Resource satisfiability comes first; on top of it the reachability
    /// gate requires that every already-placed communication partner of the
    /// implementation sits on the processor itself or on a processor wired
    /// to it. Unplaced partners constrain nothing yet.
    pub fn match_score(
        &self,
        kb: &KnowledgeBase,
        implementation: &Uid,
        processor: &Uid,
    ) -> Result<f64, ModelError> {
        let score = self.resources.satisfies(kb, processor, implementation)?;
        if score < 0.0 {
            return Ok(score);
        }

        let software_neighbours = self.neighbourhood(
            kb,
            &self.software.base,
            &Hyperedges::one(implementation.clone()),
        );
        let mut hardware_neighbourhood = self.neighbourhood(
            kb,
            &self.hardware.base,
            &Hyperedges::one(processor.clone()),
        );
        // Co-location is always allowed.
        hardware_neighbourhood.insert(processor.clone());
        let placed_targets = self.resources.providers_of(kb, &software_neighbours);
        if !placed_targets.is_subset_of(&hardware_neighbourhood) {
            trace!(
                "[MAPPER] {implementation} -> {processor} rejected: \
                 a communication partner sits outside the reachable processors"
            );
            return Ok(f64::NEG_INFINITY);
        }
        Ok(score)
    }

    /// Map unmapped implementations onto processors.
    ///
    /// The mutation step asserts *executed-on* and re-checks the capacity
    /// invariant; resource quantities are never rewritten because
    /// satisfiability always recomputes usage from *consumes* facts. The
    /// input knowledge base is untouched - the outcome carries the mutated
    /// copy.
    pub fn map(&self, kb: &KnowledgeBase) -> Result<MatchOutcome, ModelError> {
        run_bipartite(
            kb,
            |net| self.left_partition(net),
            |net| self.right_partition(net),
            |net, implementation, processor| self.match_score(net, implementation, processor),
            |net, implementation, processor| {
                net.assert_fact(
                    &Hyperedges::one(implementation.clone()),
                    &Hyperedges::one(processor.clone()),
                    &self.executed_on,
                );
                self.resources.verify_capacity(net, processor)
            },
        )
    }

    /// Normalised global cost of a mapped network, in [0, 1].
    ///
    /// For every processor hosting at least one consumer and every resource
    /// it provides, the residual ratio (supply - used) / supply is
    /// collected; the result is the mean of those ratios. Higher means more
    /// headroom; 0 when no processor is used.
    pub fn global_cost(&self, kb: &KnowledgeBase) -> Result<f64, ModelError> {
        let mut total = 0.0_f64;
        let mut ratios = 0_usize;
        for processor in &self.right_partition(kb) {
            let processor_set = Hyperedges::one(processor.clone());
            let mapped = self.resources.consumers_of(kb, &processor_set);
            if mapped.is_empty() {
                continue;
            }
            let consumed = kb.related(&mapped, &self.resources.consumes, "", Direction::Forward);
            for available_uid in
                &self.resources.resources_of(kb, &processor_set, &Hyperedges::new())
            {
                let supply = self.resources.amount_of(kb, available_uid)?;
                let supply_classes =
                    kb.classes_of(&Hyperedges::one(available_uid.clone()), "");
                let used = self.resources.used_amount(kb, &supply_classes, &consumed)?;
                total += (supply - used) / supply;
                ratios += 1;
            }
        }
        Ok(if ratios > 0 { total / ratios as f64 } else { 0.0 })
    }

    /// Entities owning interfaces connected to the given entities'
    /// interfaces: the communication partners of an implementation, or the
    /// wired processors of a processor.
    fn neighbourhood(
        &self,
        kb: &KnowledgeBase,
        layer: &crate::component::ComponentVocabulary,
        uids: &Hyperedges,
    ) -> Hyperedges {
        let interfaces = layer.interfaces_of(kb, uids, "", Direction::Forward);
        let endpoints = layer.endpoints_of(kb, &interfaces, "", Direction::Both);
        layer.interfaces_of(kb, &endpoints, "", Direction::Inverse)
    }
}
