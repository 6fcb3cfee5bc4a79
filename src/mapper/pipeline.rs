//! Pipeline entry points for command-line front-ends.

use crate::base::Hyperedges;
use crate::kb::{KnowledgeBase, ModelError};
use crate::mapper::Mapper;
use crate::resource::Assignment;
use crate::software::SoftwareVocabulary;
use thiserror::Error;
use tracing::info;

/// Errors of the pipeline entry points.
///
/// The precondition variants signal an unusable knowledge base (a front-end
/// maps them to distinct non-zero exit codes); `Model` wraps a fatal
/// invariant violation during the run itself.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("knowledge base contains no providers")]
    NoProviders,
    #[error("knowledge base contains no consumers")]
    NoConsumers,
    #[error("knowledge base contains no implementation instances")]
    NoImplementations,
    #[error("knowledge base contains no processor instances")]
    NoProcessors,
    #[error("knowledge base contains no algorithm instances")]
    NoAlgorithms,
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Size statistics of the network a mapping ran on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MappingStats {
    pub implementations: usize,
    pub processors: usize,
    pub software_interfaces: usize,
    pub hardware_interfaces: usize,
    pub consumers: usize,
    pub providers: usize,
}

/// Result of [`map_software_to_hardware`]: the mapped network, the chosen
/// assignments, the consumers left unmapped, the normalised global cost and
/// the network statistics.
#[derive(Clone, Debug)]
pub struct MappingReport {
    pub network: KnowledgeBase,
    pub assignments: Vec<Assignment>,
    pub unmapped: Hyperedges,
    pub global_cost: f64,
    pub stats: MappingStats,
}

impl MappingReport {
    /// The conventional success exit code: the global cost scaled by 100.
    pub fn exit_code(&self) -> i32 {
        (self.global_cost * 100.0) as i32
    }
}

/// Map a network of implementation instances onto a network of processor
/// instances.
///
/// Installs the combined vocabulary on a working copy, validates that
/// providers, consumers, implementations and processors all exist, runs the
/// matcher and computes the global cost. The input knowledge base is never
/// mutated.
pub fn map_software_to_hardware(kb: &KnowledgeBase) -> Result<MappingReport, MapperError> {
    let mut prepared = kb.clone();
    let mapper = Mapper::install(&mut prepared);

    let implementations = mapper.software.implementations(&prepared, "");
    let processors = mapper.hardware.processors(&prepared, "");
    let consumers = mapper.resources.consumers(&prepared, "");
    let providers = mapper.resources.providers(&prepared, "");
    if providers.is_empty() {
        return Err(MapperError::NoProviders);
    }
    if consumers.is_empty() {
        return Err(MapperError::NoConsumers);
    }
    if implementations.is_empty() {
        return Err(MapperError::NoImplementations);
    }
    if processors.is_empty() {
        return Err(MapperError::NoProcessors);
    }
    let stats = MappingStats {
        implementations: implementations.len(),
        processors: processors.len(),
        software_interfaces: mapper
            .software
            .base
            .interfaces_of(&prepared, &implementations, "", crate::kb::Direction::Forward)
            .len(),
        hardware_interfaces: mapper
            .hardware
            .base
            .interfaces_of(&prepared, &processors, "", crate::kb::Direction::Forward)
            .len(),
        consumers: consumers.len(),
        providers: providers.len(),
    };

    let outcome = mapper.map(&prepared)?;
    let global_cost = mapper.global_cost(&outcome.network)?;
    info!(
        "[PIPELINE] mapped {} of {} implementations, global cost {global_cost:.4}",
        outcome.assignments.len(),
        stats.implementations
    );
    Ok(MappingReport {
        network: outcome.network,
        assignments: outcome.assignments,
        unmapped: outcome.unmapped,
        global_cost,
        stats,
    })
}

/// Expand a network of algorithm instances into all possible implementation
/// networks.
///
/// Errors when the network holds no algorithm instances or no *implements*
/// facts at all; a network where only some algorithms lack implementations
/// legitimately enumerates to the empty set instead.
pub fn generate_implementation_networks(
    kb: &KnowledgeBase,
) -> Result<Vec<KnowledgeBase>, MapperError> {
    let mut prepared = kb.clone();
    let software = SoftwareVocabulary::install(&mut prepared);
    if software.algorithms(&prepared, "").is_empty() {
        return Err(MapperError::NoAlgorithms);
    }
    let implements_family =
        prepared.subrelations_of(&Hyperedges::one(software.implements.clone()));
    if prepared
        .facts_of(&implements_family, &Hyperedges::new(), &Hyperedges::new())
        .is_empty()
    {
        return Err(MapperError::NoImplementations);
    }
    let networks = software.generate_all_implementation_networks(&prepared);
    info!("[PIPELINE] enumerated {} implementation networks", networks.len());
    Ok(networks)
}
