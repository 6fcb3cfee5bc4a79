//! Generic bipartite matching driver.

use crate::base::{Hyperedges, Uid};
use crate::kb::{KnowledgeBase, ModelError};
use crate::resource::ResourceVocabulary;
use tracing::debug;

/// One chosen (consumer, provider) pair with its satisfiability score.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub consumer: Uid,
    pub provider: Uid,
    pub score: f64,
}

/// Result of a matching run.
///
/// `network` is the mutated knowledge base; the input of the run is never
/// touched, so an aborted run exposes nothing. `unmapped` lists the
/// consumers for which no provider yielded a positive score - being
/// infeasible is not an error.
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    pub network: KnowledgeBase,
    pub assignments: Vec<Assignment>,
    pub unmapped: Hyperedges,
}

/// Run the bipartite matching driver.
///
/// The driver clones the knowledge base, computes the left and right
/// partitions once, and then greedily serves the left partition in order:
/// every right element is scored, the highest positive score wins, ties are
/// broken by right-partition iteration order, and the mutation function
/// records the chosen pair. Consumers whose best score is not positive stay
/// unmapped (an exact fit with zero slack does not count as feasible).
///
/// The run is deterministic given deterministic partition orders; the left
/// iteration order is the only source of non-commutativity. A score or
/// mutation error aborts the run and discards the working copy.
pub fn run_bipartite<L, R, M, A>(
    kb: &KnowledgeBase,
    left: L,
    right: R,
    score: M,
    mut apply: A,
) -> Result<MatchOutcome, ModelError>
where
    L: Fn(&KnowledgeBase) -> Hyperedges,
    R: Fn(&KnowledgeBase) -> Hyperedges,
    M: Fn(&KnowledgeBase, &Uid, &Uid) -> Result<f64, ModelError>,
    A: FnMut(&mut KnowledgeBase, &Uid, &Uid) -> Result<(), ModelError>,
{
    let mut network = kb.clone();
    let lefts = left(&network);
    let rights = right(&network);
    debug!(
        "[MATCH] {} consumers against {} providers",
        lefts.len(),
        rights.len()
    );

    let mut assignments = Vec::new();
    let mut unmapped = Hyperedges::new();
    for consumer in &lefts {
        let mut best: Option<(Uid, f64)> = None;
        for provider in &rights {
            let candidate = score(&network, consumer, provider)?;
            if candidate > 0.0 && best.as_ref().is_none_or(|(_, held)| candidate > *held) {
                best = Some((provider.clone(), candidate));
            }
        }
        match best {
            Some((provider, held)) => {
                debug!("[MATCH] {consumer} -> {provider} (score {held:.3})");
                apply(&mut network, consumer, &provider)?;
                assignments.push(Assignment {
                    consumer: consumer.clone(),
                    provider,
                    score: held,
                });
            }
            None => {
                debug!("[MATCH] {consumer} stays unmapped");
                unmapped.insert(consumer.clone());
            }
        }
    }
    Ok(MatchOutcome {
        network,
        assignments,
        unmapped,
    })
}

impl ResourceVocabulary {
    /// Consumers that are not yet mapped to any provider.
    ///
    /// Re-running a mapping on an already mapped network therefore leaves
    /// the existing assignments alone.
    pub fn unmapped_consumers(&self, kb: &KnowledgeBase) -> Hyperedges {
        let consumers = self.consumers(kb, "");
        consumers
            .iter()
            .filter(|consumer| {
                self.providers_of(kb, &Hyperedges::one((*consumer).clone()))
                    .is_empty()
            })
            .cloned()
            .collect()
    }

    /// Map unmapped consumers onto providers by resource satisfiability
    /// alone.
    ///
    /// The mutation step records a *mapped-to* fact and re-checks the
    /// capacity invariant on the touched provider; usage is always recomputed
    /// from *consumes* facts, so no resource quantity is rewritten.
    pub fn map_consumers(&self, kb: &KnowledgeBase) -> Result<MatchOutcome, ModelError> {
        run_bipartite(
            kb,
            |net| self.unmapped_consumers(net),
            |net| self.providers(net, ""),
            |net, consumer, provider| self.satisfies(net, provider, consumer),
            |net, consumer, provider| {
                net.assert_fact(
                    &Hyperedges::one(consumer.clone()),
                    &Hyperedges::one(provider.clone()),
                    &self.mapped_to,
                );
                self.verify_capacity(net, provider)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> Uid {
        Uid::from(s)
    }

    fn one(s: &str) -> Hyperedges {
        Hyperedges::one(uid(s))
    }

    /// Consumers eating apples, providers growing them.
    fn orchard(
        demands: &[f64],
        supplies: &[f64],
    ) -> (KnowledgeBase, ResourceVocabulary, Vec<Uid>, Vec<Uid>) {
        let mut kb = KnowledgeBase::new();
        let rv = ResourceVocabulary::install(&mut kb);
        kb.create_concept(uid("task"), "Task");
        kb.create_concept(uid("node"), "Node");
        rv.is_consumer(&mut kb, &one("task"));
        rv.is_provider(&mut kb, &one("node"));
        rv.define_resource(&mut kb, uid("apples"), "Apples", &Hyperedges::new());

        let mut consumers = Vec::new();
        for (index, demand) in demands.iter().enumerate() {
            let c = kb.instantiate_from(&one("task"), &format!("c{index}"));
            let r = rv.instantiate_resource(&mut kb, &one("apples"), *demand);
            rv.consumes(&mut kb, &c, &r);
            consumers.push(c.first().unwrap().clone());
        }
        let mut providers = Vec::new();
        for (index, supply) in supplies.iter().enumerate() {
            let p = kb.instantiate_from(&one("node"), &format!("p{index}"));
            rv.instantiate_resource_for(&mut kb, &p, &one("apples"), *supply);
            providers.push(p.first().unwrap().clone());
        }
        (kb, rv, consumers, providers)
    }

    #[test]
    fn test_best_slack_wins() {
        let (kb, rv, consumers, providers) = orchard(&[2.0], &[3.0, 4.0]);
        let outcome = rv.map_consumers(&kb).unwrap();
        assert_eq!(outcome.assignments.len(), 1);
        assert_eq!(outcome.assignments[0].consumer, consumers[0]);
        // (4-2)/4 = 0.5 beats (3-2)/3 = 0.33.
        assert_eq!(outcome.assignments[0].provider, providers[1]);
    }

    #[test]
    fn test_ties_break_by_provider_order() {
        let (kb, rv, _consumers, providers) = orchard(&[1.0], &[2.0, 2.0]);
        let outcome = rv.map_consumers(&kb).unwrap();
        assert_eq!(outcome.assignments[0].provider, providers[0]);
    }

    #[test]
    fn test_exact_fit_stays_unmapped() {
        let (kb, rv, consumers, _providers) = orchard(&[2.0], &[2.0]);
        let outcome = rv.map_consumers(&kb).unwrap();
        assert!(outcome.assignments.is_empty());
        assert!(outcome.unmapped.contains(&consumers[0]));
    }

    #[test]
    fn test_input_network_is_never_mutated() {
        let (kb, rv, _consumers, _providers) = orchard(&[1.0], &[3.0]);
        let before = kb.facts().count();
        let outcome = rv.map_consumers(&kb).unwrap();
        assert_eq!(kb.facts().count(), before);
        assert_eq!(outcome.network.facts().count(), before + 1);
    }

    #[test]
    fn test_mapped_consumers_are_not_rescored() {
        let (kb, rv, consumers, providers) = orchard(&[1.0, 1.0], &[4.0]);
        let first = rv.map_consumers(&kb).unwrap();
        assert_eq!(first.assignments.len(), 2);

        let second = rv.map_consumers(&first.network).unwrap();
        assert!(second.assignments.is_empty());
        assert!(second.unmapped.is_empty());
        // The recorded mapping is unchanged.
        assert_eq!(
            rv.providers_of(&second.network, &Hyperedges::one(consumers[0].clone())),
            Hyperedges::one(providers[0].clone())
        );
    }

    #[test]
    fn test_malformed_supply_aborts_the_run() {
        let (mut kb, rv, _consumers, providers) = orchard(&[1.0], &[3.0]);
        // A provided resource whose label is garbage and carries no typed
        // quantity.
        kb.create_concept(uid("garbage"), "not-a-number");
        kb.assert_instance_of(&one("garbage"), &one("apples"));
        rv.provides(&mut kb, &Hyperedges::one(providers[0].clone()), &one("garbage"));

        assert!(rv.map_consumers(&kb).is_err());
    }
}
