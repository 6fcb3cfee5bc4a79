//! Knowledge-base queries: lattice closures and fact traversal.

use crate::base::{Hyperedges, Uid};
use crate::kb::entity::{Concept, Direction, Fact, RelationType};
use crate::kb::store::KnowledgeBase;
use rustc_hash::FxHashMap;

impl KnowledgeBase {
    /// True when the identifier names a concept or a relation type.
    pub fn contains(&self, uid: &Uid) -> bool {
        self.concepts.contains_key(uid) || self.relations.contains_key(uid)
    }

    pub fn concept(&self, uid: &Uid) -> Option<&Concept> {
        self.concepts.get(uid)
    }

    pub fn relation(&self, uid: &Uid) -> Option<&RelationType> {
        self.relations.get(uid)
    }

    /// Label of a concept or relation type.
    pub fn label_of(&self, uid: &Uid) -> Option<&str> {
        self.concepts
            .get(uid)
            .map(|c| c.label.as_str())
            .or_else(|| self.relations.get(uid).map(|r| r.label.as_str()))
    }

    /// All concepts, in creation order.
    pub fn concepts(&self) -> impl Iterator<Item = (&Uid, &Concept)> {
        self.concepts.iter()
    }

    /// All relation types, in creation order.
    pub fn relation_types(&self) -> impl Iterator<Item = (&Uid, &RelationType)> {
        self.relations.iter()
    }

    /// All facts, in assertion order.
    pub fn facts(&self) -> impl Iterator<Item = &Fact> {
        self.facts.iter()
    }

    /// Concepts whose label equals `label`, in creation order.
    pub fn find_by_label(&self, label: &str) -> Hyperedges {
        self.concepts
            .iter()
            .filter(|(_, c)| c.label == label)
            .map(|(uid, _)| uid.clone())
            .collect()
    }

    pub fn direct_superclasses(&self, uid: &Uid) -> Hyperedges {
        self.concept_supers.get(uid).cloned().unwrap_or_default()
    }

    /// Direct subclasses, the one-step view of the *is-a* lattice.
    pub fn direct_subclasses(&self, uid: &Uid) -> Hyperedges {
        self.concept_subs.get(uid).cloned().unwrap_or_default()
    }

    pub fn direct_classes(&self, uid: &Uid) -> Hyperedges {
        self.instance_classes.get(uid).cloned().unwrap_or_default()
    }

    pub fn direct_instances(&self, uid: &Uid) -> Hyperedges {
        self.class_instances.get(uid).cloned().unwrap_or_default()
    }

    /// Direct parents of a relation type in the subrelation lattice.
    pub fn relation_parents(&self, uid: &Uid) -> Hyperedges {
        self.relation_supers.get(uid).cloned().unwrap_or_default()
    }

    /// Transitive subclasses of the given concepts, including the concepts
    /// themselves, optionally filtered by label.
    pub fn subclasses_of(&self, uids: &Hyperedges, name: &str) -> Hyperedges {
        let closure = closure_over(&self.concept_subs, uids, |uid| self.concepts.contains_key(uid));
        self.filter_by_label(closure, name)
    }

    /// Transitive superclasses of the given concepts, including the concepts
    /// themselves, optionally filtered by label.
    pub fn superclasses_of(&self, uids: &Hyperedges, name: &str) -> Hyperedges {
        let closure =
            closure_over(&self.concept_supers, uids, |uid| self.concepts.contains_key(uid));
        self.filter_by_label(closure, name)
    }

    /// Direct instances of the given classes, optionally filtered by label.
    ///
    /// Callers wanting "instances of R or anything below R" pass the
    /// subclass closure explicitly.
    pub fn instances_of(&self, class_uids: &Hyperedges, name: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for class in class_uids {
            result = result.unite(&self.direct_instances(class));
        }
        self.filter_by_label(result, name)
    }

    /// Direct classes of the given instances, optionally filtered by label.
    pub fn classes_of(&self, instance_uids: &Hyperedges, name: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for instance in instance_uids {
            result = result.unite(&self.direct_classes(instance));
        }
        self.filter_by_label(result, name)
    }

    /// Subsumption closure of the given relation types: the types themselves
    /// and every transitive subrelation.
    pub fn subrelations_of(&self, rel_uids: &Hyperedges) -> Hyperedges {
        closure_over(&self.relation_subs, rel_uids, |uid| self.relations.contains_key(uid))
    }

    /// Facts whose relation type is one of `rel_uids`, optionally restricted
    /// to facts touching the given source and/or target identifiers.
    ///
    /// Empty filter sets are wildcards. A fact matches a non-empty filter
    /// when any of its endpoints on that side is in the filter. No
    /// subsumption closure is applied here; callers close over
    /// [`subrelations_of`](Self::subrelations_of) first.
    pub fn facts_of(
        &self,
        rel_uids: &Hyperedges,
        sources: &Hyperedges,
        targets: &Hyperedges,
    ) -> Vec<&Fact> {
        let mut result = Vec::new();
        for rel in rel_uids {
            let Some(bucket) = self.facts_by_relation.get(rel) else {
                continue;
            };
            for &index in bucket {
                let fact = &self.facts[index];
                if !sources.is_empty() && fact.sources.intersect(sources).is_empty() {
                    continue;
                }
                if !targets.is_empty() && fact.targets.intersect(targets).is_empty() {
                    continue;
                }
                result.push(fact);
            }
        }
        result
    }

    /// The universal traversal every layer query is built on: follow facts
    /// of `relation` (closed under subsumption) from `uids` in the given
    /// direction, returning the opposite endpoints filtered by label.
    pub fn related(
        &self,
        uids: &Hyperedges,
        relation: &Uid,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        if uids.is_empty() {
            return Hyperedges::new();
        }
        let family = self.subrelations_of(&Hyperedges::one(relation.clone()));
        let mut result = Hyperedges::new();
        if matches!(direction, Direction::Inverse | Direction::Both) {
            for fact in self.facts_of(&family, &Hyperedges::new(), uids) {
                result = result.unite(&fact.sources);
            }
        }
        if matches!(direction, Direction::Forward | Direction::Both) {
            for fact in self.facts_of(&family, uids, &Hyperedges::new()) {
                result = result.unite(&fact.targets);
            }
        }
        self.filter_by_label(result, name)
    }

    /// Transitive forward closure over facts of `relation`, excluding the
    /// seed identifiers. Used to collect the owned substructure below a
    /// component class.
    pub fn descendants_of(&self, uids: &Hyperedges, relation: &Uid) -> Hyperedges {
        let mut seen = uids.clone();
        let mut frontier = uids.clone();
        let mut result = Hyperedges::new();
        while !frontier.is_empty() {
            let next = self
                .related(&frontier, relation, "", Direction::Forward)
                .subtract(&seen);
            seen = seen.unite(&next);
            result = result.unite(&next);
            frontier = next;
        }
        result
    }

    fn filter_by_label(&self, uids: Hyperedges, name: &str) -> Hyperedges {
        if name.is_empty() {
            return uids;
        }
        uids.iter()
            .filter(|uid| self.label_of(uid) == Some(name))
            .cloned()
            .collect()
    }
}

/// Breadth-first closure over an adjacency map, including the seeds.
fn closure_over<F>(
    adjacency: &FxHashMap<Uid, Hyperedges>,
    seeds: &Hyperedges,
    known: F,
) -> Hyperedges
where
    F: Fn(&Uid) -> bool,
{
    let mut result: Hyperedges = seeds.iter().filter(|uid| known(uid)).cloned().collect();
    let mut frontier = result.clone();
    while !frontier.is_empty() {
        let mut next = Hyperedges::new();
        for uid in &frontier {
            if let Some(step) = adjacency.get(uid) {
                next = next.unite(&step.subtract(&result));
            }
        }
        result = result.unite(&next);
        frontier = next;
    }
    result
}
