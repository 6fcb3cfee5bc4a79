//! Knowledge-base storage and mutation.

use crate::base::{Hyperedges, Uid};
use crate::kb::entity::{Concept, Fact, RelationType};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::trace;

/// The knowledge base: a single value holding concepts, relation types,
/// facts and the specialization lattices connecting them.
///
/// Concepts and relation types live in insertion-ordered maps and facts in
/// an append-only list, so every query that walks them is deterministic
/// given the same construction sequence. Cloning a knowledge base is a deep
/// copy; candidate-network enumeration and mapping runs rely on that.
#[derive(Clone, Debug, Default)]
pub struct KnowledgeBase {
    pub(super) concepts: IndexMap<Uid, Concept>,
    pub(super) relations: IndexMap<Uid, RelationType>,
    pub(super) facts: Vec<Fact>,
    /// Index into `facts` per relation type, in assertion order.
    pub(super) facts_by_relation: FxHashMap<Uid, Vec<usize>>,
    // is-a lattice over concepts, both directions
    pub(super) concept_supers: FxHashMap<Uid, Hyperedges>,
    pub(super) concept_subs: FxHashMap<Uid, Hyperedges>,
    // instance-of, both directions
    pub(super) instance_classes: FxHashMap<Uid, Hyperedges>,
    pub(super) class_instances: FxHashMap<Uid, Hyperedges>,
    // is-a lattice over relation types (subrelations), both directions
    pub(super) relation_supers: FxHashMap<Uid, Hyperedges>,
    pub(super) relation_subs: FxHashMap<Uid, Hyperedges>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a concept, or return the existing one unchanged.
    ///
    /// Vocabulary installation runs this repeatedly with the same fixed
    /// identifiers, so creation must be idempotent and must not clobber an
    /// existing label.
    pub fn create_concept(&mut self, uid: Uid, label: &str) -> Hyperedges {
        self.concepts
            .entry(uid.clone())
            .or_insert_with(|| Concept::new(label));
        Hyperedges::one(uid)
    }

    /// Create a relation type, or return the existing one unchanged.
    pub fn create_relation(
        &mut self,
        uid: Uid,
        label: &str,
        domain: Hyperedges,
        codomain: Hyperedges,
    ) -> Hyperedges {
        self.relations.entry(uid.clone()).or_insert_with(|| RelationType {
            label: label.into(),
            domain,
            codomain,
        });
        Hyperedges::one(uid)
    }

    /// Create a relation type subsumed by `parent`.
    ///
    /// Every fact of the new relation is also a fact of `parent` (and of its
    /// ancestors) for query purposes. Returns the empty set when the parent
    /// relation does not exist.
    pub fn create_subrelation(
        &mut self,
        uid: Uid,
        label: &str,
        domain: Hyperedges,
        codomain: Hyperedges,
        parent: &Uid,
    ) -> Hyperedges {
        if !self.relations.contains_key(parent) {
            return Hyperedges::new();
        }
        let created = self.create_relation(uid.clone(), label, domain, codomain);
        self.assert_subrelation(&uid, parent);
        created
    }

    /// Record `child` as a subrelation of `parent`. Both must exist.
    pub fn assert_subrelation(&mut self, child: &Uid, parent: &Uid) -> bool {
        if child == parent
            || !self.relations.contains_key(child)
            || !self.relations.contains_key(parent)
        {
            return false;
        }
        self.relation_supers
            .entry(child.clone())
            .or_default()
            .insert(parent.clone());
        self.relation_subs
            .entry(parent.clone())
            .or_default()
            .insert(child.clone())
    }

    /// Record each child concept as a subclass of each parent concept.
    ///
    /// Identifiers that do not name a concept are skipped. Returns the
    /// children actually linked; callers detect rejection via emptiness.
    pub fn assert_is_a(&mut self, children: &Hyperedges, parents: &Hyperedges) -> Hyperedges {
        let mut linked = Hyperedges::new();
        for child in children {
            if !self.concepts.contains_key(child) {
                continue;
            }
            for parent in parents {
                if child == parent || !self.concepts.contains_key(parent) {
                    continue;
                }
                self.concept_supers
                    .entry(child.clone())
                    .or_default()
                    .insert(parent.clone());
                self.concept_subs
                    .entry(parent.clone())
                    .or_default()
                    .insert(child.clone());
                linked.insert(child.clone());
            }
        }
        linked
    }

    /// Record each instance as an instance of each class.
    pub fn assert_instance_of(
        &mut self,
        instances: &Hyperedges,
        classes: &Hyperedges,
    ) -> Hyperedges {
        let mut linked = Hyperedges::new();
        for instance in instances {
            if !self.concepts.contains_key(instance) {
                continue;
            }
            for class in classes {
                if instance == class || !self.concepts.contains_key(class) {
                    continue;
                }
                self.instance_classes
                    .entry(instance.clone())
                    .or_default()
                    .insert(class.clone());
                self.class_instances
                    .entry(class.clone())
                    .or_default()
                    .insert(instance.clone());
                linked.insert(instance.clone());
            }
        }
        linked
    }

    /// Create one fresh instance of the given classes.
    ///
    /// With an empty label the first class's label is reused. Returns the
    /// empty set when no class identifier names a concept.
    pub fn instantiate_from(&mut self, class_uids: &Hyperedges, label: &str) -> Hyperedges {
        let known: Hyperedges = class_uids
            .iter()
            .filter(|uid| self.concepts.contains_key(*uid))
            .cloned()
            .collect();
        if known.is_empty() {
            return Hyperedges::new();
        }
        let label = if label.is_empty() {
            known
                .first()
                .and_then(|uid| self.concepts.get(uid))
                .map(|c| c.label.to_string())
                .unwrap_or_default()
        } else {
            label.to_string()
        };
        let instance = Uid::generate();
        self.concepts.insert(instance.clone(), Concept::new(label));
        let instance_set = Hyperedges::one(instance);
        self.assert_instance_of(&instance_set, &known);
        instance_set
    }

    /// For each given instance, create another instance of the same classes.
    ///
    /// The clone reuses the original's label unless one is given, and copies
    /// its typed quantity. Used by deep-clone instantiation and by alias
    /// interface creation.
    pub fn instantiate_another(&mut self, uids: &Hyperedges, label: &str) -> Hyperedges {
        let mut result = Hyperedges::new();
        for uid in uids {
            let classes = self.direct_classes(uid);
            let own_label = if label.is_empty() {
                self.concepts
                    .get(uid)
                    .map(|c| c.label.to_string())
                    .unwrap_or_default()
            } else {
                label.to_string()
            };
            let quantity = self.concepts.get(uid).and_then(|c| c.quantity);
            let fresh = self.instantiate_from(&classes, &own_label);
            if let (Some(amount), Some(new_uid)) = (quantity, fresh.first()) {
                if let Some(concept) = self.concepts.get_mut(new_uid) {
                    concept.quantity = Some(amount);
                }
            }
            result = result.unite(&fresh);
        }
        result
    }

    /// Assert a fact of `relation` between `sources` and `targets`.
    ///
    /// The fact is recorded only when both endpoint sets are non-empty and
    /// every endpoint fits the relation's declared domain/codomain (an
    /// entity fits a declared concept when it is that concept, a transitive
    /// subclass of it, or an instance of such a subclass). A fact that
    /// violates the schema is silently dropped: the returned set is empty
    /// and the store is untouched. Re-asserting an existing fact is a
    /// successful no-op.
    pub fn assert_fact(
        &mut self,
        sources: &Hyperedges,
        targets: &Hyperedges,
        relation: &Uid,
    ) -> Hyperedges {
        let Some(schema) = self.relations.get(relation) else {
            trace!("[KB] fact rejected: unknown relation {relation}");
            return Hyperedges::new();
        };
        if sources.is_empty() || targets.is_empty() {
            return Hyperedges::new();
        }
        let domain = schema.domain.clone();
        let codomain = schema.codomain.clone();
        if !self.endpoints_fit(sources, &domain) || !self.endpoints_fit(targets, &codomain) {
            trace!(
                "[KB] fact rejected: endpoints do not fit schema of {relation} ({} -> {})",
                sources.len(),
                targets.len()
            );
            return Hyperedges::new();
        }
        let fact = Fact {
            relation: relation.clone(),
            sources: sources.clone(),
            targets: targets.clone(),
        };
        let bucket = self.facts_by_relation.entry(relation.clone()).or_default();
        if !bucket.iter().any(|&i| self.facts[i] == fact) {
            bucket.push(self.facts.len());
            self.facts.push(fact);
        }
        targets.clone()
    }

    /// Replay every fact of the `family` relation types holding between
    /// `old_source` and `old_target` so that it now holds between
    /// `new_sources` and `new_targets`.
    ///
    /// This is the clone-mapping step of deep instantiation: the relation
    /// type of each replayed fact is preserved.
    pub fn replay_facts(
        &mut self,
        old_source: &Uid,
        old_target: &Uid,
        new_sources: &Hyperedges,
        new_targets: &Hyperedges,
        family: &Hyperedges,
    ) -> Hyperedges {
        let mut relations_to_replay: Vec<Uid> = Vec::new();
        for rel in family {
            let Some(bucket) = self.facts_by_relation.get(rel) else {
                continue;
            };
            for &index in bucket {
                let fact = &self.facts[index];
                if fact.sources.contains(old_source) && fact.targets.contains(old_target) {
                    relations_to_replay.push(fact.relation.clone());
                }
            }
        }
        let mut result = Hyperedges::new();
        for rel in relations_to_replay {
            result = result.unite(&self.assert_fact(new_sources, new_targets, &rel));
        }
        result
    }

    /// Set the typed quantity of a concept and sync its printable label.
    pub fn set_quantity(&mut self, uid: &Uid, amount: f64) {
        if let Some(concept) = self.concepts.get_mut(uid) {
            concept.quantity = Some(amount);
            concept.label = format!("{amount}").into();
        }
    }

    /// True when every endpoint fits the declared concept set.
    ///
    /// An empty declaration is unconstrained (the core relations use that);
    /// otherwise each endpoint must be one of the declared concepts, a
    /// transitive subclass, or an instance of such a subclass.
    fn endpoints_fit(&self, endpoints: &Hyperedges, declared: &Hyperedges) -> bool {
        if declared.is_empty() {
            return endpoints.iter().all(|uid| self.concepts.contains_key(uid.as_str()));
        }
        let allowed = self.subclasses_of(declared, "");
        endpoints.iter().all(|uid| {
            self.concepts.contains_key(uid.as_str())
                && (allowed.contains(uid)
                    || !self.direct_classes(uid).intersect(&allowed).is_empty())
        })
    }
}
