//! Resource-cost vocabulary: typed quantities and satisfiability.

use crate::base::{Hyperedges, Uid};
use crate::kb::{CoreVocabulary, Direction, KnowledgeBase, ModelError};
use tracing::trace;

/// Identifiers of the resource layer's root concepts and relation types.
///
/// *consumes-resource* is a subrelation of *needs-resource*: a consumed
/// resource is always a needed one, but a need may be purely existential and
/// deplete nothing. *mapped-to* records assignments; the software-hardware
/// mapper refines it further.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceVocabulary {
    pub core: CoreVocabulary,
    pub consumer: Uid,
    pub provider: Uid,
    pub resource: Uid,
    pub needs: Uid,
    pub consumes: Uid,
    pub provides: Uid,
    pub mapped_to: Uid,
}

impl ResourceVocabulary {
    pub const CONSUMER: &'static str = "resource.consumer";
    pub const PROVIDER: &'static str = "resource.provider";
    pub const RESOURCE: &'static str = "resource.resource";
    pub const NEEDS: &'static str = "resource.relation.needs-resource";
    pub const CONSUMES: &'static str = "resource.relation.consumes-resource";
    pub const PROVIDES: &'static str = "resource.relation.provides-resource";
    pub const MAPPED_TO: &'static str = "resource.relation.mapped-to";

    /// Ensure the resource layer's concepts and relation types exist.
    /// Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let core = CoreVocabulary::install(kb);
        let consumer = Uid::new(Self::CONSUMER);
        let provider = Uid::new(Self::PROVIDER);
        let resource = Uid::new(Self::RESOURCE);
        kb.create_concept(consumer.clone(), "CONSUMER");
        kb.create_concept(provider.clone(), "PROVIDER");
        kb.create_concept(resource.clone(), "RESOURCE");

        let needs = Uid::new(Self::NEEDS);
        let consumes = Uid::new(Self::CONSUMES);
        let provides = Uid::new(Self::PROVIDES);
        let mapped_to = Uid::new(Self::MAPPED_TO);
        kb.create_relation(
            needs.clone(),
            "NEEDS-RESOURCE",
            Hyperedges::one(consumer.clone()),
            Hyperedges::one(resource.clone()),
        );
        kb.create_subrelation(
            consumes.clone(),
            "CONSUMES-RESOURCE",
            Hyperedges::one(consumer.clone()),
            Hyperedges::one(resource.clone()),
            &needs,
        );
        kb.create_subrelation(
            provides.clone(),
            "PROVIDES-RESOURCE",
            Hyperedges::one(provider.clone()),
            Hyperedges::one(resource.clone()),
            &core.has_a,
        );
        kb.create_subrelation(
            mapped_to.clone(),
            "MAPPED-TO",
            Hyperedges::one(consumer.clone()),
            Hyperedges::one(provider.clone()),
            &core.part_of,
        );

        Self {
            core,
            consumer,
            provider,
            resource,
            needs,
            consumes,
            provides,
            mapped_to,
        }
    }

    /// Create a resource class. `supers` must all be resource classes.
    pub fn define_resource(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        let valid = kb.subclasses_of(&Hyperedges::one(self.resource.clone()), "");
        if !supers.is_subset_of(&valid) {
            return Hyperedges::new();
        }
        let created = kb.create_concept(uid, label);
        kb.assert_is_a(&created, &Hyperedges::one(self.resource.clone()).unite(supers));
        created
    }

    /// Instantiate a resource of the given classes with a quantity.
    ///
    /// The quantity is stored typed and mirrored into the instance label as
    /// its printable form.
    pub fn instantiate_resource(
        &self,
        kb: &mut KnowledgeBase,
        class_uids: &Hyperedges,
        amount: f64,
    ) -> Hyperedges {
        let classes = class_uids.intersect(&self.resource_classes(kb, ""));
        let instance = kb.instantiate_from(&classes, &format!("{amount}"));
        if let Some(uid) = instance.first() {
            kb.set_quantity(&uid.clone(), amount);
        }
        instance
    }

    /// Instantiate a resource for each provider and link it via
    /// *provides-resource*.
    pub fn instantiate_resource_for(
        &self,
        kb: &mut KnowledgeBase,
        providers: &Hyperedges,
        class_uids: &Hyperedges,
        amount: f64,
    ) -> Hyperedges {
        let mut result = Hyperedges::new();
        for provider in providers {
            let instance = self.instantiate_resource(kb, class_uids, amount);
            self.provides(kb, &Hyperedges::one(provider.clone()), &instance);
            result = result.unite(&instance);
        }
        result
    }

    /// Make the given classes consumers (by *is-a*). Their instances then
    /// show up in [`consumers`](Self::consumers).
    pub fn is_consumer(&self, kb: &mut KnowledgeBase, uids: &Hyperedges) -> Hyperedges {
        kb.assert_is_a(uids, &Hyperedges::one(self.consumer.clone()))
    }

    /// Make the given classes providers (by *is-a*).
    pub fn is_provider(&self, kb: &mut KnowledgeBase, uids: &Hyperedges) -> Hyperedges {
        kb.assert_is_a(uids, &Hyperedges::one(self.provider.clone()))
    }

    pub fn consumer_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.consumer.clone()), name)
    }

    pub fn provider_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.provider.clone()), name)
    }

    pub fn resource_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.resource.clone()), name)
    }

    /// All consumer instances, optionally filtered by label.
    pub fn consumers(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.consumer_classes(kb, ""), name)
    }

    /// All provider instances, optionally filtered by label.
    pub fn providers(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.provider_classes(kb, ""), name)
    }

    /// Declare existential demands: each consumer needs each resource
    /// instance.
    pub fn needs(
        &self,
        kb: &mut KnowledgeBase,
        consumers: &Hyperedges,
        resources: &Hyperedges,
    ) -> Hyperedges {
        let from = consumers.intersect(
            &self
                .consumer_classes(kb, "")
                .unite(&self.consumers(kb, "")),
        );
        let to = resources.intersect(&self.resource_instances(kb));
        self.assert_pairwise(kb, &from, &to, &self.needs)
    }

    /// Declare depleting demands. A consumed resource counts against the
    /// chosen provider's supply; stated only for genuinely consumable
    /// resources.
    pub fn consumes(
        &self,
        kb: &mut KnowledgeBase,
        consumers: &Hyperedges,
        resources: &Hyperedges,
    ) -> Hyperedges {
        let from = consumers.intersect(
            &self
                .consumer_classes(kb, "")
                .unite(&self.consumers(kb, "")),
        );
        let to = resources.intersect(&self.resource_instances(kb));
        self.assert_pairwise(kb, &from, &to, &self.consumes)
    }

    /// Declare supply: each provider provides each resource instance.
    pub fn provides(
        &self,
        kb: &mut KnowledgeBase,
        providers: &Hyperedges,
        resources: &Hyperedges,
    ) -> Hyperedges {
        let from = providers.intersect(
            &self
                .provider_classes(kb, "")
                .unite(&self.providers(kb, "")),
        );
        let to = resources.intersect(&self.resource_instances(kb));
        self.assert_pairwise(kb, &from, &to, &self.provides)
    }

    /// Resources the given consumers need or consume, optionally restricted
    /// to instances of the given resource classes.
    pub fn demands_of(
        &self,
        kb: &KnowledgeBase,
        consumers: &Hyperedges,
        resource_classes: &Hyperedges,
    ) -> Hyperedges {
        let candidates = kb.related(consumers, &self.needs, "", Direction::Forward);
        self.restrict_to_classes(kb, candidates, resource_classes)
    }

    /// Resources the given providers supply, optionally restricted to
    /// instances of the given resource classes.
    pub fn resources_of(
        &self,
        kb: &KnowledgeBase,
        providers: &Hyperedges,
        resource_classes: &Hyperedges,
    ) -> Hyperedges {
        let candidates = kb.related(providers, &self.provides, "", Direction::Forward);
        self.restrict_to_classes(kb, candidates, resource_classes)
    }

    /// Consumers currently mapped to the given providers.
    pub fn consumers_of(&self, kb: &KnowledgeBase, providers: &Hyperedges) -> Hyperedges {
        kb.related(providers, &self.mapped_to, "", Direction::Inverse)
    }

    /// Providers the given consumers are mapped to.
    pub fn providers_of(&self, kb: &KnowledgeBase, consumers: &Hyperedges) -> Hyperedges {
        kb.related(consumers, &self.mapped_to, "", Direction::Forward)
    }

    /// The quantity carried by a resource instance.
    ///
    /// The typed field wins; a deserialized instance falls back to parsing
    /// its label. An unparseable label is a fatal model inconsistency.
    pub fn amount_of(&self, kb: &KnowledgeBase, uid: &Uid) -> Result<f64, ModelError> {
        let concept = kb.concept(uid).ok_or_else(|| ModelError::MalformedQuantity {
            uid: uid.clone(),
            label: String::new(),
        })?;
        if let Some(amount) = concept.quantity {
            return Ok(amount);
        }
        concept
            .label
            .parse::<f64>()
            .map_err(|_| ModelError::MalformedQuantity {
                uid: uid.clone(),
                label: concept.label.to_string(),
            })
    }

    /// Score how well `provider` can serve the still-unmapped `consumer`.
    ///
    /// For every type-compatible pair of a provided resource (quantity A,
    /// already-used U) and a needed resource (quantity N), the slack ratio
    /// is (A - U - N) / A; U sums the *consumes* facts of consumers already
    /// mapped to the provider. Any negative ratio, or a demand with no
    /// type-compatible supply, makes the pair infeasible (negative
    /// infinity). Otherwise the minimum ratio is returned: a value in
    /// [0, 1], higher meaning more headroom.
    pub fn satisfies(
        &self,
        kb: &KnowledgeBase,
        provider: &Uid,
        consumer: &Uid,
    ) -> Result<f64, ModelError> {
        let provider_set = Hyperedges::one(provider.clone());
        let mapped = self.consumers_of(kb, &provider_set);
        let available = self.resources_of(kb, &provider_set, &Hyperedges::new());
        // Resources depleted by the consumers already on this provider.
        let consumed = if mapped.is_empty() {
            Hyperedges::new()
        } else {
            kb.related(&mapped, &self.consumes, "", Direction::Forward)
        };
        let needed = self.demands_of(
            kb,
            &Hyperedges::one(consumer.clone()),
            &Hyperedges::new(),
        );

        let mut minimum = 1.0_f64;
        let mut matched = 0_usize;
        for available_uid in &available {
            let supply = self.amount_of(kb, available_uid)?;
            let supply_classes = kb.classes_of(&Hyperedges::one(available_uid.clone()), "");
            let used = self.used_amount(kb, &supply_classes, &consumed)?;
            for needed_uid in &needed {
                let needed_classes = kb.classes_of(&Hyperedges::one(needed_uid.clone()), "");
                if supply_classes.intersect(&needed_classes).is_empty() {
                    continue;
                }
                matched += 1;
                let demand = self.amount_of(kb, needed_uid)?;
                let cost = (supply - used - demand) / supply;
                if cost.is_nan() || cost < 0.0 {
                    trace!(
                        "[SAT] {provider} cannot serve {consumer}: \
                         available {supply}, used {used}, needed {demand}"
                    );
                    return Ok(f64::NEG_INFINITY);
                }
                minimum = minimum.min(cost);
            }
        }
        // Every demand must have found a typed supply.
        if matched < needed.len() {
            trace!(
                "[SAT] {provider} cannot serve {consumer}: \
                 {matched} of {} demands matched by type",
                needed.len()
            );
            return Ok(f64::NEG_INFINITY);
        }
        Ok(minimum)
    }

    /// Re-check the capacity invariant on a provider after a mapping
    /// mutation: per provided resource, the type-compatible *consumes* of
    /// its mapped consumers must not exceed the supply.
    pub fn verify_capacity(&self, kb: &KnowledgeBase, provider: &Uid) -> Result<(), ModelError> {
        let provider_set = Hyperedges::one(provider.clone());
        let mapped = self.consumers_of(kb, &provider_set);
        if mapped.is_empty() {
            return Ok(());
        }
        let consumed = kb.related(&mapped, &self.consumes, "", Direction::Forward);
        for available_uid in &self.resources_of(kb, &provider_set, &Hyperedges::new()) {
            let supply = self.amount_of(kb, available_uid)?;
            let supply_classes = kb.classes_of(&Hyperedges::one(available_uid.clone()), "");
            let used = self.used_amount(kb, &supply_classes, &consumed)?;
            if used > supply {
                return Err(ModelError::CapacityExceeded {
                    provider: provider.clone(),
                    resource: available_uid.clone(),
                    consumed: used,
                    supplied: supply,
                });
            }
        }
        Ok(())
    }

    /// Sum the quantities of the consumed resources type-compatible with a
    /// supply of the given classes.
    pub(crate) fn used_amount(
        &self,
        kb: &KnowledgeBase,
        supply_classes: &Hyperedges,
        consumed: &Hyperedges,
    ) -> Result<f64, ModelError> {
        let mut used = 0.0_f64;
        for consumed_uid in consumed {
            let consumed_classes = kb.classes_of(&Hyperedges::one(consumed_uid.clone()), "");
            if !supply_classes.intersect(&consumed_classes).is_empty() {
                used += self.amount_of(kb, consumed_uid)?;
            }
        }
        Ok(used)
    }

    /// All resource instances.
    fn resource_instances(&self, kb: &KnowledgeBase) -> Hyperedges {
        kb.instances_of(&self.resource_classes(kb, ""), "")
    }

    fn restrict_to_classes(
        &self,
        kb: &KnowledgeBase,
        candidates: Hyperedges,
        resource_classes: &Hyperedges,
    ) -> Hyperedges {
        let classes = if resource_classes.is_empty() {
            self.resource_classes(kb, "")
        } else {
            kb.subclasses_of(resource_classes, "")
        };
        candidates.intersect(&kb.instances_of(&classes, ""))
    }

    fn assert_pairwise(
        &self,
        kb: &mut KnowledgeBase,
        from: &Hyperedges,
        to: &Hyperedges,
        relation: &Uid,
    ) -> Hyperedges {
        let mut result = Hyperedges::new();
        for source in from {
            for target in to {
                result = result.unite(&kb.assert_fact(
                    &Hyperedges::one(source.clone()),
                    &Hyperedges::one(target.clone()),
                    relation,
                ));
            }
        }
        result
    }
}
