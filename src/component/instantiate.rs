//! Component instantiation: deep cloning of owned substructure.

use crate::base::Hyperedges;
use crate::component::ComponentVocabulary;
use crate::kb::KnowledgeBase;
use tracing::debug;

impl ComponentVocabulary {
    /// Instantiate a component class as a deep clone.
    ///
    /// For every ancestor class of `class_uids`, the whole substructure
    /// reachable over the *has-a* relation family (interfaces, their
    /// sub-interfaces, their values) is cloned: each descendant gets a fresh
    /// instance, facts between the ancestor and a descendant are replayed
    /// between the new root instance and the corresponding clone, and facts
    /// among descendants are replayed among the clones. Relations outside
    /// the *has-a* family (connections, aliases) are not cloned.
    ///
    /// The result is structurally isomorphic to the class. Returns the new
    /// root instance, or the empty set when `class_uids` names no concept.
    pub fn instantiate_component(
        &self,
        kb: &mut KnowledgeBase,
        class_uids: &Hyperedges,
        name: &str,
    ) -> Hyperedges {
        let ancestors = kb.superclasses_of(class_uids, "");
        let instance = kb.instantiate_from(class_uids, name);
        if instance.is_empty() {
            return instance;
        }
        let has_a_family = kb.subrelations_of(&Hyperedges::one(self.core.has_a.clone()));
        for ancestor in &ancestors {
            let descendants =
                kb.descendants_of(&Hyperedges::one(ancestor.clone()), &self.core.has_a);
            debug!(
                "[COMPONENT] instantiating {ancestor}: cloning {} owned descendants",
                descendants.len()
            );
            // Clone every descendant, replaying the ancestor-to-descendant
            // ownership facts onto the new root.
            let mut clones = Vec::with_capacity(descendants.len());
            for descendant in &descendants {
                let clone = kb.instantiate_another(&Hyperedges::one(descendant.clone()), "");
                kb.replay_facts(ancestor, descendant, &instance, &clone, &has_a_family);
                clones.push((descendant.clone(), clone));
            }
            // Replay ownership facts among the descendants themselves, via
            // the clone mapping.
            for (source, source_clone) in &clones {
                for (target, target_clone) in &clones {
                    kb.replay_facts(source, target, source_clone, target_clone, &has_a_family);
                }
            }
        }
        instance
    }

    /// Create a fresh interface instance of the given classes for each
    /// owner, linking it via *has-a-interface*.
    pub fn instantiate_interface_for(
        &self,
        kb: &mut KnowledgeBase,
        owners: &Hyperedges,
        interface_class_uids: &Hyperedges,
        name: &str,
    ) -> Hyperedges {
        let classes = interface_class_uids.intersect(&self.interface_classes(kb, ""));
        let mut result = Hyperedges::new();
        for owner in owners {
            let fresh = kb.instantiate_from(&classes, name);
            self.has_interface(kb, &Hyperedges::one(owner.clone()), &fresh);
            result = result.unite(&fresh);
        }
        result
    }

    /// Create a value instance for each interface. The value's label is its
    /// serialised content.
    pub fn instantiate_value_for(
        &self,
        kb: &mut KnowledgeBase,
        interfaces: &Hyperedges,
        value_class_uids: &Hyperedges,
        value: &str,
    ) -> Hyperedges {
        let classes = value_class_uids.intersect(&self.value_classes(kb, ""));
        let mut result = Hyperedges::new();
        for interface in interfaces {
            let fresh = kb.instantiate_from(&classes, value);
            self.has_value(kb, &Hyperedges::one(interface.clone()), &fresh);
            result = result.unite(&fresh);
        }
        result
    }

    /// Re-export existing interfaces on each parent: a like-for-like clone
    /// of every given interface is attached to the parent and linked back to
    /// its original via *alias-of*.
    pub fn instantiate_alias_interface_for(
        &self,
        kb: &mut KnowledgeBase,
        parents: &Hyperedges,
        interfaces: &Hyperedges,
        label: &str,
    ) -> Hyperedges {
        let mut result = Hyperedges::new();
        for parent in parents {
            let fresh = kb.instantiate_another(interfaces, label);
            self.has_interface(kb, &Hyperedges::one(parent.clone()), &fresh);
            self.alias_of(kb, &fresh, interfaces);
            result = result.unite(&fresh);
        }
        result
    }
}
