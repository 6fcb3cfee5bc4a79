//! Component-network vocabulary: root concepts, relation types, factories.

use crate::base::{Hyperedges, Uid};
use crate::kb::{CoreVocabulary, KnowledgeBase};

/// Identifiers of the component layer's root concepts and relation types.
///
/// Installed idempotently; the software and hardware layers embed this
/// vocabulary and refine it with their own roots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentVocabulary {
    pub core: CoreVocabulary,
    pub component: Uid,
    pub interface: Uid,
    pub value: Uid,
    pub has_interface: Uid,
    pub has_sub_interface: Uid,
    pub has_value: Uid,
    pub connected_to: Uid,
    pub part_of_component: Uid,
    pub alias_of: Uid,
}

impl ComponentVocabulary {
    pub const COMPONENT: &'static str = "component.component";
    pub const INTERFACE: &'static str = "component.interface";
    pub const VALUE: &'static str = "component.value";
    pub const HAS_INTERFACE: &'static str = "component.relation.has-a-interface";
    pub const HAS_SUB_INTERFACE: &'static str = "component.relation.has-a-sub-interface";
    pub const HAS_VALUE: &'static str = "component.relation.has-a-value";
    pub const CONNECTED_TO: &'static str = "component.relation.connected-to-interface";
    pub const PART_OF_COMPONENT: &'static str = "component.relation.part-of-component";
    pub const ALIAS_OF: &'static str = "component.relation.alias-of";

    /// Ensure the component layer's concepts and relation types exist.
    /// Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let core = CoreVocabulary::install(kb);
        let component = Uid::new(Self::COMPONENT);
        let interface = Uid::new(Self::INTERFACE);
        let value = Uid::new(Self::VALUE);
        kb.create_concept(component.clone(), "COMPONENT");
        kb.create_concept(interface.clone(), "INTERFACE");
        kb.create_concept(value.clone(), "VALUE");

        let has_interface = Uid::new(Self::HAS_INTERFACE);
        let has_sub_interface = Uid::new(Self::HAS_SUB_INTERFACE);
        let has_value = Uid::new(Self::HAS_VALUE);
        let connected_to = Uid::new(Self::CONNECTED_TO);
        let part_of_component = Uid::new(Self::PART_OF_COMPONENT);
        let alias_of = Uid::new(Self::ALIAS_OF);
        kb.create_subrelation(
            has_interface.clone(),
            "HAS-A-INTERFACE",
            Hyperedges::one(component.clone()),
            Hyperedges::one(interface.clone()),
            &core.has_a,
        );
        kb.create_subrelation(
            has_sub_interface.clone(),
            "HAS-A-SUB-INTERFACE",
            Hyperedges::one(interface.clone()),
            Hyperedges::one(interface.clone()),
            &core.has_a,
        );
        kb.create_subrelation(
            has_value.clone(),
            "HAS-A-VALUE",
            Hyperedges::one(interface.clone()),
            Hyperedges::one(value.clone()),
            &core.has_a,
        );
        kb.create_subrelation(
            connected_to.clone(),
            "CONNECTED-TO-INTERFACE",
            Hyperedges::one(interface.clone()),
            Hyperedges::one(interface.clone()),
            &core.connects,
        );
        kb.create_subrelation(
            part_of_component.clone(),
            "PART-OF-COMPONENT",
            Hyperedges::one(component.clone()),
            Hyperedges::one(component.clone()),
            &core.part_of,
        );
        kb.create_relation(
            alias_of.clone(),
            "ALIAS-OF",
            Hyperedges::one(interface.clone()),
            Hyperedges::one(interface.clone()),
        );

        Self {
            core,
            component,
            interface,
            value,
            has_interface,
            has_sub_interface,
            has_value,
            connected_to,
            part_of_component,
            alias_of,
        }
    }

    /// Create a component class. `supers` must all be component classes; a
    /// stray identifier rejects the whole creation.
    pub fn create_component(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.create_typed(kb, uid, label, supers, &self.component)
    }

    /// Create an interface class below the interface root.
    pub fn create_interface(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.create_typed(kb, uid, label, supers, &self.interface)
    }

    /// Create a value class below the value root.
    pub fn create_value(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.create_typed(kb, uid, label, supers, &self.value)
    }

    /// Shared typed-factory logic: the new class is placed below `root` and
    /// below the given supers, which must already be below `root`.
    pub(crate) fn create_typed(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
        root: &Uid,
    ) -> Hyperedges {
        let valid = kb.subclasses_of(&Hyperedges::one(root.clone()), "");
        if !supers.is_subset_of(&valid) {
            return Hyperedges::new();
        }
        let created = kb.create_concept(uid, label);
        kb.assert_is_a(&created, &Hyperedges::one(root.clone()).unite(supers));
        created
    }

    /// All component classes, optionally filtered by label.
    pub fn component_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.component.clone()), name)
    }

    /// All interface classes, optionally filtered by label.
    pub fn interface_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.interface.clone()), name)
    }

    /// All value classes, optionally filtered by label.
    pub fn value_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.value.clone()), name)
    }

    /// All component instances, optionally filtered by label.
    pub fn components(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.component_classes(kb, ""), name)
    }

    /// All interface instances, optionally filtered by label.
    pub fn interfaces(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.interface_classes(kb, ""), name)
    }

    /// All value instances, optionally filtered by label.
    pub fn values(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.value_classes(kb, ""), name)
    }
}
