//! Hardware-network vocabulary: devices, processors, hardware interfaces.

use crate::base::{Hyperedges, Uid};
use crate::component::ComponentVocabulary;
use crate::kb::KnowledgeBase;

/// Identifiers of the hardware layer's root concepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HardwareVocabulary {
    pub base: ComponentVocabulary,
    pub device: Uid,
    pub processor: Uid,
    pub interface: Uid,
}

impl HardwareVocabulary {
    pub const DEVICE: &'static str = "hardware.device";
    pub const PROCESSOR: &'static str = "hardware.processor";
    pub const INTERFACE: &'static str = "hardware.interface";

    /// Ensure the hardware layer's concepts exist on top of the component
    /// vocabulary. Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let base = ComponentVocabulary::install(kb);
        let device = Uid::new(Self::DEVICE);
        let processor = Uid::new(Self::PROCESSOR);
        let interface = Uid::new(Self::INTERFACE);
        base.create_component(kb, device.clone(), "DEVICE", &Hyperedges::new());
        base.create_component(kb, processor.clone(), "PROCESSOR", &Hyperedges::one(device.clone()));
        base.create_interface(kb, interface.clone(), "INTERFACE", &Hyperedges::new());
        Self {
            base,
            device,
            processor,
            interface,
        }
    }

    /// Create a device class.
    pub fn create_device(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.device)
    }

    /// Create a processor class.
    pub fn create_processor(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.processor)
    }

    /// Create a hardware interface class.
    pub fn create_interface(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.interface)
    }

    pub fn device_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.device.clone()), name)
    }

    pub fn processor_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.processor.clone()), name)
    }

    pub fn interface_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.interface.clone()), name)
    }

    /// All device instances (processors included), optionally filtered by
    /// label.
    pub fn devices(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.device_classes(kb, ""), name)
    }

    /// All processor instances, optionally filtered by label.
    pub fn processors(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.processor_classes(kb, ""), name)
    }

    /// Hardware interface instances, restricted to the given devices when
    /// the set is non-empty.
    pub fn interfaces(&self, kb: &KnowledgeBase, devices: &Hyperedges, name: &str) -> Hyperedges {
        let result = kb.instances_of(&self.interface_classes(kb, ""), name);
        if devices.is_empty() {
            result
        } else {
            result.intersect(&self.base.interfaces_of(
                kb,
                devices,
                name,
                crate::kb::Direction::Forward,
            ))
        }
    }
}
