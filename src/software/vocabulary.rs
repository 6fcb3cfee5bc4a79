//! Software-network vocabulary: algorithms, implementations, data flow.

use crate::base::{Hyperedges, Uid};
use crate::component::ComponentVocabulary;
use crate::kb::{Direction, KnowledgeBase};

/// Identifiers of the software layer's root concepts and relation types.
///
/// Algorithm and Implementation are component classes (Implementation ≤
/// Algorithm), Input and Output are software interface classes. *needs* and
/// *provides* are subsumed by *has-a-interface*, *depends-on* by
/// *connected-to-interface*, so component-level traversals see software
/// facts without special cases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoftwareVocabulary {
    pub base: ComponentVocabulary,
    pub algorithm: Uid,
    pub interface: Uid,
    pub input: Uid,
    pub output: Uid,
    pub implementation: Uid,
    pub depends_on: Uid,
    pub needs: Uid,
    pub provides: Uid,
    pub implements: Uid,
    pub encodes: Uid,
    pub realizes: Uid,
}

impl SoftwareVocabulary {
    pub const ALGORITHM: &'static str = "software.algorithm";
    pub const INTERFACE: &'static str = "software.interface";
    pub const INPUT: &'static str = "software.input";
    pub const OUTPUT: &'static str = "software.output";
    pub const IMPLEMENTATION: &'static str = "software.implementation";
    pub const DEPENDS_ON: &'static str = "software.relation.depends-on";
    pub const NEEDS: &'static str = "software.relation.needs";
    pub const PROVIDES: &'static str = "software.relation.provides";
    pub const IMPLEMENTS: &'static str = "software.relation.implements";
    pub const ENCODES: &'static str = "software.relation.encodes";
    pub const REALIZES: &'static str = "software.relation.realizes";

    /// Ensure the software layer's concepts and relation types exist on top
    /// of the component vocabulary. Idempotent.
    pub fn install(kb: &mut KnowledgeBase) -> Self {
        let base = ComponentVocabulary::install(kb);
        let algorithm = Uid::new(Self::ALGORITHM);
        let interface = Uid::new(Self::INTERFACE);
        let input = Uid::new(Self::INPUT);
        let output = Uid::new(Self::OUTPUT);
        let implementation = Uid::new(Self::IMPLEMENTATION);
        base.create_component(kb, algorithm.clone(), "ALGORITHM", &Hyperedges::new());
        base.create_interface(kb, interface.clone(), "INTERFACE", &Hyperedges::new());
        base.create_interface(kb, input.clone(), "INPUT", &Hyperedges::one(interface.clone()));
        base.create_interface(kb, output.clone(), "OUTPUT", &Hyperedges::one(interface.clone()));
        // Implementations are algorithms too: they carry interfaces the same
        // way.
        base.create_component(
            kb,
            implementation.clone(),
            "IMPLEMENTATION",
            &Hyperedges::one(algorithm.clone()),
        );

        let depends_on = Uid::new(Self::DEPENDS_ON);
        let needs = Uid::new(Self::NEEDS);
        let provides = Uid::new(Self::PROVIDES);
        let implements = Uid::new(Self::IMPLEMENTS);
        let encodes = Uid::new(Self::ENCODES);
        let realizes = Uid::new(Self::REALIZES);
        kb.create_subrelation(
            depends_on.clone(),
            "DEPENDS-ON",
            Hyperedges::one(input.clone()),
            Hyperedges::one(output.clone()),
            &base.connected_to,
        );
        kb.create_subrelation(
            needs.clone(),
            "NEEDS",
            Hyperedges::one(algorithm.clone()),
            Hyperedges::one(input.clone()),
            &base.has_interface,
        );
        kb.create_subrelation(
            provides.clone(),
            "PROVIDES",
            Hyperedges::one(algorithm.clone()),
            Hyperedges::one(output.clone()),
            &base.has_interface,
        );
        kb.create_relation(
            implements.clone(),
            "IMPLEMENTS",
            Hyperedges::one(implementation.clone()),
            Hyperedges::one(algorithm.clone()),
        );
        kb.create_relation(
            encodes.clone(),
            "ENCODES",
            Hyperedges::one(interface.clone()),
            Hyperedges::one(interface.clone()),
        );
        kb.create_relation(
            realizes.clone(),
            "REALIZES",
            Hyperedges::one(implementation.clone()),
            Hyperedges::one(algorithm.clone()),
        );

        Self {
            base,
            algorithm,
            interface,
            input,
            output,
            implementation,
            depends_on,
            needs,
            provides,
            implements,
            encodes,
            realizes,
        }
    }

    /// Create an algorithm class.
    pub fn create_algorithm(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.algorithm)
    }

    /// Create an abstract software interface class.
    pub fn create_interface(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.interface)
    }

    /// Create an input interface class.
    pub fn create_input(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.input)
    }

    /// Create an output interface class.
    pub fn create_output(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.output)
    }

    /// Create an implementation class.
    pub fn create_implementation(
        &self,
        kb: &mut KnowledgeBase,
        uid: Uid,
        label: &str,
        supers: &Hyperedges,
    ) -> Hyperedges {
        self.base.create_typed(kb, uid, label, supers, &self.implementation)
    }

    pub fn algorithm_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.algorithm.clone()), name)
    }

    pub fn interface_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.interface.clone()), name)
    }

    pub fn input_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.input.clone()), name)
    }

    pub fn output_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.output.clone()), name)
    }

    pub fn implementation_classes(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.subclasses_of(&Hyperedges::one(self.implementation.clone()), name)
    }

    /// Algorithm instances (implementation instances included, since
    /// Implementation ≤ Algorithm).
    pub fn algorithms(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.algorithm_classes(kb, ""), name)
    }

    pub fn interfaces(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.interface_classes(kb, ""), name)
    }

    pub fn inputs(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.input_classes(kb, ""), name)
    }

    pub fn outputs(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.output_classes(kb, ""), name)
    }

    pub fn implementations(&self, kb: &KnowledgeBase, name: &str) -> Hyperedges {
        kb.instances_of(&self.implementation_classes(kb, ""), name)
    }

    /// Input instances owned by the given algorithms.
    pub fn inputs_of(&self, kb: &KnowledgeBase, algorithms: &Hyperedges, name: &str) -> Hyperedges {
        self.inputs(kb, name)
            .intersect(&self.base.interfaces_of(kb, algorithms, name, Direction::Forward))
    }

    /// Output instances owned by the given algorithms.
    pub fn outputs_of(&self, kb: &KnowledgeBase, algorithms: &Hyperedges, name: &str) -> Hyperedges {
        self.outputs(kb, name)
            .intersect(&self.base.interfaces_of(kb, algorithms, name, Direction::Forward))
    }

    /// Declare that each algorithm needs each input instance.
    pub fn needs_interface(
        &self,
        kb: &mut KnowledgeBase,
        algorithms: &Hyperedges,
        inputs: &Hyperedges,
    ) -> Hyperedges {
        let from = algorithms.intersect(
            &self
                .algorithm_classes(kb, "")
                .unite(&self.algorithms(kb, "")),
        );
        let to = inputs.intersect(&self.inputs(kb, ""));
        self.base.assert_pairwise(kb, &from, &to, &self.needs)
    }

    /// Declare that each algorithm provides each output instance.
    pub fn provides_interface(
        &self,
        kb: &mut KnowledgeBase,
        algorithms: &Hyperedges,
        outputs: &Hyperedges,
    ) -> Hyperedges {
        let from = algorithms.intersect(
            &self
                .algorithm_classes(kb, "")
                .unite(&self.algorithms(kb, "")),
        );
        let to = outputs.intersect(&self.outputs(kb, ""));
        self.base.assert_pairwise(kb, &from, &to, &self.provides)
    }

    /// Wire data flow: each input instance depends on each output instance.
    pub fn depends_on(
        &self,
        kb: &mut KnowledgeBase,
        inputs: &Hyperedges,
        outputs: &Hyperedges,
    ) -> Hyperedges {
        let from = inputs.intersect(&self.inputs(kb, ""));
        let to = outputs.intersect(&self.outputs(kb, ""));
        self.base.assert_pairwise(kb, &from, &to, &self.depends_on)
    }

    /// Link implementation classes to the algorithm classes they implement.
    pub fn implements(
        &self,
        kb: &mut KnowledgeBase,
        implementations: &Hyperedges,
        algorithms: &Hyperedges,
    ) -> Hyperedges {
        let from = implementations.intersect(&self.implementation_classes(kb, ""));
        let to = algorithms.intersect(&self.algorithm_classes(kb, ""));
        self.base.assert_pairwise(kb, &from, &to, &self.implements)
    }

    /// Link concrete interface classes to the abstract classes they encode.
    pub fn encodes(
        &self,
        kb: &mut KnowledgeBase,
        concrete: &Hyperedges,
        abstract_interfaces: &Hyperedges,
    ) -> Hyperedges {
        let valid = self.interface_classes(kb, "");
        let from = concrete.intersect(&valid);
        let to = abstract_interfaces.intersect(&valid);
        self.base.assert_pairwise(kb, &from, &to, &self.encodes)
    }

    /// Select an implementation instance for each algorithm instance.
    pub fn realizes(
        &self,
        kb: &mut KnowledgeBase,
        implementations: &Hyperedges,
        algorithms: &Hyperedges,
    ) -> Hyperedges {
        let from = implementations.intersect(&self.implementations(kb, ""));
        let to = algorithms.intersect(&self.algorithms(kb, ""));
        self.base.assert_pairwise(kb, &from, &to, &self.realizes)
    }

    /// Implementation classes of the given algorithm classes (`Inverse`), or
    /// the algorithm classes implemented by the given ones (`Forward`).
    pub fn implementations_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.implements, name, direction)
    }

    /// Concrete interface classes encoding the given abstract ones
    /// (`Inverse`), or the abstract classes encoded by the given ones
    /// (`Forward`).
    pub fn encoders_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.encodes, name, direction)
    }

    /// Implementation instances realizing the given algorithm instances
    /// (`Inverse`), or the algorithm instances realized by the given ones
    /// (`Forward`).
    pub fn realizers_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.realizes, name, direction)
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

    fn sw_network() -> (KnowledgeBase, SoftwareVocabulary) {
        let mut kb = KnowledgeBase::new();
        let sw = SoftwareVocabulary::install(&mut kb);
        sw.create_algorithm(&mut kb, uid("localize"), "Localize", &Hyperedges::new());
        sw.create_input(&mut kb, uid("scan-in"), "Scan", &Hyperedges::new());
        sw.create_output(&mut kb, uid("pose-out"), "Pose", &Hyperedges::new());
        (kb, sw)
    }

    #[test]
    fn test_needs_and_provides_are_interface_facts() {
        let (mut kb, sw) = sw_network();
        let scan = kb.instantiate_from(&one("scan-in"), "scan");
        let pose = kb.instantiate_from(&one("pose-out"), "pose");
        sw.needs_interface(&mut kb, &one("localize"), &scan);
        sw.provides_interface(&mut kb, &one("localize"), &pose);

        // The component-level traversal sees both, through subsumption.
        let ifaces = sw.base.interfaces_of(&kb, &one("localize"), "", Direction::Forward);
        assert_eq!(ifaces, scan.unite(&pose));
        assert_eq!(sw.inputs_of(&kb, &one("localize"), ""), scan);
        assert_eq!(sw.outputs_of(&kb, &one("localize"), ""), pose);
    }

    #[test]
    fn test_depends_on_is_a_connection() {
        let (mut kb, sw) = sw_network();
        let scan = kb.instantiate_from(&one("scan-in"), "scan");
        let pose = kb.instantiate_from(&one("pose-out"), "pose");
        sw.depends_on(&mut kb, &scan, &pose);

        // Endpoint traversal crosses the data-flow edge both ways.
        assert_eq!(sw.base.endpoints_of(&kb, &scan, "", Direction::Both), pose);
        assert_eq!(sw.base.endpoints_of(&kb, &pose, "", Direction::Both), scan);
    }

    #[test]
    fn test_depends_on_rejects_swapped_endpoints() {
        let (mut kb, sw) = sw_network();
        let scan = kb.instantiate_from(&one("scan-in"), "scan");
        let pose = kb.instantiate_from(&one("pose-out"), "pose");
        // Outputs cannot depend on inputs.
        assert!(sw.depends_on(&mut kb, &pose, &scan).is_empty());
    }

    #[test]
    fn test_implements_and_realizes() {
        let (mut kb, sw) = sw_network();
        sw.create_implementation(&mut kb, uid("ekf"), "ekf.rs", &Hyperedges::new());
        sw.implements(&mut kb, &one("ekf"), &one("localize"));
        assert_eq!(
            sw.implementations_of(&kb, &one("localize"), "", Direction::Inverse),
            one("ekf")
        );

        let alg = kb.instantiate_from(&one("localize"), "loc0");
        let imp = sw.base.instantiate_component(&mut kb, &one("ekf"), "loc0");
        sw.realizes(&mut kb, &imp, &alg);
        assert_eq!(sw.realizers_of(&kb, &alg, "", Direction::Inverse), imp);
    }

    #[test]
    fn test_encodes_links_interface_classes() {
        let (mut kb, sw) = sw_network();
        sw.create_interface(&mut kb, uid("pose"), "Pose", &Hyperedges::new());
        sw.create_interface(&mut kb, uid("pose-ros"), "pose_msgs/Pose", &Hyperedges::new());
        sw.encodes(&mut kb, &one("pose-ros"), &one("pose"));
        assert_eq!(
            sw.encoders_of(&kb, &one("pose"), "", Direction::Inverse),
            one("pose-ros")
        );
    }
}
