//! Enumeration of all possible implementation networks.

use crate::base::Hyperedges;
use crate::kb::{Direction, KnowledgeBase};
use crate::software::SoftwareVocabulary;
use tracing::debug;

impl SoftwareVocabulary {
    /// Expand a network of algorithm instances into every possible
    /// implementation network.
    ///
    /// Starting from one candidate equal to the input, every algorithm
    /// instance multiplies the candidate set by its implementing classes: in
    /// each new candidate a fresh implementation instance is created (named
    /// after the algorithm instance) and linked via *realizes*. The result
    /// size is the product of the per-algorithm implementation counts - an
    /// algorithm without any implementing class collapses the set to empty.
    ///
    /// Afterwards the data flow of the input network is mirrored: for every
    /// *depends-on* edge between algorithm interfaces, the realizing
    /// implementations' interfaces are located by equal label and wired with
    /// *depends-on* as well.
    pub fn generate_all_implementation_networks(&self, kb: &KnowledgeBase) -> Vec<KnowledgeBase> {
        let mut results = vec![kb.clone()];
        let algorithms = self.algorithms(kb, "");

        for algorithm in &algorithms {
            let classes = kb.classes_of(&Hyperedges::one(algorithm.clone()), "");
            let implementation_classes =
                self.implementations_of(kb, &classes, "", Direction::Inverse);
            debug!(
                "[ENUM] algorithm {algorithm}: {} implementation classes, {} candidates so far",
                implementation_classes.len(),
                results.len()
            );
            let name = kb.label_of(algorithm).unwrap_or_default().to_string();
            let mut expanded = Vec::with_capacity(results.len() * implementation_classes.len());
            for current in &results {
                for implementation_class in &implementation_classes {
                    let mut candidate = current.clone();
                    let instance = self.base.instantiate_component(
                        &mut candidate,
                        &Hyperedges::one(implementation_class.clone()),
                        &name,
                    );
                    self.realizes(
                        &mut candidate,
                        &instance,
                        &Hyperedges::one(algorithm.clone()),
                    );
                    expanded.push(candidate);
                }
            }
            results = expanded;
        }

        // Reconstruct the wiring among the implementation instances. The
        // typed endpoint guards of depends_on make the symmetric iteration
        // harmless: only the input-to-output pairing is recorded.
        for algorithm in &algorithms {
            let interfaces = self.base.interfaces_of(
                kb,
                &Hyperedges::one(algorithm.clone()),
                "",
                Direction::Forward,
            );
            for interface in &interfaces {
                let endpoints = self.base.endpoints_of(
                    kb,
                    &Hyperedges::one(interface.clone()),
                    "",
                    Direction::Both,
                );
                for other_interface in &endpoints {
                    let other_algorithms = algorithms.intersect(&self.base.interfaces_of(
                        kb,
                        &Hyperedges::one(other_interface.clone()),
                        "",
                        Direction::Inverse,
                    ));
                    let interface_name = kb.label_of(interface).unwrap_or_default().to_string();
                    let other_name = kb.label_of(other_interface).unwrap_or_default().to_string();
                    for other_algorithm in &other_algorithms {
                        for candidate in results.iter_mut() {
                            let realizers = self.realizers_of(
                                candidate,
                                &Hyperedges::one(algorithm.clone()),
                                "",
                                Direction::Inverse,
                            );
                            let other_realizers = self.realizers_of(
                                candidate,
                                &Hyperedges::one(other_algorithm.clone()),
                                "",
                                Direction::Inverse,
                            );
                            let own_interfaces = self.base.interfaces_of(
                                candidate,
                                &realizers,
                                &interface_name,
                                Direction::Forward,
                            );
                            let other_interfaces = self.base.interfaces_of(
                                candidate,
                                &other_realizers,
                                &other_name,
                                Direction::Forward,
                            );
                            self.depends_on(candidate, &own_interfaces, &other_interfaces);
                        }
                    }
                }
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Uid;

    fn uid(s: &str) -> Uid {
        Uid::from(s)
    }

    fn one(s: &str) -> Hyperedges {
        Hyperedges::one(uid(s))
    }

    /// Two algorithm classes wired scan -> pose, with a configurable number
    /// of implementing classes each, and one instance per algorithm.
    fn algorithm_network(impls_a: usize, impls_b: usize) -> (KnowledgeBase, SoftwareVocabulary) {
        let mut kb = KnowledgeBase::new();
        let sw = SoftwareVocabulary::install(&mut kb);
        sw.create_algorithm(&mut kb, uid("sense"), "Sense", &Hyperedges::new());
        sw.create_algorithm(&mut kb, uid("plan"), "Plan", &Hyperedges::new());
        sw.create_output(&mut kb, uid("data-out"), "Data", &Hyperedges::new());
        sw.create_input(&mut kb, uid("data-in"), "Data", &Hyperedges::new());

        let out = kb.instantiate_from(&one("data-out"), "data");
        sw.provides_interface(&mut kb, &one("sense"), &out);
        let inp = kb.instantiate_from(&one("data-in"), "data");
        sw.needs_interface(&mut kb, &one("plan"), &inp);

        // Implementation classes carry their own concrete interfaces, named
        // like the abstract ones so the wiring step can match them.
        for i in 0..impls_a {
            let impl_uid = uid(&format!("sense-impl-{i}"));
            sw.create_implementation(&mut kb, impl_uid.clone(), "sense.rs", &Hyperedges::new());
            sw.implements(&mut kb, &Hyperedges::one(impl_uid.clone()), &one("sense"));
            let impl_out = kb.instantiate_from(&one("data-out"), "data");
            sw.provides_interface(&mut kb, &Hyperedges::one(impl_uid), &impl_out);
        }
        for i in 0..impls_b {
            let impl_uid = uid(&format!("plan-impl-{i}"));
            sw.create_implementation(&mut kb, impl_uid.clone(), "plan.rs", &Hyperedges::new());
            sw.implements(&mut kb, &Hyperedges::one(impl_uid.clone()), &one("plan"));
            let impl_in = kb.instantiate_from(&one("data-in"), "data");
            sw.needs_interface(&mut kb, &Hyperedges::one(impl_uid), &impl_in);
        }

        let a = sw.base.instantiate_component(&mut kb, &one("sense"), "sense0");
        let b = sw.base.instantiate_component(&mut kb, &one("plan"), "plan0");
        let a_out = sw.outputs_of(&kb, &a, "data");
        let b_in = sw.inputs_of(&kb, &b, "data");
        sw.depends_on(&mut kb, &b_in, &a_out);
        (kb, sw)
    }

    #[test]
    fn test_cardinality_is_the_product_of_implementation_counts() {
        let (kb, sw) = algorithm_network(2, 2);
        assert_eq!(sw.generate_all_implementation_networks(&kb).len(), 4);

        let (kb, sw) = algorithm_network(3, 1);
        assert_eq!(sw.generate_all_implementation_networks(&kb).len(), 3);
    }

    #[test]
    fn test_algorithm_without_implementation_collapses_the_set() {
        let (kb, sw) = algorithm_network(2, 0);
        assert!(sw.generate_all_implementation_networks(&kb).is_empty());
    }

    #[test]
    fn test_candidates_carry_realizes_and_mirrored_wiring() {
        let (kb, sw) = algorithm_network(2, 2);
        let algorithms = sw.algorithms(&kb, "");

        for candidate in sw.generate_all_implementation_networks(&kb) {
            // Every algorithm instance of the input is realized exactly once.
            for algorithm in &algorithms {
                let realizers = sw.realizers_of(
                    &candidate,
                    &Hyperedges::one(algorithm.clone()),
                    "",
                    Direction::Inverse,
                );
                assert_eq!(realizers.len(), 1);
            }
            // The implementations' data interfaces are wired like the
            // algorithms' ones.
            let impl_a = sw.realizers_of(&candidate, &sw.algorithms(&candidate, "sense0"), "", Direction::Inverse);
            let impl_b = sw.realizers_of(&candidate, &sw.algorithms(&candidate, "plan0"), "", Direction::Inverse);
            let out = sw.outputs_of(&candidate, &impl_a, "data");
            let inp = sw.inputs_of(&candidate, &impl_b, "data");
            assert_eq!(out.len(), 1);
            assert_eq!(inp.len(), 1);
            assert_eq!(
                sw.base.endpoints_of(&candidate, &inp, "", Direction::Both),
                out
            );
        }
    }
}
