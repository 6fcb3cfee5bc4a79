//! Fact assertions and traversals over component networks.

use crate::base::{Hyperedges, Uid};
use crate::component::ComponentVocabulary;
use crate::kb::{Direction, KnowledgeBase};
use tracing::trace;

impl ComponentVocabulary {
    /// State that each component (class or instance) owns each interface
    /// instance. Identifiers outside those sets are dropped; the returned
    /// set holds the interfaces actually linked.
    pub fn has_interface(
        &self,
        kb: &mut KnowledgeBase,
        components: &Hyperedges,
        interfaces: &Hyperedges,
    ) -> Hyperedges {
        let from = components.intersect(
            &self
                .component_classes(kb, "")
                .unite(&self.components(kb, "")),
        );
        let to = interfaces.intersect(&self.interfaces(kb, ""));
        self.assert_pairwise(kb, &from, &to, &self.has_interface)
    }

    /// State that each interface (class or instance) owns each sub-interface
    /// instance.
    pub fn has_sub_interface(
        &self,
        kb: &mut KnowledgeBase,
        interfaces: &Hyperedges,
        sub_interfaces: &Hyperedges,
    ) -> Hyperedges {
        let from = interfaces.intersect(
            &self
                .interface_classes(kb, "")
                .unite(&self.interfaces(kb, "")),
        );
        let to = sub_interfaces.intersect(&self.interfaces(kb, ""));
        self.assert_pairwise(kb, &from, &to, &self.has_sub_interface)
    }

    /// Attach value instances to interface instances.
    pub fn has_value(
        &self,
        kb: &mut KnowledgeBase,
        interfaces: &Hyperedges,
        values: &Hyperedges,
    ) -> Hyperedges {
        let from = interfaces.intersect(&self.interfaces(kb, ""));
        let to = values.intersect(&self.values(kb, ""));
        self.assert_pairwise(kb, &from, &to, &self.has_value)
    }

    /// Wire interface instances together. Stored directed; endpoint
    /// traversal treats both directions.
    pub fn connect_interface(
        &self,
        kb: &mut KnowledgeBase,
        from_interfaces: &Hyperedges,
        to_interfaces: &Hyperedges,
    ) -> Hyperedges {
        let valid = self.interfaces(kb, "");
        let from = from_interfaces.intersect(&valid);
        let to = to_interfaces.intersect(&valid);
        self.assert_pairwise(kb, &from, &to, &self.connected_to)
    }

    /// Nest component instances inside composite components.
    pub fn part_of_component(
        &self,
        kb: &mut KnowledgeBase,
        parts: &Hyperedges,
        wholes: &Hyperedges,
    ) -> Hyperedges {
        let from = parts.intersect(&self.components(kb, ""));
        let to = wholes.intersect(
            &self
                .components(kb, "")
                .unite(&self.component_classes(kb, "")),
        );
        self.assert_pairwise(kb, &from, &to, &self.part_of_component)
    }

    /// State that each alias interface re-exports each original interface.
    pub fn alias_of(
        &self,
        kb: &mut KnowledgeBase,
        aliases: &Hyperedges,
        originals: &Hyperedges,
    ) -> Hyperedges {
        let valid = self.interfaces(kb, "");
        let from = aliases.intersect(&valid);
        let to = originals.intersect(&valid);
        self.assert_pairwise(kb, &from, &to, &self.alias_of)
    }

    /// Interfaces owned by the given entities (`Forward`), or owners of the
    /// given interfaces (`Inverse`), following every subrelation of
    /// *has-a-interface*. The name argument filters results by label.
    pub fn interfaces_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.has_interface, name, direction)
    }

    /// Values below the given interfaces, or owning interfaces of values.
    pub fn values_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.has_value, name, direction)
    }

    /// Sub-interfaces of structured interfaces, or their owners.
    pub fn subinterfaces_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.has_sub_interface, name, direction)
    }

    /// Components nested below composites (`Inverse`), or the composites a
    /// component is part of (`Forward`).
    pub fn subcomponents_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.part_of_component, name, direction)
    }

    /// Originals re-exported by the given aliases (`Forward`), or aliases of
    /// the given originals (`Inverse`). One alias step, no chain closure.
    pub fn original_interfaces_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        kb.related(uids, &self.alias_of, name, direction)
    }

    /// Interfaces reachable from the given interfaces over
    /// *connected-to-interface* facts, crossing alias chains.
    ///
    /// The query set is first widened with every alias whose chain of
    /// *alias-of* facts lands in it, then connection facts are traversed,
    /// then each result is widened with its transitive originals. An outer
    /// component's re-export therefore behaves exactly like the inner
    /// interface it aliases.
    pub fn endpoints_of(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        name: &str,
        direction: Direction,
    ) -> Hyperedges {
        let widened = uids.unite(&self.alias_chain(kb, uids, Direction::Inverse));
        let endpoints = kb.related(&widened, &self.connected_to, "", direction);
        let full = endpoints.unite(&self.alias_chain(kb, &endpoints, Direction::Forward));
        if name.is_empty() {
            full
        } else {
            full.iter()
                .filter(|uid| kb.label_of(uid) == Some(name))
                .cloned()
                .collect()
        }
    }

    /// Transitive *alias-of* closure in one direction, excluding the seeds.
    fn alias_chain(
        &self,
        kb: &KnowledgeBase,
        uids: &Hyperedges,
        direction: Direction,
    ) -> Hyperedges {
        let mut seen = uids.clone();
        let mut frontier = uids.clone();
        let mut result = Hyperedges::new();
        while !frontier.is_empty() {
            let next = kb
                .related(&frontier, &self.alias_of, "", direction)
                .subtract(&seen);
            seen = seen.unite(&next);
            result = result.unite(&next);
            frontier = next;
        }
        result
    }

    /// Assert one fact per (source, target) pair, returning the targets of
    /// the facts that were accepted.
    pub(crate) fn assert_pairwise(
        &self,
        kb: &mut KnowledgeBase,
        from: &Hyperedges,
        to: &Hyperedges,
        relation: &Uid,
    ) -> Hyperedges {
        let mut result = Hyperedges::new();
        for source in from {
            for target in to {
                let accepted = kb.assert_fact(
                    &Hyperedges::one(source.clone()),
                    &Hyperedges::one(target.clone()),
                    relation,
                );
                if accepted.is_empty() {
                    trace!("[COMPONENT] {relation} rejected for {source} -> {target}");
                }
                result = result.unite(&accepted);
            }
        }
        result
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

    /// A board class with one port instance, plus a standalone sensor
    /// instance with one pin.
    fn wired_network() -> (KnowledgeBase, ComponentVocabulary) {
        let mut kb = KnowledgeBase::new();
        let cv = ComponentVocabulary::install(&mut kb);
        cv.create_component(&mut kb, uid("board"), "Board", &Hyperedges::new());
        cv.create_interface(&mut kb, uid("port"), "Port", &Hyperedges::new());
        (kb, cv)
    }

    #[test]
    fn test_has_interface_links_class_to_interface_instance() {
        let (mut kb, cv) = wired_network();
        let port = cv.instantiate_interface_for(&mut kb, &one("board"), &one("port"), "out");
        assert_eq!(port.len(), 1);
        assert_eq!(cv.interfaces_of(&kb, &one("board"), "", Direction::Forward), port);
        // Owner lookup is the inverse traversal.
        assert_eq!(
            cv.interfaces_of(&kb, &port, "", Direction::Inverse),
            one("board")
        );
    }

    #[test]
    fn test_has_interface_ignores_non_interfaces() {
        let (mut kb, cv) = wired_network();
        // A component class is not an interface instance.
        let linked = cv.has_interface(&mut kb, &one("board"), &one("board"));
        assert!(linked.is_empty());
    }

    #[test]
    fn test_connect_and_endpoints() {
        let (mut kb, cv) = wired_network();
        let a = cv.instantiate_interface_for(&mut kb, &one("board"), &one("port"), "a");
        let b = cv.instantiate_interface_for(&mut kb, &one("board"), &one("port"), "b");
        cv.connect_interface(&mut kb, &a, &b);

        // Stored directed, traversed in both directions.
        assert_eq!(cv.endpoints_of(&kb, &a, "", Direction::Both), b);
        assert_eq!(cv.endpoints_of(&kb, &b, "", Direction::Both), a);
    }

    #[test]
    fn test_endpoints_cross_alias_chains() {
        let (mut kb, cv) = wired_network();
        cv.create_component(&mut kb, uid("outer"), "Outer", &Hyperedges::new());
        cv.create_component(&mut kb, uid("peer"), "Peer", &Hyperedges::new());
        let inner = cv.instantiate_interface_for(&mut kb, &one("board"), &one("port"), "x");
        let alias =
            cv.instantiate_alias_interface_for(&mut kb, &one("outer"), &inner, "exported");
        let peer_if = cv.instantiate_interface_for(&mut kb, &one("peer"), &one("port"), "p");
        cv.connect_interface(&mut kb, &peer_if, &alias);

        // Reaching through the alias lands on the inner original.
        let endpoints = cv.endpoints_of(&kb, &peer_if, "", Direction::Both);
        assert!(endpoints.is_subset_of(&alias.unite(&inner)));
        assert!(endpoints.contains(inner.first().unwrap()));
        // And the inner original sees the peer through its alias.
        let back = cv.endpoints_of(&kb, &inner, "", Direction::Both);
        assert!(back.contains(peer_if.first().unwrap()));
    }

    #[test]
    fn test_part_of_component() {
        let (mut kb, cv) = wired_network();
        let parent = kb.instantiate_from(&one("board"), "parent");
        let child = kb.instantiate_from(&one("board"), "child");
        cv.part_of_component(&mut kb, &child, &parent);
        assert_eq!(
            cv.subcomponents_of(&kb, &parent, "", Direction::Inverse),
            child
        );
    }
}
