//! The reachability gate of the software-to-hardware mapper.

mod helpers;

use componentnet::base::Hyperedges;
use componentnet::kb::Direction;
use helpers::{machine_room, one, uid};

/// Wire a data-flow edge between two implementation instances.
fn wire_implementations(
    kb: &mut componentnet::kb::KnowledgeBase,
    mapper: &componentnet::mapper::Mapper,
    producer: &Hyperedges,
    consumer: &Hyperedges,
) {
    let sw = &mapper.software;
    sw.create_output(kb, uid("frames-out"), "frames", &Hyperedges::new());
    sw.create_input(kb, uid("frames-in"), "frames", &Hyperedges::new());
    let out = kb.instantiate_from(&one("frames-out"), "frames");
    sw.provides_interface(kb, producer, &out);
    let inp = kb.instantiate_from(&one("frames-in"), "frames");
    sw.needs_interface(kb, consumer, &inp);
    sw.depends_on(kb, &inp, &out);
}

/// Wire two processors through hardware interfaces.
fn wire_processors(
    kb: &mut componentnet::kb::KnowledgeBase,
    mapper: &componentnet::mapper::Mapper,
    left: &Hyperedges,
    right: &Hyperedges,
) {
    let hw = &mapper.hardware;
    hw.create_interface(kb, uid("link"), "Link", &Hyperedges::new());
    let a = hw.base.instantiate_interface_for(kb, left, &one("link"), "link0");
    let b = hw.base.instantiate_interface_for(kb, right, &one("link"), "link1");
    hw.base.connect_interface(kb, &a, &b);
}

#[test]
fn communicating_implementations_are_colocated_on_unwired_processors() {
    let (mut kb, mapper, implementations, _processors) =
        machine_room(&["i1", "i2"], &["p1", "p2"]);
    wire_implementations(&mut kb, &mapper, &implementations[0], &implementations[1]);

    let outcome = mapper.map(&kb).unwrap();
    assert_eq!(outcome.assignments.len(), 2);
    let first = mapper
        .resources
        .providers_of(&outcome.network, &implementations[0]);
    let second = mapper
        .resources
        .providers_of(&outcome.network, &implementations[1]);
    // Splitting i1 and i2 across unconnected processors is forbidden.
    assert_eq!(first, second);
}

#[test]
fn wired_processors_satisfy_the_gate() {
    let (mut kb, mapper, implementations, processors) = machine_room(&["i1", "i2"], &["p1", "p2"]);
    wire_implementations(&mut kb, &mapper, &implementations[0], &implementations[1]);
    wire_processors(&mut kb, &mapper, &processors[0], &processors[1]);

    let outcome = mapper.map(&kb).unwrap();
    assert_eq!(outcome.assignments.len(), 2);
    assert!(outcome.unmapped.is_empty());
}

#[test]
fn reachability_invariant_holds_after_mapping() {
    let (mut kb, mapper, implementations, processors) =
        machine_room(&["i1", "i2", "i3"], &["p1", "p2"]);
    wire_implementations(&mut kb, &mapper, &implementations[0], &implementations[1]);
    wire_processors(&mut kb, &mapper, &processors[0], &processors[1]);

    let outcome = mapper.map(&kb).unwrap();
    let network = &outcome.network;
    for assignment in &outcome.assignments {
        let implementation = Hyperedges::one(assignment.consumer.clone());
        let processor = Hyperedges::one(assignment.provider.clone());
        // Communication partners of the implementation...
        let sw_interfaces =
            mapper
                .software
                .base
                .interfaces_of(network, &implementation, "", Direction::Forward);
        let partners = mapper.software.base.interfaces_of(
            network,
            &mapper
                .software
                .base
                .endpoints_of(network, &sw_interfaces, "", Direction::Both),
            "",
            Direction::Inverse,
        );
        // ...must sit on the processor itself or on a wired neighbour.
        let hw_interfaces =
            mapper
                .hardware
                .base
                .interfaces_of(network, &processor, "", Direction::Forward);
        let reachable = mapper
            .hardware
            .base
            .interfaces_of(
                network,
                &mapper
                    .hardware
                    .base
                    .endpoints_of(network, &hw_interfaces, "", Direction::Both),
                "",
                Direction::Inverse,
            )
            .unite(&processor);
        let partner_targets = mapper.resources.providers_of(network, &partners);
        assert!(partner_targets.is_subset_of(&reachable));
    }
}

#[test]
fn unrelated_implementations_spread_freely() {
    // No software wiring at all: the gate never fires and the matcher is
    // free to balance the load.
    let (kb, mapper, implementations, _processors) = machine_room(&["i1", "i2"], &["p1", "p2"]);
    let outcome = mapper.map(&kb).unwrap();
    assert_eq!(outcome.assignments.len(), 2);
    let first = mapper
        .resources
        .providers_of(&outcome.network, &implementations[0]);
    let second = mapper
        .resources
        .providers_of(&outcome.network, &implementations[1]);
    // i2 prefers the empty processor: more slack there.
    assert_ne!(first, second);
}
