//! Shared builders for the integration tests.
#![allow(dead_code)]

use componentnet::base::{Hyperedges, Uid};
use componentnet::kb::KnowledgeBase;
use componentnet::mapper::Mapper;
use componentnet::resource::ResourceVocabulary;

pub fn uid(s: &str) -> Uid {
    Uid::from(s)
}

pub fn one(s: &str) -> Hyperedges {
    Hyperedges::one(uid(s))
}

/// A pure resource-level scene: one consumer class ("Worker") and one
/// provider class ("Depot"), an Apples resource, consumers that *consume*
/// the given amounts and providers that supply the given amounts.
///
/// Consumers are created in order (`a`, `b`, `c`, ...) and providers in
/// order (`1`, `2`, `3`, ...), pinning the iteration orders the matcher
/// sees.
pub fn orchard(demands: &[f64], supplies: &[f64]) -> (KnowledgeBase, ResourceVocabulary) {
    let mut kb = KnowledgeBase::new();
    let rv = ResourceVocabulary::install(&mut kb);
    kb.create_concept(uid("worker"), "Worker");
    kb.create_concept(uid("depot"), "Depot");
    rv.is_consumer(&mut kb, &one("worker"));
    rv.is_provider(&mut kb, &one("depot"));
    rv.define_resource(&mut kb, uid("apples"), "Apples", &Hyperedges::new());

    for (index, demand) in demands.iter().enumerate() {
        let name = char::from(b'a' + index as u8).to_string();
        let consumer = kb.instantiate_from(&one("worker"), &name);
        let resource = rv.instantiate_resource(&mut kb, &one("apples"), *demand);
        rv.consumes(&mut kb, &consumer, &resource);
    }
    for (index, supply) in supplies.iter().enumerate() {
        let provider = kb.instantiate_from(&one("depot"), &(index + 1).to_string());
        rv.instantiate_resource_for(&mut kb, &provider, &one("apples"), *supply);
    }
    (kb, rv)
}

/// A full software/hardware scene: `implementations` named implementation
/// instances (each consuming Memory:4) and `processors` named processor
/// instances (each providing Memory:16). Wiring is left to the caller.
pub fn machine_room(
    implementations: &[&str],
    processors: &[&str],
) -> (KnowledgeBase, Mapper, Vec<Hyperedges>, Vec<Hyperedges>) {
    let mut kb = KnowledgeBase::new();
    let mapper = Mapper::install(&mut kb);
    let sw = mapper.software.clone();
    let hw = mapper.hardware.clone();
    let rv = mapper.resources.clone();

    sw.create_implementation(&mut kb, uid("task"), "task.rs", &Hyperedges::new());
    rv.is_consumer(&mut kb, &one("task"));
    hw.create_processor(&mut kb, uid("cpu"), "CPU", &Hyperedges::new());
    rv.is_provider(&mut kb, &one("cpu"));
    rv.define_resource(&mut kb, uid("memory"), "Memory", &Hyperedges::new());

    let mut impl_sets = Vec::new();
    for name in implementations {
        let instance = sw.base.instantiate_component(&mut kb, &one("task"), name);
        let demand = rv.instantiate_resource(&mut kb, &one("memory"), 4.0);
        rv.consumes(&mut kb, &instance, &demand);
        impl_sets.push(instance);
    }
    let mut proc_sets = Vec::new();
    for name in processors {
        let instance = hw.base.instantiate_component(&mut kb, &one("cpu"), name);
        rv.instantiate_resource_for(&mut kb, &instance, &one("memory"), 16.0);
        proc_sets.push(instance);
    }
    (kb, mapper, impl_sets, proc_sets)
}
