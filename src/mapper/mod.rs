//! # Software-to-hardware mapper
//!
//! Specialises the generic bipartite matcher: the left partition is the
//! software implementation instances, the right partition the hardware
//! processor instances, and the match predicate fuses resource
//! satisfiability with network reachability. Chosen pairs are recorded as
//! *executed-on* facts (a subrelation of *mapped-to*).
//!
//! [`map_software_to_hardware`] and [`generate_implementation_networks`] are
//! the entry points a command-line front-end calls; they validate that the
//! required entity classes are populated before running.

mod pipeline;
mod sw_hw;

pub use pipeline::{
    MapperError, MappingReport, MappingStats, generate_implementation_networks,
    map_software_to_hardware,
};
pub use sw_hw::Mapper;
