//! # Hardware networks
//!
//! A thin refinement of the component layer: *Devices* are components,
//! *Processors* are devices, and a dedicated hardware *Interface* root keeps
//! hardware ports apart from software interfaces when filtering by *is-a*.

mod vocabulary;

pub use vocabulary::HardwareVocabulary;
