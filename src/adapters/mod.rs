//! Adapters - implementations of ports for external systems.
//!
//! Following hexagonal architecture, adapters translate between the domain
//! and the outside world: model APIs, storage, and telemetry sinks.

pub mod events;
pub mod generator;
pub mod repository;
