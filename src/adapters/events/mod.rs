//! Event recorder adapters - implementations of the `EventRecorder` port.

mod in_memory;

pub use in_memory::InMemoryEventRecorder;
