//! Repository adapters - implementations of the `ReportRepository` port.

mod in_memory;

pub use in_memory::InMemoryReportRepository;
