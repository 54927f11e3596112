//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ReportGenerator` - Model backend that produces raw lab report output
//! - `ReportRepository` - Persistence and deduplication for validated reports
//! - `EventRecorder` - Best-effort sink for analysis telemetry

mod event_recorder;
mod report_generator;
mod report_repository;

pub use event_recorder::{EventRecorder, RecordError};
pub use report_generator::{GenerationError, GeneratorInfo, ReportGenerator};
pub use report_repository::{
    ReportId, ReportRepository, ReportToSave, RepositoryError, StoredReport,
};
