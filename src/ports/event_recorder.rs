//! Event Recorder Port - sink for analysis telemetry.

use async_trait::async_trait;

use crate::domain::telemetry::XRayEvent;

/// Port for recording [`XRayEvent`]s.
///
/// Recording is best-effort: callers log failures and move on, an analysis
/// never fails because its telemetry could not be written.
#[async_trait]
pub trait EventRecorder: Send + Sync {
    async fn record(&self, event: XRayEvent) -> Result<(), RecordError>;
}

/// Telemetry sink errors.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("event sink error: {0}")]
    Sink(String),
}

impl RecordError {
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}
