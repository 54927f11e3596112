//! In-Memory Event Recorder
//!
//! Collects analysis events in memory. Backing store for tests and the CLI.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::telemetry::XRayEvent;
use crate::ports::{EventRecorder, RecordError};

/// In-memory sink for analysis events.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRecorder {
    events: Arc<RwLock<Vec<XRayEvent>>>,
}

impl InMemoryEventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, in recording order.
    pub async fn events(&self) -> Vec<XRayEvent> {
        self.events.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl EventRecorder for InMemoryEventRecorder {
    async fn record(&self, event: XRayEvent) -> Result<(), RecordError> {
        self.events.write().await.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::test_support::report_with;
    use crate::domain::telemetry::{build_xray_event, EventContext};

    #[tokio::test]
    async fn records_events_in_order() {
        let recorder = InMemoryEventRecorder::new();
        let report = report_with(|_| {});

        let first = build_xray_event(&report, EventContext::default());
        let second = build_xray_event(&report, EventContext::default());
        recorder.record(first.clone()).await.unwrap();
        recorder.record(second.clone()).await.unwrap();

        let events = recorder.events().await;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, first.id);
        assert_eq!(events[1].id, second.id);
    }
}
