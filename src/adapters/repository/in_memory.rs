//! In-Memory Report Repository
//!
//! Stores validated reports in memory. Useful for testing, local
//! development, and the CLI, which has no database behind it.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ports::{ReportId, ReportRepository, ReportToSave, RepositoryError, StoredReport};

/// In-memory storage for lab reports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<HashMap<ReportId, StoredRecord>>>,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    stored: StoredReport,
    hack_text: String,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored reports (useful for tests).
    pub async fn count(&self) -> usize {
        self.reports.read().await.len()
    }

    /// The originally submitted hack text for a stored report.
    pub async fn hack_text_of(&self, id: ReportId) -> Option<String> {
        self.reports
            .read()
            .await
            .get(&id)
            .map(|r| r.hack_text.clone())
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn save(&self, report: ReportToSave) -> Result<ReportId, RepositoryError> {
        let id = Uuid::new_v4();
        let record = StoredRecord {
            stored: StoredReport {
                id,
                report: report.report,
                source_link: report.source_link,
                created_at: Utc::now(),
            },
            hack_text: report.hack_text,
        };
        self.reports.write().await.insert(id, record);
        Ok(id)
    }

    async fn find_by_id(&self, id: ReportId) -> Result<Option<StoredReport>, RepositoryError> {
        Ok(self
            .reports
            .read()
            .await
            .get(&id)
            .map(|r| r.stored.clone()))
    }

    async fn find_by_source_link(
        &self,
        source_link: &str,
    ) -> Result<Option<StoredReport>, RepositoryError> {
        Ok(self
            .reports
            .read()
            .await
            .values()
            .find(|r| r.stored.source_link.as_deref() == Some(source_link))
            .map(|r| r.stored.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::test_support::report_with;

    #[tokio::test]
    async fn saves_and_finds_by_id() {
        let repository = InMemoryReportRepository::new();
        let to_save = ReportToSave::from_report(report_with(|_| {}), "hack text", None);

        let id = repository.save(to_save).await.unwrap();
        let stored = repository.find_by_id(id).await.unwrap().unwrap();

        assert_eq!(stored.id, id);
        assert_eq!(stored.report, report_with(|_| {}));
        assert_eq!(repository.count().await, 1);
        assert_eq!(
            repository.hack_text_of(id).await.as_deref(),
            Some("hack text")
        );
    }

    #[tokio::test]
    async fn finds_by_source_link() {
        let repository = InMemoryReportRepository::new();
        let to_save = ReportToSave::from_report(
            report_with(|_| {}),
            "hack text",
            Some("https://example.com/hack".to_owned()),
        );
        let id = repository.save(to_save).await.unwrap();

        let found = repository
            .find_by_source_link("https://example.com/hack")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, id);

        let missing = repository
            .find_by_source_link("https://example.com/other")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn unknown_id_returns_none() {
        let repository = InMemoryReportRepository::new();
        assert!(repository
            .find_by_id(Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
    }
}
