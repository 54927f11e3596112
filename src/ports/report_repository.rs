//! Report Repository Port - persistence for validated lab reports.
//!
//! Reports are stored with a handful of denormalized columns (hack type,
//! category, verdict, legality) for filtering, plus the full validated
//! report as JSON. Lookup by source link powers deduplication: the same
//! URL submitted twice returns the stored analysis instead of a new model
//! call.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::report::{HackType, LabReport, LegalityLabel, VerdictLabel};

/// Identifier of a stored report.
pub type ReportId = Uuid;

/// Port for lab-report persistence.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Persists a validated report, returning its new id.
    async fn save(&self, report: ReportToSave) -> Result<ReportId, RepositoryError>;

    /// Fetches a stored report by id.
    async fn find_by_id(&self, id: ReportId) -> Result<Option<StoredReport>, RepositoryError>;

    /// Fetches the stored report for a source link, if one exists.
    async fn find_by_source_link(
        &self,
        source_link: &str,
    ) -> Result<Option<StoredReport>, RepositoryError>;
}

/// A validated report plus its submission context, ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportToSave {
    pub hack_text: String,
    pub source_link: Option<String>,
    pub country: String,
    pub hack_type: HackType,
    pub primary_category: String,
    pub verdict_label: VerdictLabel,
    pub legality_label: LegalityLabel,
    pub report: LabReport,
}

impl ReportToSave {
    /// Builds the record from a validated report and its submission inputs.
    /// The denormalized columns are copied out of the report so callers
    /// cannot store mismatched values.
    pub fn from_report(
        report: LabReport,
        hack_text: impl Into<String>,
        source_link: Option<String>,
    ) -> Self {
        Self {
            hack_text: hack_text.into(),
            source_link,
            country: report.meta.country.clone(),
            hack_type: report.hack_normalized.hack_type,
            primary_category: report.hack_normalized.primary_category.clone(),
            verdict_label: report.verdict.label,
            legality_label: report.evaluation_panel.legality_compliance.label,
            report,
        }
    }
}

/// A report as it came back out of storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub id: ReportId,
    pub report: LabReport,
    pub source_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository errors.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// Stored report JSON no longer matches the schema.
    #[error("corrupt stored report {id}: {message}")]
    Corrupt { id: ReportId, message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
