//! RunXRay - Command handler for analyzing a submitted money hack.
//!
//! Orchestrates the full flow: input quality gate, deduplication by source
//! link, model generation, pipeline validation, persistence, and telemetry.
//! Persistence and telemetry are best-effort; the user gets their report
//! even when either one fails.

use std::sync::Arc;

use crate::domain::pipeline::ReportPipeline;
use crate::domain::report::{LabReport, PipelineError};
use crate::domain::telemetry::{build_xray_event, EventContext};
use crate::ports::{
    EventRecorder, GenerationError, ReportGenerator, ReportId, ReportRepository, ReportToSave,
};

/// Country assumed when the caller does not give one.
pub const DEFAULT_COUNTRY: &str = "US";

/// Minimum share of alphanumeric characters for text to be analyzable.
const MIN_ALPHANUMERIC_RATIO: f64 = 0.3;

/// Command to analyze a money hack.
#[derive(Debug, Clone)]
pub struct RunXRayCommand {
    pub hack_text: String,
    pub source_link: Option<String>,
    pub country: Option<String>,
    pub client_ip_hash: Option<String>,
    pub user_agent: Option<String>,
}

impl RunXRayCommand {
    pub fn new(hack_text: impl Into<String>) -> Self {
        Self {
            hack_text: hack_text.into(),
            source_link: None,
            country: None,
            client_ip_hash: None,
            user_agent: None,
        }
    }

    pub fn with_source_link(mut self, link: impl Into<String>) -> Self {
        self.source_link = Some(link.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// Result of an analysis.
#[derive(Debug, Clone)]
pub struct RunXRayResult {
    /// Id under which the report was stored. `None` when persistence failed;
    /// the report itself is still valid.
    pub id: Option<ReportId>,
    pub report: LabReport,
    /// True when an earlier report for the same source link was returned
    /// instead of running a new analysis.
    pub deduplicated: bool,
}

/// Analysis failures surfaced to the caller.
#[derive(Debug, thiserror::Error)]
pub enum XRayError {
    /// Input does not look like analyzable text.
    #[error("hack text is too noisy to analyze")]
    NoisyInput,

    /// The model backend failed.
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The model produced a report that failed validation.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Handler for the analyze-hack command.
pub struct RunXRayHandler {
    generator: Arc<dyn ReportGenerator>,
    repository: Arc<dyn ReportRepository>,
    recorder: Arc<dyn EventRecorder>,
    pipeline: ReportPipeline,
}

impl RunXRayHandler {
    pub fn new(
        generator: Arc<dyn ReportGenerator>,
        repository: Arc<dyn ReportRepository>,
        recorder: Arc<dyn EventRecorder>,
    ) -> Self {
        Self {
            generator,
            repository,
            recorder,
            pipeline: ReportPipeline::new(),
        }
    }

    /// Replaces the default pipeline, for deployments with an extended
    /// safety blacklist.
    pub fn with_pipeline(mut self, pipeline: ReportPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub async fn handle(&self, cmd: RunXRayCommand) -> Result<RunXRayResult, XRayError> {
        let country = cmd.country.as_deref().unwrap_or(DEFAULT_COUNTRY);

        if is_text_too_noisy(&cmd.hack_text) {
            return Err(XRayError::NoisyInput);
        }

        // 1. Deduplication by source link, best-effort.
        if let Some(link) = cmd.source_link.as_deref() {
            match self.repository.find_by_source_link(link).await {
                Ok(Some(stored)) => {
                    tracing::info!(source_link = link, id = %stored.id, "returning stored report for known source link");
                    return Ok(RunXRayResult {
                        id: Some(stored.id),
                        report: stored.report,
                        deduplicated: true,
                    });
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "deduplication lookup failed, analyzing anyway");
                }
            }
        }

        // 2. Generate and validate.
        let info = self.generator.generator_info();
        tracing::debug!(backend = %info.name, model = %info.model, "requesting lab report");
        let raw = self.generator.generate(&cmd.hack_text, country).await?;
        let report = self.pipeline.process(&raw, &cmd.hack_text, country)?;

        // 3. Persist, best-effort.
        let id = match self
            .repository
            .save(ReportToSave::from_report(
                report.clone(),
                cmd.hack_text.clone(),
                cmd.source_link.clone(),
            ))
            .await
        {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::error!(error = %err, "failed to save report, returning it unsaved");
                None
            }
        };

        // 4. Telemetry, best-effort.
        let event = build_xray_event(
            &report,
            EventContext {
                report_id: id,
                source_link: cmd.source_link.clone(),
                client_ip_hash: cmd.client_ip_hash.clone(),
                user_agent: cmd.user_agent.clone(),
            },
        );
        if let Err(err) = self.recorder.record(event).await {
            tracing::warn!(error = %err, "failed to record analysis event");
        }

        Ok(RunXRayResult {
            id,
            report,
            deduplicated: false,
        })
    }
}

/// Rejects input that is mostly symbols or noise.
///
/// Measured over non-whitespace characters only, so ordinary spacing never
/// counts against the text. Empty or whitespace-only input is noisy.
pub fn is_text_too_noisy(text: &str) -> bool {
    let significant: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if significant.is_empty() {
        return true;
    }
    let alphanumeric = significant.iter().filter(|c| c.is_alphanumeric()).count();
    (alphanumeric as f64) / (significant.len() as f64) < MIN_ALPHANUMERIC_RATIO
}
