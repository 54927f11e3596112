//! Error taxonomy for the Lab Report pipeline.
//!
//! Extraction and parse failures are recoverable (the orchestrator builds a
//! fallback report); everything after a successful parse is terminal for the
//! request and surfaced as a distinct [`PipelineError`] category.

use thiserror::Error;

use super::labels::{LegalityLabel, VerdictLabel};

/// Extraction failures. The only hard failure is the complete absence of a
/// JSON object start; everything else yields *some* candidate string.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoJsonObject,
}

/// Structural violations: a score outside `[0, 10]` or the legality/verdict
/// exclusion.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StructuralError {
    #[error("{field} must be between 0 and 10, got {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },

    #[error("cannot mark report as {verdict} when legality is {legality}")]
    LegalityVerdictExclusion {
        legality: LegalityLabel,
        verdict: VerdictLabel,
    },
}

/// Cross-field coherence violations, one variant per business rule.
///
/// Rules are checked in a fixed order (legality-exclusion, risk/impact,
/// practicality, quirk/gray-area); the first violation wins. The order is a
/// stable implementation choice, not a business rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoherenceError {
    #[error("legality is {legality} but verdict is {verdict}; red-flag hacks cannot carry a positive verdict")]
    RedFlagPositiveVerdict {
        legality: LegalityLabel,
        verdict: VerdictLabel,
    },

    #[error("high risk ({risk}) with low impact ({impact}) must be rated trash, got {verdict}")]
    HighRiskLowImpact {
        risk: f64,
        impact: f64,
        verdict: VerdictLabel,
    },

    #[error("very low practicality ({practicality}) must be rated trash, got {verdict}")]
    LowPracticalityNotTrash {
        practicality: f64,
        verdict: VerdictLabel,
    },

    #[error("system quirk with gray-area legality cannot carry favorable verdict {verdict}")]
    QuirkGrayAreaFavorable { verdict: VerdictLabel },
}

/// A blacklisted unsafe phrase was found in a free-text field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SafetyError {
    #[error("unsafe phrase \"{phrase}\" found in {field}")]
    UnsafePhrase { phrase: String, field: &'static str },
}

/// Terminal pipeline failures surfaced to the caller.
///
/// Pre-parse failures never reach the caller as errors; they fall back to a
/// synthetic report instead. A report that parsed cleanly but fails these
/// checks indicates a backend content problem and must not be masked.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineError {
    /// The report is malformed: out-of-range score or legality/verdict
    /// exclusion violated.
    #[error("malformed report: {0}")]
    Structural(#[from] StructuralError),

    /// The report is internally inconsistent across fields.
    #[error("incoherent report: {0}")]
    Incoherent(#[from] CoherenceError),

    /// The report contains a blacklisted unsafe claim.
    #[error("unsafe report: {0}")]
    Unsafe(#[from] SafetyError),
}
