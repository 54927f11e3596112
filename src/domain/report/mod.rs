//! The canonical Lab Report model.
//!
//! A `LabReport` is the structured verdict produced for one analyzed money
//! hack. It is constructed once per analysis request by the pipeline and is
//! immutable thereafter; persistence and identity belong to the caller.
//!
//! Two incompatible schema versions exist in the wild (v1.0 and v2.0); they
//! are modeled as explicit variants with an upgrade adapter rather than
//! optional fields scattered through one struct.

mod errors;
mod lab_report;
mod labels;
mod legacy;

pub use errors::{
    CoherenceError, ExtractError, PipelineError, SafetyError, StructuralError,
};
pub use lab_report::{
    Adherence, EvaluationPanel, HackNormalized, KeyPoints, LabReport, LegalityCompliance,
    PanelScore, ReportMeta, SystemQuirkLoophole, Verdict, SCHEMA_VERSION,
};
pub use labels::{AdherenceLevel, HackType, LegalityLabel, VerdictLabel};
pub use legacy::{
    LegacyEvaluationPanel, LegacyLabReport, LegacyLegalityCompliance, LegacyLegalityLabel,
    LegacySystemQuirkLoophole, LegacyVerdict, LegacyVerdictLabel, VersionedLabReport,
    LEGACY_SCHEMA_VERSION,
};
