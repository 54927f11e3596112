//! The Lab Report value object (current schema, v2.0).
//!
//! Serialization uses the original wire names (camelCase fields,
//! `score0to10`) so downstream consumers read the same shape the upstream
//! model is prompted for.

use serde::{Deserialize, Serialize};

use super::labels::{AdherenceLevel, HackType, LegalityLabel, VerdictLabel};

/// Schema tag stamped onto every normalized report, regardless of input.
pub const SCHEMA_VERSION: &str = "2.0";

/// The canonical structured verdict for one analyzed money hack.
///
/// Immutable once constructed. Scores are plain numbers here; range
/// enforcement is the structural validator's job, because normalization
/// must be total over arbitrary input trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub meta: ReportMeta,
    pub hack_normalized: HackNormalized,
    pub evaluation_panel: EvaluationPanel,
    pub adherence: Adherence,
    pub verdict: Verdict,
    pub key_points: KeyPoints,
}

/// Report provenance: schema version, language, and country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub version: String,
    pub language: String,
    pub country: String,
}

/// The hack restated in normalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackNormalized {
    pub title: String,
    pub short_summary: String,
    pub detailed_summary: String,
    pub hack_type: HackType,
    pub primary_category: String,
}

/// The evaluation panel: legality plus the three 0-10 scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPanel {
    pub legality_compliance: LegalityCompliance,
    pub math_real_impact: PanelScore,
    pub risk_fragility: PanelScore,
    pub practicality_friction: PanelScore,
    pub system_quirk_loophole: SystemQuirkLoophole,
}

/// Legality assessment with explanatory notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalityCompliance {
    pub label: LegalityLabel,
    pub notes: String,
}

/// A single 0-10 panel score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelScore {
    #[serde(rename = "score0to10")]
    pub score_0_to_10: f64,
}

impl PanelScore {
    pub fn new(score: f64) -> Self {
        Self { score_0_to_10: score }
    }
}

/// Whether the hack exploits a system quirk or loophole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemQuirkLoophole {
    pub uses_system_quirk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fragility_notes: Vec<String>,
}

/// Effort/difficulty required to follow the hack correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adherence {
    pub level: AdherenceLevel,
    pub notes: String,
}

/// The final verdict with headline and audience fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub label: VerdictLabel,
    pub headline: String,
    #[serde(default)]
    pub recommended_profiles: Vec<String>,
    #[serde(default)]
    pub not_for_profiles: Vec<String>,
}

/// Key takeaways; `key_risks` is never empty after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPoints {
    pub key_risks: Vec<String>,
}
