//! The legacy Lab Report schema (v1.0) and its upgrade adapter.
//!
//! The legacy schema differs from the current one in three ways: the verdict
//! label set, an extra `illegal` legality label, and the absence of the
//! adherence section and audience-profile lists. The upgrade adapter maps a
//! legacy report onto the current schema with the same safe-default
//! philosophy the normalizer uses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::lab_report::{
    Adherence, EvaluationPanel, HackNormalized, KeyPoints, LabReport, LegalityCompliance,
    PanelScore, ReportMeta, SystemQuirkLoophole, Verdict, SCHEMA_VERSION,
};
use super::labels::{AdherenceLevel, LegalityLabel, VerdictLabel};

/// Schema tag carried by legacy reports.
pub const LEGACY_SCHEMA_VERSION: &str = "1.0";

/// Verdict labels in the legacy (v1.0) schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyVerdictLabel {
    Trash,
    #[default]
    WorksOnlyIf,
    Solid,
    Promising,
    GameChanger,
}

impl LegacyVerdictLabel {
    /// Coerces a raw value into the legacy closed set, defaulting to the
    /// neutral `WorksOnlyIf`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("trash") => LegacyVerdictLabel::Trash,
            Some("works_only_if") => LegacyVerdictLabel::WorksOnlyIf,
            Some("solid") => LegacyVerdictLabel::Solid,
            Some("promising") => LegacyVerdictLabel::Promising,
            Some("game_changer") => LegacyVerdictLabel::GameChanger,
            _ => LegacyVerdictLabel::WorksOnlyIf,
        }
    }

    /// Returns the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyVerdictLabel::Trash => "trash",
            LegacyVerdictLabel::WorksOnlyIf => "works_only_if",
            LegacyVerdictLabel::Solid => "solid",
            LegacyVerdictLabel::Promising => "promising",
            LegacyVerdictLabel::GameChanger => "game_changer",
        }
    }

    /// The closest current-schema verdict.
    ///
    /// `game_changer` maps to `solid`, the strongest label the current
    /// schema offers; `promising` keeps its tier as
    /// `promising_superhack_part`.
    pub fn upgrade(&self) -> VerdictLabel {
        match self {
            LegacyVerdictLabel::Trash => VerdictLabel::Trash,
            LegacyVerdictLabel::WorksOnlyIf => VerdictLabel::WorksIfProfileMatches,
            LegacyVerdictLabel::Solid => VerdictLabel::Solid,
            LegacyVerdictLabel::Promising => VerdictLabel::PromisingSuperhackPart,
            LegacyVerdictLabel::GameChanger => VerdictLabel::Solid,
        }
    }
}

impl fmt::Display for LegacyVerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legality labels in the legacy (v1.0) schema, including `illegal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacyLegalityLabel {
    Clean,
    #[default]
    GrayArea,
    RedFlag,
    Illegal,
}

impl LegacyLegalityLabel {
    /// Coerces a raw value into the legacy closed set, defaulting to
    /// `GrayArea`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("clean") => LegacyLegalityLabel::Clean,
            Some("gray_area") => LegacyLegalityLabel::GrayArea,
            Some("red_flag") => LegacyLegalityLabel::RedFlag,
            Some("illegal") => LegacyLegalityLabel::Illegal,
            _ => LegacyLegalityLabel::GrayArea,
        }
    }

    /// Returns the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegacyLegalityLabel::Clean => "clean",
            LegacyLegalityLabel::GrayArea => "gray_area",
            LegacyLegalityLabel::RedFlag => "red_flag",
            LegacyLegalityLabel::Illegal => "illegal",
        }
    }

    /// The closest current-schema legality label.
    ///
    /// `illegal` collapses into `red_flag`: both exclude favorable verdicts
    /// and the current schema has no stronger label.
    pub fn upgrade(&self) -> LegalityLabel {
        match self {
            LegacyLegalityLabel::Clean => LegalityLabel::Clean,
            LegacyLegalityLabel::GrayArea => LegalityLabel::GrayArea,
            LegacyLegalityLabel::RedFlag | LegacyLegalityLabel::Illegal => LegalityLabel::RedFlag,
        }
    }
}

impl fmt::Display for LegacyLegalityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legality assessment in the legacy schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyLegalityCompliance {
    pub label: LegacyLegalityLabel,
    pub notes: String,
}

/// Evaluation panel in the legacy schema (no quirk description or notes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvaluationPanel {
    pub legality_compliance: LegacyLegalityCompliance,
    pub math_real_impact: PanelScore,
    pub risk_fragility: PanelScore,
    pub practicality_friction: PanelScore,
    pub system_quirk_loophole: LegacySystemQuirkLoophole,
}

/// System-quirk flag in the legacy schema (flag only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySystemQuirkLoophole {
    pub uses_system_quirk: bool,
}

/// Verdict in the legacy schema (no audience profiles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyVerdict {
    pub label: LegacyVerdictLabel,
    pub headline: String,
}

/// A Lab Report in the legacy (v1.0) schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyLabReport {
    pub meta: ReportMeta,
    pub hack_normalized: HackNormalized,
    pub evaluation_panel: LegacyEvaluationPanel,
    pub verdict: LegacyVerdict,
    pub key_points: KeyPoints,
}

impl From<LegacyLabReport> for LabReport {
    /// Upgrades a legacy report to the current schema.
    ///
    /// Fields the legacy schema lacks are filled with the normalizer's safe
    /// defaults; the version tag is always rewritten to the current one.
    fn from(legacy: LegacyLabReport) -> Self {
        LabReport {
            meta: ReportMeta {
                version: SCHEMA_VERSION.to_string(),
                language: legacy.meta.language,
                country: legacy.meta.country,
            },
            hack_normalized: legacy.hack_normalized,
            evaluation_panel: EvaluationPanel {
                legality_compliance: LegalityCompliance {
                    label: legacy.evaluation_panel.legality_compliance.label.upgrade(),
                    notes: legacy.evaluation_panel.legality_compliance.notes,
                },
                math_real_impact: legacy.evaluation_panel.math_real_impact,
                risk_fragility: legacy.evaluation_panel.risk_fragility,
                practicality_friction: legacy.evaluation_panel.practicality_friction,
                system_quirk_loophole: SystemQuirkLoophole {
                    uses_system_quirk: legacy
                        .evaluation_panel
                        .system_quirk_loophole
                        .uses_system_quirk,
                    description: None,
                    fragility_notes: Vec::new(),
                },
            },
            adherence: Adherence {
                level: AdherenceLevel::Intermediate,
                notes: "Adherence level not present in legacy reports.".to_string(),
            },
            verdict: Verdict {
                label: legacy.verdict.label.upgrade(),
                headline: legacy.verdict.headline,
                recommended_profiles: Vec::new(),
                not_for_profiles: Vec::new(),
            },
            key_points: legacy.key_points,
        }
    }
}

/// A Lab Report in either schema version.
///
/// Consumers that read stored reports use this to handle both shapes; the
/// pipeline itself always hands out the current schema.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedLabReport {
    Legacy(LegacyLabReport),
    Current(LabReport),
}

impl VersionedLabReport {
    /// Converts either variant into the current schema.
    pub fn into_current(self) -> LabReport {
        match self {
            VersionedLabReport::Legacy(legacy) => legacy.into(),
            VersionedLabReport::Current(report) => report,
        }
    }

    /// Returns the schema tag of the underlying variant.
    pub fn schema_version(&self) -> &'static str {
        match self {
            VersionedLabReport::Legacy(_) => LEGACY_SCHEMA_VERSION,
            VersionedLabReport::Current(_) => SCHEMA_VERSION,
        }
    }
}
