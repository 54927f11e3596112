//! Closed label sets used across the Lab Report schema.
//!
//! Each enum carries a lenient `coerce` constructor used by the normalizer:
//! anything outside the closed set falls back to the per-enum safe default
//! instead of failing, so normalization stays total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of the analyzed hack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HackType {
    QuickFix,
    SystemLoophole,
    BehavioralTweak,
    IncomeBooster,
    #[default]
    Unknown,
}

impl HackType {
    /// Coerces a raw model-provided value into the closed set.
    ///
    /// Anything that is not a known label becomes `Unknown`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("quick_fix") => HackType::QuickFix,
            Some("system_loophole") => HackType::SystemLoophole,
            Some("behavioral_tweak") => HackType::BehavioralTweak,
            Some("income_booster") => HackType::IncomeBooster,
            _ => HackType::Unknown,
        }
    }

    /// Returns the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            HackType::QuickFix => "quick_fix",
            HackType::SystemLoophole => "system_loophole",
            HackType::BehavioralTweak => "behavioral_tweak",
            HackType::IncomeBooster => "income_booster",
            HackType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legality/compliance assessment of a hack (current schema).
///
/// The legacy schema additionally carries `illegal`; see
/// [`super::LegacyLegalityLabel`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalityLabel {
    Clean,
    /// Safe default: unverified or unclear legal implications.
    #[default]
    GrayArea,
    RedFlag,
}

impl LegalityLabel {
    /// Coerces a raw value into the closed set, defaulting to `GrayArea`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("clean") => LegalityLabel::Clean,
            Some("gray_area") => LegalityLabel::GrayArea,
            Some("red_flag") => LegalityLabel::RedFlag,
            _ => LegalityLabel::GrayArea,
        }
    }

    /// Returns the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalityLabel::Clean => "clean",
            LegalityLabel::GrayArea => "gray_area",
            LegalityLabel::RedFlag => "red_flag",
        }
    }
}

impl fmt::Display for LegalityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Difficulty/compliance-effort level required to pull the hack off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdherenceLevel {
    Easy,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl AdherenceLevel {
    /// Coerces a raw value into the closed set, defaulting to `Intermediate`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("easy") => AdherenceLevel::Easy,
            Some("intermediate") => AdherenceLevel::Intermediate,
            Some("advanced") => AdherenceLevel::Advanced,
            Some("expert") => AdherenceLevel::Expert,
            _ => AdherenceLevel::Intermediate,
        }
    }

    /// Returns the wire-format string for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdherenceLevel::Easy => "easy",
            AdherenceLevel::Intermediate => "intermediate",
            AdherenceLevel::Advanced => "advanced",
            AdherenceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for AdherenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final verdict on a hack (current schema), from most to least negative.
///
/// The legacy schema uses a different set; see [`super::LegacyVerdictLabel`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLabel {
    Trash,
    DangerousForMost,
    /// The neutral, non-positive default.
    #[default]
    WorksIfProfileMatches,
    PromisingSuperhackPart,
    Solid,
}

impl VerdictLabel {
    /// Coerces a raw value into the closed set, defaulting to the neutral
    /// `WorksIfProfileMatches`.
    pub fn coerce(raw: Option<&str>) -> Self {
        match raw {
            Some("trash") => VerdictLabel::Trash,
            Some("dangerous_for_most") => VerdictLabel::DangerousForMost,
            Some("works_if_profile_matches") => VerdictLabel::WorksIfProfileMatches,
            Some("promising_superhack_part") => VerdictLabel::PromisingSuperhackPart,
            Some("solid") => VerdictLabel::Solid,
            _ => VerdictLabel::WorksIfProfileMatches,
        }
    }

    /// Returns the wire-format string for this label.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Trash => "trash",
            VerdictLabel::DangerousForMost => "dangerous_for_most",
            VerdictLabel::WorksIfProfileMatches => "works_if_profile_matches",
            VerdictLabel::PromisingSuperhackPart => "promising_superhack_part",
            VerdictLabel::Solid => "solid",
        }
    }

    /// True for any verdict that endorses the hack, including the
    /// conditional `works_if_profile_matches`.
    ///
    /// This is the set excluded under red-flag legality.
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            VerdictLabel::WorksIfProfileMatches
                | VerdictLabel::PromisingSuperhackPart
                | VerdictLabel::Solid
        )
    }

    /// True for the unconditionally favorable verdicts only.
    ///
    /// This is the set excluded by the structural legality check and by the
    /// quirk/gray-area coherence rule.
    pub fn is_favorable(&self) -> bool {
        matches!(
            self,
            VerdictLabel::PromisingSuperhackPart | VerdictLabel::Solid
        )
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
