//! Cross-field coherence validation.
//!
//! A report can be perfectly well-formed and still make no sense: a red-flag
//! hack rated solid, a high-risk/no-impact hack that is not trash. Four
//! business rules relate the panel to the verdict. They are checked in a
//! fixed order and the first violation wins; the order is a stable
//! implementation choice (it only decides which message the caller sees),
//! not a business rule.

use crate::domain::report::{CoherenceError, LabReport, LegalityLabel, VerdictLabel};

/// Risk at or above this, combined with low impact, forces a trash verdict.
pub const HIGH_RISK_THRESHOLD: f64 = 7.0;
/// Impact at or below this counts as low for the risk/impact rule.
pub const LOW_IMPACT_THRESHOLD: f64 = 3.0;
/// Practicality at or below this forces a trash verdict.
pub const LOW_PRACTICALITY_THRESHOLD: f64 = 2.0;

/// Checks the four cross-field business rules.
pub fn validate_coherence(report: &LabReport) -> Result<(), CoherenceError> {
    let panel = &report.evaluation_panel;
    let legality = panel.legality_compliance.label;
    let verdict = report.verdict.label;
    let risk = panel.risk_fragility.score_0_to_10;
    let impact = panel.math_real_impact.score_0_to_10;
    let practicality = panel.practicality_friction.score_0_to_10;
    let uses_quirk = panel.system_quirk_loophole.uses_system_quirk;

    // Rule 1: red-flag legality excludes every positive verdict, including
    // the conditional one.
    if legality == LegalityLabel::RedFlag && verdict.is_positive() {
        return Err(CoherenceError::RedFlagPositiveVerdict { legality, verdict });
    }

    // Rule 2: high risk with low impact must be trash.
    if risk >= HIGH_RISK_THRESHOLD
        && impact <= LOW_IMPACT_THRESHOLD
        && verdict != VerdictLabel::Trash
    {
        return Err(CoherenceError::HighRiskLowImpact {
            risk,
            impact,
            verdict,
        });
    }

    // Rule 3: very low practicality must be trash.
    if practicality <= LOW_PRACTICALITY_THRESHOLD && verdict != VerdictLabel::Trash {
        return Err(CoherenceError::LowPracticalityNotTrash {
            practicality,
            verdict,
        });
    }

    // Rule 4: exploiting a system quirk under gray-area legality excludes
    // the favorable verdicts.
    if uses_quirk && legality == LegalityLabel::GrayArea && verdict.is_favorable() {
        return Err(CoherenceError::QuirkGrayAreaFavorable { verdict });
    }

    Ok(())
}
