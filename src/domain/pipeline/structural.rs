//! Structural validation: score ranges and the legality/verdict exclusion.
//!
//! Assumes the normalizer already guaranteed the type shape; this stage only
//! checks values.

use crate::domain::report::{LabReport, LegalityLabel, StructuralError};

/// Validates score ranges and the legality/verdict exclusion.
pub fn validate_structure(report: &LabReport) -> Result<(), StructuralError> {
    let panel = &report.evaluation_panel;

    validate_score(panel.math_real_impact.score_0_to_10, "Math & Real Impact")?;
    validate_score(panel.risk_fragility.score_0_to_10, "Risk & Fragility")?;
    validate_score(
        panel.practicality_friction.score_0_to_10,
        "Practicality & Friction",
    )?;

    let legality = panel.legality_compliance.label;
    let verdict = report.verdict.label;
    if legality == LegalityLabel::RedFlag && verdict.is_favorable() {
        return Err(StructuralError::LegalityVerdictExclusion { legality, verdict });
    }

    Ok(())
}

fn validate_score(value: f64, field: &'static str) -> Result<(), StructuralError> {
    // Also rejects NaN, which fails every range comparison.
    if !(0.0..=10.0).contains(&value) {
        return Err(StructuralError::ScoreOutOfRange { field, value });
    }
    Ok(())
}
