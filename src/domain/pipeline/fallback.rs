//! Synthetic report for unrecoverable model output.
//!
//! When the model returns nothing, or text with no JSON object, or JSON that
//! will not parse, the pipeline does not surface an error. It hands back a
//! cautionary report that tells the user the analysis failed and echoes a
//! snippet of their hack text so they can see what was submitted. The
//! fallback must pass the same structural, coherence, and safety checks as
//! any model report; its scores and verdict are chosen to satisfy them by
//! construction.

use crate::domain::report::{
    Adherence, AdherenceLevel, EvaluationPanel, HackNormalized, HackType, KeyPoints, LabReport,
    LegalityCompliance, LegalityLabel, PanelScore, ReportMeta, SystemQuirkLoophole, Verdict,
    VerdictLabel, SCHEMA_VERSION,
};

/// At most this many characters of the hack text are echoed back.
const SNIPPET_LIMIT: usize = 100;

/// Builds the cautionary stand-in report for `hack_text`.
pub fn build_fallback_report(hack_text: &str, country: &str) -> LabReport {
    let snippet = shorten(hack_text);

    LabReport {
        meta: ReportMeta {
            version: SCHEMA_VERSION.to_owned(),
            language: "en".to_owned(),
            country: country.to_owned(),
        },
        hack_normalized: HackNormalized {
            title: "Hack could not be analyzed".to_owned(),
            short_summary: "The AI model did not return a valid analysis for this hack."
                .to_owned(),
            detailed_summary: "The AI model failed to generate a structured lab report for \
                 this hack. This is likely due to internal safety filters or transient model \
                 issues. Treat this hack with extra caution and do not rely on it for \
                 important financial decisions."
                .to_owned(),
            hack_type: HackType::Unknown,
            primary_category: "General".to_owned(),
        },
        evaluation_panel: EvaluationPanel {
            legality_compliance: LegalityCompliance {
                label: LegalityLabel::GrayArea,
                notes: "The AI model did not provide a legality assessment. Assume this hack \
                     has unverified or unclear legal implications."
                    .to_owned(),
            },
            math_real_impact: PanelScore::new(0.0),
            // Kept below the high-risk threshold so the unknown-impact score
            // does not force a trash verdict on a hack nobody evaluated.
            risk_fragility: PanelScore::new(6.0),
            practicality_friction: PanelScore::new(5.0),
            system_quirk_loophole: SystemQuirkLoophole {
                uses_system_quirk: false,
                description: None,
                fragility_notes: Vec::new(),
            },
        },
        adherence: Adherence {
            level: AdherenceLevel::Intermediate,
            notes: "Analysis failed, adherence unknown.".to_owned(),
        },
        verdict: Verdict {
            label: VerdictLabel::WorksIfProfileMatches,
            headline: "No reliable AI verdict available for this hack".to_owned(),
            recommended_profiles: Vec::new(),
            not_for_profiles: Vec::new(),
        },
        key_points: KeyPoints {
            key_risks: vec![
                "The hack could be misinterpreted because it was not properly analyzed by \
                 the AI."
                    .to_owned(),
                "There may be hidden costs, risks, or legal issues that were not surfaced."
                    .to_owned(),
                "You should seek independent financial advice before attempting this hack."
                    .to_owned(),
                format!("Original hack snippet: \"{snippet}\""),
            ],
        },
    }
}

/// First 97 characters plus an ellipsis when the text exceeds the limit.
/// Counted in characters, not bytes, so multi-byte text never splits.
fn shorten(hack_text: &str) -> String {
    if hack_text.chars().count() > SNIPPET_LIMIT {
        let head: String = hack_text.chars().take(SNIPPET_LIMIT - 3).collect();
        format!("{head}...")
    } else {
        hack_text.to_owned()
    }
}
