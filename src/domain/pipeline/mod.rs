//! Lab-report processing pipeline.
//!
//! Raw model output goes through six stages: candidate extraction and
//! repair, JSON parsing, normalization into the current schema, structural
//! validation, coherence validation, and safety screening. Failures before a
//! parse tree exists degrade to a cautionary fallback report; failures after
//! normalization are surfaced as [`PipelineError`] because a well-formed but
//! wrong report must never reach the user silently.

pub mod coherence;
pub mod extractor;
pub mod fallback;
pub mod normalizer;
pub mod safety;
pub mod structural;

pub use coherence::validate_coherence;
pub use extractor::CandidateExtractor;
pub use fallback::build_fallback_report;
pub use normalizer::ReportNormalizer;
pub use safety::SafetyScreener;
pub use structural::validate_structure;

use crate::domain::report::{LabReport, PipelineError};

/// Runs raw model output through extraction, normalization, and validation.
#[derive(Debug, Clone, Default)]
pub struct ReportPipeline {
    extractor: CandidateExtractor,
    normalizer: ReportNormalizer,
    screener: SafetyScreener,
}

impl ReportPipeline {
    /// Pipeline with the default safety blacklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipeline with a custom safety screener, for deployments that extend
    /// the phrase blacklist.
    pub fn with_screener(screener: SafetyScreener) -> Self {
        Self {
            extractor: CandidateExtractor::default(),
            normalizer: ReportNormalizer::default(),
            screener,
        }
    }

    /// Turns raw model output into a validated [`LabReport`].
    ///
    /// `hack_text` and `country` feed the fallback report when the output
    /// contains no parseable JSON at all.
    pub fn process(
        &self,
        raw: &str,
        hack_text: &str,
        country: &str,
    ) -> Result<LabReport, PipelineError> {
        let candidate = match self.extractor.extract(raw) {
            Ok(candidate) => candidate,
            Err(err) => {
                tracing::warn!(error = %err, "no JSON object in model output, using fallback report");
                return Ok(build_fallback_report(hack_text, country));
            }
        };

        let tree: serde_json::Value = match serde_json::from_str(&candidate) {
            Ok(tree) => tree,
            Err(err) => {
                tracing::warn!(error = %err, "repaired candidate is not valid JSON, using fallback report");
                return Ok(build_fallback_report(hack_text, country));
            }
        };

        let report = self.normalizer.normalize(&tree, country);

        validate_structure(&report)?;
        validate_coherence(&report)?;
        self.screener.screen(&report)?;

        Ok(report)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::report::{
        Adherence, AdherenceLevel, EvaluationPanel, HackNormalized, HackType, KeyPoints,
        LabReport, LegalityCompliance, LegalityLabel, PanelScore, ReportMeta,
        SystemQuirkLoophole, Verdict, VerdictLabel, SCHEMA_VERSION,
    };

    /// A report that passes every validation stage, with `mutate` applied.
    pub(crate) fn report_with(mutate: impl FnOnce(&mut LabReport)) -> LabReport {
        let mut report = LabReport {
            meta: ReportMeta {
                version: SCHEMA_VERSION.to_owned(),
                language: "en".to_owned(),
                country: "US".to_owned(),
            },
            hack_normalized: HackNormalized {
                title: "Checking account bonus churn".to_owned(),
                short_summary: "Open accounts for sign-up bonuses.".to_owned(),
                detailed_summary: "Open checking accounts that pay a sign-up bonus, meet the \
                     direct-deposit requirement, collect the bonus, then close the account \
                     after the holding period."
                    .to_owned(),
                hack_type: HackType::IncomeBooster,
                primary_category: "Bank bonuses".to_owned(),
            },
            evaluation_panel: EvaluationPanel {
                legality_compliance: LegalityCompliance {
                    label: LegalityLabel::Clean,
                    notes: "Bonus terms permit this when requirements are met.".to_owned(),
                },
                math_real_impact: PanelScore::new(6.0),
                risk_fragility: PanelScore::new(2.0),
                practicality_friction: PanelScore::new(7.0),
                system_quirk_loophole: SystemQuirkLoophole {
                    uses_system_quirk: false,
                    description: None,
                    fragility_notes: Vec::new(),
                },
            },
            adherence: Adherence {
                level: AdherenceLevel::Easy,
                notes: "Requires tracking deposit requirements per bank.".to_owned(),
            },
            verdict: Verdict {
                label: VerdictLabel::Solid,
                headline: "Reliable bonus income for organized people".to_owned(),
                recommended_profiles: vec!["organized tracker".to_owned()],
                not_for_profiles: vec!["people who forget account deadlines".to_owned()],
            },
            key_points: KeyPoints {
                key_risks: vec![
                    "Banks may claw back bonuses on early closure.".to_owned(),
                    "Frequent account openings can affect ChexSystems records.".to_owned(),
                ],
            },
        };
        mutate(&mut report);
        report
    }
}
