//! Normalization of a generic JSON tree onto the Lab Report schema.
//!
//! The tree may be partial, sparse, or carry wrong types anywhere; every
//! field is normalized independently with a safe default, so this stage is
//! total: any input tree (including `{}`) yields a fully-populated report.
//! Value-range and cross-field checks are deliberately left to the
//! validators downstream.

use serde_json::Value;

use crate::domain::report::{
    Adherence, AdherenceLevel, EvaluationPanel, HackNormalized, HackType, KeyPoints, LabReport,
    LegacyEvaluationPanel, LegacyLabReport, LegacyLegalityCompliance, LegacyLegalityLabel,
    LegacySystemQuirkLoophole, LegacyVerdict, LegacyVerdictLabel, LegalityCompliance,
    LegalityLabel, PanelScore, ReportMeta, SystemQuirkLoophole, Verdict, VerdictLabel,
    VersionedLabReport, SCHEMA_VERSION,
};

/// Maps a generic parsed tree onto the canonical Lab Report, substituting
/// safe defaults for anything missing or mistyped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportNormalizer;

impl ReportNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes a tree into a current-schema report.
    ///
    /// Legacy (v1.x) trees are normalized through the legacy variant and
    /// upgraded; either way the result carries the current schema tag and
    /// has no missing field or out-of-enum value.
    pub fn normalize(&self, tree: &Value, country: &str) -> LabReport {
        self.normalize_versioned(tree, country).into_current()
    }

    /// Normalizes a tree into whichever schema variant its version tag
    /// declares.
    pub fn normalize_versioned(&self, tree: &Value, country: &str) -> VersionedLabReport {
        if is_legacy_tree(tree) {
            VersionedLabReport::Legacy(self.normalize_legacy(tree, country))
        } else {
            VersionedLabReport::Current(self.normalize_current(tree, country))
        }
    }

    fn normalize_current(&self, tree: &Value, country: &str) -> LabReport {
        let meta = &tree["meta"];
        let hack = &tree["hackNormalized"];
        let panel = &tree["evaluationPanel"];
        let legality = &panel["legalityCompliance"];
        let quirk = &panel["systemQuirkLoophole"];
        let adherence = &tree["adherence"];
        let verdict = &tree["verdict"];
        let key_points = &tree["keyPoints"];

        LabReport {
            meta: self.normalize_meta(meta, country),
            hack_normalized: self.normalize_hack(hack),
            evaluation_panel: EvaluationPanel {
                legality_compliance: LegalityCompliance {
                    label: LegalityLabel::coerce(legality["label"].as_str()),
                    notes: string_or(
                        &legality["notes"],
                        "Model did not provide detailed legality notes.",
                    ),
                },
                math_real_impact: score_or_zero(&panel["mathRealImpact"]),
                risk_fragility: score_or_zero(&panel["riskFragility"]),
                practicality_friction: practicality_or_unknown(&panel["practicalityFriction"]),
                system_quirk_loophole: SystemQuirkLoophole {
                    uses_system_quirk: quirk["usesSystemQuirk"].as_bool().unwrap_or(false),
                    description: quirk["description"].as_str().map(str::to_string),
                    fragility_notes: string_list(&quirk["fragilityNotes"]),
                },
            },
            adherence: Adherence {
                level: AdherenceLevel::coerce(adherence["level"].as_str()),
                notes: string_or(&adherence["notes"], "No adherence notes provided."),
            },
            verdict: Verdict {
                label: VerdictLabel::coerce(verdict["label"].as_str()),
                headline: string_or(
                    &verdict["headline"],
                    "Model did not provide a verdict headline.",
                ),
                recommended_profiles: string_list(&verdict["recommendedProfiles"]),
                not_for_profiles: string_list(&verdict["notForProfiles"]),
            },
            key_points: KeyPoints {
                key_risks: key_risks_or_placeholder(&key_points["keyRisks"]),
            },
        }
    }

    fn normalize_legacy(&self, tree: &Value, country: &str) -> LegacyLabReport {
        let meta = &tree["meta"];
        let hack = &tree["hackNormalized"];
        let panel = &tree["evaluationPanel"];
        let legality = &panel["legalityCompliance"];
        let verdict = &tree["verdict"];
        let key_points = &tree["keyPoints"];

        LegacyLabReport {
            meta: self.normalize_meta(meta, country),
            hack_normalized: self.normalize_hack(hack),
            evaluation_panel: LegacyEvaluationPanel {
                legality_compliance: LegacyLegalityCompliance {
                    label: LegacyLegalityLabel::coerce(legality["label"].as_str()),
                    notes: string_or(
                        &legality["notes"],
                        "Model did not provide detailed legality notes.",
                    ),
                },
                math_real_impact: score_or_zero(&panel["mathRealImpact"]),
                risk_fragility: score_or_zero(&panel["riskFragility"]),
                practicality_friction: practicality_or_unknown(&panel["practicalityFriction"]),
                system_quirk_loophole: LegacySystemQuirkLoophole {
                    uses_system_quirk: panel["systemQuirkLoophole"]["usesSystemQuirk"]
                        .as_bool()
                        .unwrap_or(false),
                },
            },
            verdict: LegacyVerdict {
                label: LegacyVerdictLabel::coerce(verdict["label"].as_str()),
                headline: string_or(
                    &verdict["headline"],
                    "Model did not provide a verdict headline.",
                ),
            },
            key_points: KeyPoints {
                key_risks: key_risks_or_placeholder(&key_points["keyRisks"]),
            },
        }
    }

    fn normalize_meta(&self, meta: &Value, country: &str) -> ReportMeta {
        ReportMeta {
            // Never taken from input.
            version: SCHEMA_VERSION.to_string(),
            language: string_or(&meta["language"], "en"),
            country: string_or(&meta["country"], country),
        }
    }

    fn normalize_hack(&self, hack: &Value) -> HackNormalized {
        HackNormalized {
            title: string_or(&hack["title"], "Untitled hack"),
            short_summary: string_or(
                &hack["shortSummary"],
                "No short summary provided by the model.",
            ),
            detailed_summary: string_or(
                &hack["detailedSummary"],
                "No detailed summary provided by the model.",
            ),
            hack_type: HackType::coerce(hack["hackType"].as_str()),
            primary_category: string_or(&hack["primaryCategory"], "General"),
        }
    }
}

/// Legacy trees are recognized by their version tag.
fn is_legacy_tree(tree: &Value) -> bool {
    tree["meta"]["version"]
        .as_str()
        .is_some_and(|v| v.starts_with("1."))
}

fn string_or(value: &Value, default: &str) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| default.to_string())
}

fn score_or_zero(score: &Value) -> PanelScore {
    PanelScore::new(score["score0to10"].as_f64().unwrap_or(0.0))
}

/// An unknown practicality must not read as "impossibly impractical": a
/// default of 0 would force the coherence rules to demand a trash verdict
/// for every sparse tree. Mid-scale mirrors the fallback report.
const UNKNOWN_PRACTICALITY: f64 = 5.0;

fn practicality_or_unknown(score: &Value) -> PanelScore {
    PanelScore::new(
        score["score0to10"]
            .as_f64()
            .unwrap_or(UNKNOWN_PRACTICALITY),
    )
}

/// Non-array input becomes an empty list; non-string entries are dropped.
fn string_list(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Key risks must never come out empty: an empty list would read as "zero
/// risk", which is itself an unsafe implicit claim.
fn key_risks_or_placeholder(value: &Value) -> Vec<String> {
    let risks = string_list(value);
    if risks.is_empty() {
        vec!["Model did not explicitly list key risks.".to_string()]
    } else {
        risks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(tree: Value) -> LabReport {
        ReportNormalizer::new().normalize(&tree, "US")
    }

    #[test]
    fn empty_object_yields_fully_defaulted_report() {
        let report = normalize(json!({}));

        assert_eq!(report.meta.version, SCHEMA_VERSION);
        assert_eq!(report.meta.language, "en");
        assert_eq!(report.meta.country, "US");
        assert_eq!(report.hack_normalized.title, "Untitled hack");
        assert_eq!(report.hack_normalized.hack_type, HackType::Unknown);
        assert_eq!(report.hack_normalized.primary_category, "General");
        assert_eq!(
            report.evaluation_panel.legality_compliance.label,
            LegalityLabel::GrayArea
        );
        assert_eq!(report.evaluation_panel.math_real_impact.score_0_to_10, 0.0);
        assert_eq!(report.evaluation_panel.risk_fragility.score_0_to_10, 0.0);
        assert_eq!(
            report.evaluation_panel.practicality_friction.score_0_to_10,
            UNKNOWN_PRACTICALITY
        );
        assert!(!report.evaluation_panel.system_quirk_loophole.uses_system_quirk);
        assert_eq!(report.adherence.level, AdherenceLevel::Intermediate);
        assert_eq!(report.verdict.label, VerdictLabel::WorksIfProfileMatches);
        assert_eq!(
            report.key_points.key_risks,
            vec!["Model did not explicitly list key risks.".to_string()]
        );
    }

    #[test]
    fn preserves_provided_values() {
        let report = normalize(json!({
            "meta": { "language": "es", "country": "AR" },
            "hackNormalized": {
                "title": "Cashback stacking",
                "shortSummary": "Stack portals",
                "detailedSummary": "Stack shopping portals with card offers.",
                "hackType": "quick_fix",
                "primaryCategory": "Credit Cards"
            },
            "evaluationPanel": {
                "legalityCompliance": { "label": "clean", "notes": "Fine." },
                "mathRealImpact": { "score0to10": 7 },
                "riskFragility": { "score0to10": 2 },
                "practicalityFriction": { "score0to10": 8 },
                "systemQuirkLoophole": {
                    "usesSystemQuirk": true,
                    "description": "Portal tracking quirk",
                    "fragilityNotes": ["Portals drop offers"]
                }
            },
            "adherence": { "level": "easy", "notes": "Simple." },
            "verdict": {
                "label": "solid",
                "headline": "Stack away",
                "recommendedProfiles": ["Online shoppers"],
                "notForProfiles": ["Impulse buyers"]
            },
            "keyPoints": { "keyRisks": ["Tracking can fail"] }
        }));

        assert_eq!(report.meta.language, "es");
        assert_eq!(report.meta.country, "AR");
        assert_eq!(report.hack_normalized.hack_type, HackType::QuickFix);
        assert_eq!(report.evaluation_panel.math_real_impact.score_0_to_10, 7.0);
        assert_eq!(
            report.evaluation_panel.system_quirk_loophole.description,
            Some("Portal tracking quirk".to_string())
        );
        assert_eq!(report.verdict.label, VerdictLabel::Solid);
        assert_eq!(
            report.verdict.recommended_profiles,
            vec!["Online shoppers".to_string()]
        );
        assert_eq!(report.key_points.key_risks, vec!["Tracking can fail".to_string()]);
    }

    #[test]
    fn wrong_types_fall_back_to_defaults() {
        let report = normalize(json!({
            "hackNormalized": { "title": 42, "hackType": ["not", "a", "string"] },
            "evaluationPanel": {
                "mathRealImpact": { "score0to10": "nine" },
                "systemQuirkLoophole": { "usesSystemQuirk": "yes", "fragilityNotes": "oops" }
            },
            "verdict": { "label": 7, "headline": null },
            "keyPoints": { "keyRisks": "not a list" }
        }));

        assert_eq!(report.hack_normalized.title, "Untitled hack");
        assert_eq!(report.hack_normalized.hack_type, HackType::Unknown);
        assert_eq!(report.evaluation_panel.math_real_impact.score_0_to_10, 0.0);
        assert!(!report.evaluation_panel.system_quirk_loophole.uses_system_quirk);
        assert!(report
            .evaluation_panel
            .system_quirk_loophole
            .fragility_notes
            .is_empty());
        assert_eq!(report.verdict.label, VerdictLabel::WorksIfProfileMatches);
        assert_eq!(
            report.verdict.headline,
            "Model did not provide a verdict headline."
        );
        assert_eq!(
            report.key_points.key_risks,
            vec!["Model did not explicitly list key risks.".to_string()]
        );
    }

    #[test]
    fn version_is_always_overwritten() {
        let report = normalize(json!({ "meta": { "version": "9.9" } }));
        assert_eq!(report.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn non_string_list_entries_are_dropped() {
        let report = normalize(json!({
            "keyPoints": { "keyRisks": ["Real risk", 42, null, {"x": 1}] }
        }));
        assert_eq!(report.key_points.key_risks, vec!["Real risk".to_string()]);
    }

    #[test]
    fn legacy_tree_is_detected_and_upgraded() {
        let report = normalize(json!({
            "meta": { "version": "1.0", "language": "en", "country": "US" },
            "hackNormalized": { "title": "Old hack", "hackType": "system_loophole" },
            "evaluationPanel": {
                "legalityCompliance": { "label": "illegal", "notes": "Nope." },
                "riskFragility": { "score0to10": 9 }
            },
            "verdict": { "label": "works_only_if", "headline": "Careful" }
        }));

        // Upgraded to the current schema with legacy labels mapped.
        assert_eq!(report.meta.version, SCHEMA_VERSION);
        assert_eq!(
            report.evaluation_panel.legality_compliance.label,
            LegalityLabel::RedFlag
        );
        assert_eq!(report.verdict.label, VerdictLabel::WorksIfProfileMatches);
        assert_eq!(report.adherence.level, AdherenceLevel::Intermediate);
    }

    #[test]
    fn legacy_only_verdict_in_current_tree_coerces_to_neutral() {
        // Without the legacy version tag the current closed set applies.
        let report = normalize(json!({
            "verdict": { "label": "game_changer", "headline": "Wow" }
        }));
        assert_eq!(report.verdict.label, VerdictLabel::WorksIfProfileMatches);
    }

    #[test]
    fn normalize_versioned_reports_the_detected_schema() {
        let normalizer = ReportNormalizer::new();
        let legacy = normalizer.normalize_versioned(
            &json!({ "meta": { "version": "1.0" } }),
            "US",
        );
        assert!(matches!(legacy, VersionedLabReport::Legacy(_)));

        let current = normalizer.normalize_versioned(&json!({}), "US");
        assert!(matches!(current, VersionedLabReport::Current(_)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        // Arbitrary small JSON trees: scalars, arrays, and objects with
        // schema-ish and random keys.
        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
                (-1000i64..1000).prop_map(Value::from),
                (-50.0f64..50.0).prop_map(Value::from),
                "[a-zA-Z {}\"]{0,12}".prop_map(Value::from),
            ];
            leaf.prop_recursive(3, 24, 4, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
                    prop::collection::hash_map(
                        prop_oneof![
                            Just("meta".to_string()),
                            Just("hackNormalized".to_string()),
                            Just("evaluationPanel".to_string()),
                            Just("verdict".to_string()),
                            Just("keyPoints".to_string()),
                            Just("score0to10".to_string()),
                            Just("label".to_string()),
                            "[a-z]{1,8}",
                        ],
                        inner,
                        0..4
                    )
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            /// Normalization is total: any tree yields a report with the
            /// current schema tag and a non-empty key-risk list.
            #[test]
            fn normalization_is_total(tree in arb_json()) {
                let report = ReportNormalizer::new().normalize(&tree, "US");
                prop_assert_eq!(report.meta.version.as_str(), SCHEMA_VERSION);
                prop_assert!(!report.key_points.key_risks.is_empty());
            }
        }
    }
}
