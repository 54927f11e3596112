//! Analysis telemetry.
//!
//! Every completed analysis emits an [`XRayEvent`] carrying its verdict and
//! panel scores for aggregate stats. Events never contain the hack text or a
//! raw client IP; the IP is keyed through HMAC-SHA256 before it gets near an
//! event.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::report::{AdherenceLevel, LabReport, LegalityLabel, VerdictLabel};

type HmacSha256 = Hmac<Sha256>;

/// How the hack text reached the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Text,
    Link,
    YoutubeTranscript,
}

impl SourceType {
    /// Classifies a submission by its optional source link.
    pub fn from_link(source_link: Option<&str>) -> Self {
        match source_link {
            Some(link) if link.contains("youtube.com") || link.contains("youtu.be") => {
                Self::YoutubeTranscript
            }
            Some(_) => Self::Link,
            None => Self::Text,
        }
    }
}

/// One analytics record per completed analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XRayEvent {
    pub id: Uuid,
    pub report_id: Option<Uuid>,
    pub submitted_at: DateTime<Utc>,
    pub source_type: SourceType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_host: Option<String>,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub client_ip_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_agent: Option<String>,
    pub verdict_label: VerdictLabel,
    pub legality_label: LegalityLabel,
    #[serde(rename = "mathScore0to10")]
    pub math_score_0_to_10: f64,
    #[serde(rename = "riskScore0to10")]
    pub risk_score_0_to_10: f64,
    #[serde(rename = "practicalityScore0to10")]
    pub practicality_score_0_to_10: f64,
    pub primary_category: String,
    pub adherence_level: AdherenceLevel,
    pub created_at: DateTime<Utc>,
}

/// Inputs for [`build_xray_event`] that do not come from the report itself.
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    pub report_id: Option<Uuid>,
    pub source_link: Option<String>,
    pub client_ip_hash: Option<String>,
    pub user_agent: Option<String>,
}

/// Builds the telemetry event for a finished analysis.
pub fn build_xray_event(report: &LabReport, context: EventContext) -> XRayEvent {
    let now = Utc::now();
    let panel = &report.evaluation_panel;

    XRayEvent {
        id: Uuid::new_v4(),
        report_id: context.report_id,
        submitted_at: now,
        source_type: SourceType::from_link(context.source_link.as_deref()),
        source_host: context.source_link.as_deref().and_then(host_of),
        country: report.meta.country.clone(),
        client_ip_hash: context.client_ip_hash,
        user_agent: context.user_agent,
        verdict_label: report.verdict.label,
        legality_label: panel.legality_compliance.label,
        math_score_0_to_10: panel.math_real_impact.score_0_to_10,
        risk_score_0_to_10: panel.risk_fragility.score_0_to_10,
        practicality_score_0_to_10: panel.practicality_friction.score_0_to_10,
        primary_category: report.hack_normalized.primary_category.clone(),
        adherence_level: report.adherence.level,
        created_at: now,
    }
}

/// Keyed hash of a client IP. Same IP and salt give the same digest, so
/// events from one client correlate without storing the address.
pub fn hash_client_ip(ip: &str, salt: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).expect("HMAC accepts any key");
    mac.update(ip.as_bytes());
    hex_encode(&mac.finalize().into_bytes())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Host portion of a URL, without scheme, userinfo, port, or path.
fn host_of(link: &str) -> Option<String> {
    let after_scheme = link.split_once("://").map_or(link, |(_, rest)| rest);
    let authority = after_scheme.split(['/', '?', '#']).next()?;
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = host.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_owned())
    }
}
