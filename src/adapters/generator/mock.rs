//! Mock report generator for testing and local development.
//!
//! Configurable to return scripted raw output, inject errors, or emit a
//! canned valid report when the queue is empty. Tracks calls for
//! verification.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockReportGenerator::new()
//!     .with_raw_output("```json\n{...}\n```");
//!
//! let raw = generator.generate("stack bonuses", "US").await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationError, GeneratorInfo, ReportGenerator};

/// A scripted mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Raw(String),
    Error(MockError),
}

/// Injectable error kinds.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited,
    AuthenticationFailed,
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockError> for GenerationError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited => GenerationError::RateLimited,
            MockError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockError::Unavailable { message } => GenerationError::Unavailable { message },
            MockError::Network { message } => GenerationError::Network(message),
            MockError::Timeout { timeout_secs } => GenerationError::Timeout { timeout_secs },
        }
    }
}

/// Mock generator with scripted responses and call tracking.
#[derive(Debug, Clone)]
pub struct MockReportGenerator {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl Default for MockReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReportGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues raw model output to return.
    pub fn with_raw_output(self, raw: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Raw(raw.into()));
        self
    }

    /// Queues an error to return.
    pub fn with_error(self, err: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(err));
        self
    }

    /// Adds simulated latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Hack texts and countries this generator was called with.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// A complete, valid report used when the response queue is empty.
    /// Lets demos and smoke tests run the whole flow with no scripting.
    fn canned_report(hack_text: &str, country: &str) -> String {
        let title: String = hack_text.chars().take(60).collect();
        serde_json::json!({
            "meta": { "version": "2.0", "language": "en", "country": country },
            "hackNormalized": {
                "title": title,
                "shortSummary": "Mock analysis of the submitted hack.",
                "detailedSummary": "This analysis was produced by the mock backend. It exists so the full pipeline can run without a model API key.",
                "hackType": "unknown",
                "primaryCategory": "General"
            },
            "evaluationPanel": {
                "legalityCompliance": { "label": "clean", "notes": "Mock backend assumes nothing illegal." },
                "mathRealImpact": { "score0to10": 5 },
                "riskFragility": { "score0to10": 3 },
                "practicalityFriction": { "score0to10": 6 },
                "systemQuirkLoophole": { "usesSystemQuirk": false }
            },
            "adherence": { "level": "intermediate", "notes": "Mock adherence assessment." },
            "verdict": {
                "label": "works_if_profile_matches",
                "headline": "Mock verdict, do not rely on this analysis",
                "recommendedProfiles": [],
                "notForProfiles": []
            },
            "keyPoints": {
                "keyRisks": ["This report came from the mock backend and carries no real analysis."]
            }
        })
        .to_string()
    }
}

#[async_trait]
impl ReportGenerator for MockReportGenerator {
    async fn generate(&self, hack_text: &str, country: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((hack_text.to_owned(), country.to_owned()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front();

        match next {
            Some(MockResponse::Raw(raw)) => Ok(raw),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Ok(Self::canned_report(hack_text, country)),
        }
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("mock", "mock-model-1")
    }
}
