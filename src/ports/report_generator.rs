//! Report Generator Port - interface for LLM backends.
//!
//! This port abstracts the model call that turns hack text into raw lab
//! report output. The generator returns the model's text verbatim; the
//! extraction, repair, and validation pipeline runs downstream of it, so a
//! generator has no opinion about schema or verdict rules.

use async_trait::async_trait;

/// Port for lab-report generation backends.
///
/// Implementations connect to an external model API (OpenAI, Gemini) or a
/// test double and return the model's raw textual output.
#[async_trait]
pub trait ReportGenerator: Send + Sync {
    /// Asks the model to analyze `hack_text` for a user in `country`.
    ///
    /// Returns the raw model output. An empty string is a valid return and
    /// means the model produced nothing; the pipeline degrades it to a
    /// fallback report.
    async fn generate(&self, hack_text: &str, country: &str) -> Result<String, GenerationError>;

    /// Backend identification for logs and diagnostics.
    fn generator_info(&self) -> GeneratorInfo;
}

/// Generator identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    /// Backend name (e.g. "openai", "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g. "gpt-4o-mini", "gemini-1.5-flash").
    pub model: String,
}

impl GeneratorInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generation backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the backend.
    #[error("rate limited by model backend")]
    RateLimited,

    /// API key or authentication failed.
    #[error("authentication with model backend failed")]
    AuthenticationFailed,

    /// Backend is unreachable or returned a server error.
    #[error("model backend unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Backend response did not have the expected envelope shape.
    #[error("unexpected backend response: {0}")]
    MalformedResponse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl GenerationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GenerationError::RateLimited.is_retryable());
        assert!(GenerationError::unavailable("503").is_retryable());
        assert!(GenerationError::network("reset").is_retryable());
        assert!(GenerationError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!GenerationError::AuthenticationFailed.is_retryable());
        assert!(!GenerationError::malformed_response("no candidates").is_retryable());
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            GenerationError::unavailable("status 503").to_string(),
            "model backend unavailable: status 503"
        );
        assert_eq!(
            GenerationError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
