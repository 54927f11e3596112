//! Gemini generator - lab reports via the generateContent API.
//!
//! Gemini takes the whole prompt as a single user turn and is forced into
//! JSON with `responseMimeType`. The API sometimes returns a candidate with
//! no text at all; that surfaces as an empty string so the pipeline degrades
//! it to a fallback report instead of failing the request.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::adapters::generator::prompt;
use crate::ports::{GenerationError, GeneratorInfo, ReportGenerator};

/// Configuration for the Gemini generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gemini-2.0-flash-exp".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini-backed report generator.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }

    async fn send_request(
        &self,
        hack_text: &str,
        country: &str,
    ) -> Result<Response, GenerationError> {
        let full_prompt = format!(
            "{}\n\n{}",
            prompt::system_prompt(country),
            prompt::user_prompt(hack_text, country)
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: full_prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 8192,
                response_mime_type: "application/json".to_string(),
            },
        };

        self.client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    GenerationError::network(format!("connection failed: {e}"))
                } else {
                    GenerationError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(GenerationError::AuthenticationFailed),
            429 => Err(GenerationError::RateLimited),
            500..=599 => Err(GenerationError::unavailable(format!(
                "server error {status}: {error_body}"
            ))),
            _ => Err(GenerationError::malformed_response(format!(
                "unexpected status {status}: {error_body}"
            ))),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<String, GenerationError> {
        let response = self.handle_response_status(response).await?;

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::malformed_response(format!("bad envelope: {e}")))?;

        // Candidates can arrive with empty parts even on success. Empty
        // output is a pipeline concern, not a transport error.
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            tracing::warn!("Gemini returned a response with no text parts");
        }

        Ok(text)
    }
}

#[async_trait]
impl ReportGenerator for GeminiGenerator {
    async fn generate(&self, hack_text: &str, country: &str) -> Result<String, GenerationError> {
        let mut last_error = GenerationError::network("no attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.send_request(hack_text, country).await {
                Ok(response) => match self.parse_response(response).await {
                    Ok(raw) => return Ok(raw),
                    Err(err) => {
                        if !err.is_retryable() || retry_count >= self.config.max_retries {
                            return Err(err);
                        }
                        last_error = err;
                    }
                },
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            let delay = Duration::from_secs(1 << retry_count);
            tracing::debug!(attempt = retry_count + 1, ?delay, "retrying Gemini request");
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn generator_info(&self) -> GeneratorInfo {
        GeneratorInfo::new("gemini", &self.config.model)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.model, "gemini-2.0-flash-exp");
        assert!(config.base_url.ends_with("/v1beta"));
    }

    #[test]
    fn generate_url_includes_model_and_action() {
        let generator = GeminiGenerator::new(
            GeminiConfig::new("key").with_base_url("http://localhost:9999/v1beta"),
        )
        .unwrap();
        assert_eq!(
            generator.generate_url(),
            "http://localhost:9999/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );
    }

    #[test]
    fn generation_config_uses_camel_case_wire_names() {
        let config = GenerationConfig {
            temperature: 0.2,
            max_output_tokens: 8192,
            response_mime_type: "application/json".to_string(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["maxOutputTokens"], 8192);
        assert_eq!(json["responseMimeType"], "application/json");
    }

    #[test]
    fn empty_candidates_parse_to_empty_text() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(body.candidates.is_empty());

        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":null}]}"#).unwrap();
        assert!(body.candidates[0].content.is_none());
    }

    #[test]
    fn debug_output_hides_the_api_key() {
        let config = GeminiConfig::new("super-secret-key");
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }
}
