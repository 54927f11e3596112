//! Generation backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the model backend that produces lab reports.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Force the mock backend even when API keys are set.
    #[serde(default)]
    pub use_mock: bool,

    /// Override the backend's default model identifier.
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// Which backend to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Mock,
    Gemini,
    OpenAI,
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Backend selection. Mock wins when forced, then Gemini, then OpenAI.
    pub fn backend(&self) -> Result<Backend, ValidationError> {
        if self.use_mock {
            return Ok(Backend::Mock);
        }
        if self.has_gemini() {
            return Ok(Backend::Gemini);
        }
        if self.has_openai() {
            return Ok(Backend::OpenAI);
        }
        Err(ValidationError::NoBackendConfigured)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        self.backend().map(|_| ())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            gemini_api_key: None,
            use_mock: false,
            model: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = GenerationConfig::default();
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 3);
        assert!(!config.use_mock);
    }

    #[test]
    fn backend_priority_is_mock_then_gemini_then_openai() {
        let both = GenerationConfig {
            openai_api_key: Some("sk-x".into()),
            gemini_api_key: Some("g-x".into()),
            ..GenerationConfig::default()
        };
        assert_eq!(both.backend(), Ok(Backend::Gemini));

        let forced_mock = GenerationConfig {
            use_mock: true,
            ..both.clone()
        };
        assert_eq!(forced_mock.backend(), Ok(Backend::Mock));

        let openai_only = GenerationConfig {
            openai_api_key: Some("sk-x".into()),
            ..GenerationConfig::default()
        };
        assert_eq!(openai_only.backend(), Ok(Backend::OpenAI));
    }

    #[test]
    fn empty_keys_do_not_count_as_configured() {
        let config = GenerationConfig {
            openai_api_key: Some(String::new()),
            gemini_api_key: Some(String::new()),
            ..GenerationConfig::default()
        };
        assert_eq!(config.backend(), Err(ValidationError::NoBackendConfigured));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = GenerationConfig {
            use_mock: true,
            timeout_secs: 0,
            ..GenerationConfig::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }
}
