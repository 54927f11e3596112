//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `HACK_XRAY` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use hack_xray::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod generation;
mod safety;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use generation::{Backend, GenerationConfig};
pub use safety::SafetyConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Model backend configuration (OpenAI/Gemini/mock)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Safety screening configuration
    #[serde(default)]
    pub safety: SafetyConfig,

    /// Telemetry configuration (IP hashing salt)
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `HACK_XRAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `HACK_XRAY__GENERATION__GEMINI_API_KEY=...` -> `generation.gemini_api_key`
    /// - `HACK_XRAY__GENERATION__USE_MOCK=true` -> `generation.use_mock`
    /// - `HACK_XRAY__SAFETY__EXTRA_UNSAFE_PHRASES=a,b` -> `safety.extra_unsafe_phrases`
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("HACK_XRAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}
