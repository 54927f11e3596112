//! Safety screening configuration

use serde::Deserialize;

/// Configuration for the unsafe-phrase screener.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SafetyConfig {
    /// Phrases added on top of the built-in blacklist.
    /// Set as a comma-separated list in the environment.
    #[serde(default)]
    pub extra_unsafe_phrases: Option<String>,
}

impl SafetyConfig {
    /// Parses the configured extra phrases, trimming whitespace and
    /// dropping empty entries.
    pub fn extra_phrases(&self) -> Vec<String> {
        self.extra_unsafe_phrases
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned)
            .collect()
    }
}
