//! Telemetry configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Configuration for analysis telemetry.
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Salt for HMAC hashing of client IPs. Override in production.
    #[serde(default = "default_salt")]
    pub ip_hash_salt: String,
}

impl TelemetryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.ip_hash_salt.is_empty() {
            return Err(ValidationError::EmptyIpHashSalt);
        }
        Ok(())
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            ip_hash_salt: default_salt(),
        }
    }
}

fn default_salt() -> String {
    "default_salt_change_me".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_salt_passes_validation() {
        assert!(TelemetryConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_salt_fails_validation() {
        let config = TelemetryConfig {
            ip_hash_salt: String::new(),
        };
        assert_eq!(config.validate(), Err(ValidationError::EmptyIpHashSalt));
    }
}
