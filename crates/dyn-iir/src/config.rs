use serde::{Deserialize, Serialize};

use crate::error::{IirError, Result};

/// How much checking a [`DynamicIir`](crate::DynamicIir) performs per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// No validation pass; violations panic at the offending access.
    #[default]
    None,
    /// Validate buffer lengths and every coefficient index before filtering.
    Full,
}

/// Kernel settings, usually embedded in a host's JSON settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub validation: Validation,
}

impl KernelConfig {
    pub fn checked() -> Self {
        Self {
            validation: Validation::Full,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| IirError::Config(err.to_string()))?;
        tracing::debug!(validation = ?config.validation, "loaded kernel config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| IirError::Config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = KernelConfig::from_json_str("{}").unwrap();
        assert_eq!(config, KernelConfig::default());
        assert_eq!(config.validation, Validation::None);
    }

    #[test]
    fn validation_mode_round_trips_through_json() {
        let json = KernelConfig::checked().to_json_string().unwrap();
        assert!(json.contains("\"full\""));
        assert_eq!(
            KernelConfig::from_json_str(&json).unwrap(),
            KernelConfig::checked()
        );
    }

    #[test]
    fn unknown_mode_is_a_config_error() {
        let err = KernelConfig::from_json_str(r#"{"validation":"paranoid"}"#).unwrap_err();
        assert!(matches!(err, IirError::Config(_)));
    }
}
