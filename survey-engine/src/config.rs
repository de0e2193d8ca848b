//! Engine configuration.
//!
//! Supports loading from environment variables with the `SURVEY_ENGINE_` prefix.

use std::env;

use serde::{Deserialize, Serialize};

/// Default prefix put in front of a failed submission's error text.
pub const DEFAULT_SUBMIT_ERROR_PREFIX: &str = "Failed to submit survey: ";

/// Default survey type whose public submissions use the elevated gateway.
pub const DEFAULT_ELEVATED_SURVEY_TYPE: &str = "recovery_intake";

/// Runtime and submission-routing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Prefix for the inline error shown when a submission fails.
    pub submit_error_prefix: String,

    /// Survey type routed through the elevated gateway.
    pub elevated_survey_type: String,

    /// Survey types the standard access policy refuses for anonymous writes.
    pub protected_survey_types: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            submit_error_prefix: DEFAULT_SUBMIT_ERROR_PREFIX.to_string(),
            elevated_survey_type: DEFAULT_ELEVATED_SURVEY_TYPE.to_string(),
            protected_survey_types: vec![DEFAULT_ELEVATED_SURVEY_TYPE.to_string()],
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - SURVEY_ENGINE_SUBMIT_ERROR_PREFIX: inline submit error prefix
    /// - SURVEY_ENGINE_ELEVATED_SURVEY_TYPE: survey type using the elevated gateway
    /// - SURVEY_ENGINE_PROTECTED_SURVEY_TYPES: comma-separated protected survey types
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let protected_survey_types = lookup("SURVEY_ENGINE_PROTECTED_SURVEY_TYPES")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or(defaults.protected_survey_types);

        Self {
            submit_error_prefix: lookup("SURVEY_ENGINE_SUBMIT_ERROR_PREFIX")
                .unwrap_or(defaults.submit_error_prefix),
            elevated_survey_type: lookup("SURVEY_ENGINE_ELEVATED_SURVEY_TYPE")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.elevated_survey_type),
            protected_survey_types,
        }
    }

    pub fn with_submit_error_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.submit_error_prefix = prefix.into();
        self
    }

    pub fn with_elevated_survey_type(mut self, survey_type: impl Into<String>) -> Self {
        self.elevated_survey_type = survey_type.into();
        self
    }

    pub fn with_protected_survey_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protected_survey_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Check if submissions of this type go through the elevated gateway.
    pub fn is_elevated(&self, survey_type: &str) -> bool {
        self.elevated_survey_type == survey_type
    }

    /// Check if the standard policy refuses this survey type.
    pub fn is_protected(&self, survey_type: &str) -> bool {
        self.protected_survey_types.iter().any(|t| t == survey_type)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.submit_error_prefix, "Failed to submit survey: ");
        assert!(config.is_elevated("recovery_intake"));
        assert!(config.is_protected("recovery_intake"));
        assert!(!config.is_protected("workshop_feedback"));
    }

    #[test]
    fn unset_variables_keep_defaults() {
        assert_eq!(
            EngineConfig::from_lookup(lookup_from(&[])),
            EngineConfig::default()
        );
    }

    #[test]
    fn reads_prefixed_variables() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("SURVEY_ENGINE_SUBMIT_ERROR_PREFIX", "Oops: "),
            ("SURVEY_ENGINE_ELEVATED_SURVEY_TYPE", " intake "),
            ("SURVEY_ENGINE_PROTECTED_SURVEY_TYPES", "intake, case_notes,,"),
        ]));

        assert_eq!(config.submit_error_prefix, "Oops: ");
        assert_eq!(config.elevated_survey_type, "intake");
        assert_eq!(config.protected_survey_types, vec!["intake", "case_notes"]);
    }

    #[test]
    fn blank_elevated_type_is_ignored() {
        let config =
            EngineConfig::from_lookup(lookup_from(&[("SURVEY_ENGINE_ELEVATED_SURVEY_TYPE", "  ")]));
        assert_eq!(config.elevated_survey_type, DEFAULT_ELEVATED_SURVEY_TYPE);
    }

    #[test]
    fn deserializes_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"submitErrorPrefix": "Could not send: "}"#).unwrap();
        assert_eq!(config.submit_error_prefix, "Could not send: ");
        assert_eq!(config.elevated_survey_type, DEFAULT_ELEVATED_SURVEY_TYPE);
    }
}
