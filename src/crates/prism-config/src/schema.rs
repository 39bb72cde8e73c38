//! The root TOML configuration schema.

use crate::error::{ConfigError, Result};
use prism_feed::RankingConfig;
use prism_sim::SimulationConfig;
use serde::{Deserialize, Serialize};

/// Root configuration for a PRISM run, loaded from a single TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrismConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub rag: RagConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Chat-model connection settings. `host` supports `${VAR}` environment
/// interpolation, resolved by [`PrismConfig::resolve_env_vars`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: String,
    pub host: String,
    pub model_id: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub seed: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".to_string(),
            host: "http://localhost:11434".to_string(),
            model_id: "mistral".to_string(),
            temperature: 0.7,
            max_tokens: 512,
            seed: None,
        }
    }
}

/// Feed/vector-store settings. `mode` lives on [`RankingConfig`] rather
/// than being duplicated at this level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub collection_name: String,
    pub embedding_model: String,
    pub embedding_provider: String,
    pub persist_directory: Option<String>,
    pub feed_size: usize,
    pub ollama_timeout_secs: f64,
    pub ranking: RankingConfig,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            collection_name: "posts".to_string(),
            embedding_model: "all-MiniLM-L6-v2".to_string(),
            embedding_provider: "sentence-transformers".to_string(),
            persist_directory: None,
            feed_size: 5,
            ollama_timeout_secs: 30.0,
            ranking: RankingConfig::default(),
        }
    }
}

/// `tracing-subscriber` initialization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
            timestamps: true,
        }
    }
}

impl PrismConfig {
    /// Resolve `${VAR_NAME}` environment interpolation in string fields
    /// that plausibly carry secrets or host-specific values.
    pub fn resolve_env_vars(&mut self) {
        self.llm.host = Self::expand_env_var(&self.llm.host);
    }

    fn expand_env_var(value: &str) -> String {
        if let Some(var_name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
            std::env::var(var_name).unwrap_or_else(|_| value.to_string())
        } else {
            value.to_string()
        }
    }

    /// Fail fast on numeric ranges that would otherwise be silently
    /// clamped or misbehave deep in `prism-llm`/`prism-feed`.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()?;
        self.rag.validate()
    }
}

impl LlmConfig {
    fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::OutOfRange {
                field: "llm.temperature",
                constraint: "between 0.0 and 2.0",
                value: self.temperature.to_string(),
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::OutOfRange {
                field: "llm.max_tokens",
                constraint: "greater than 0",
                value: self.max_tokens.to_string(),
            });
        }
        Ok(())
    }
}

impl RagConfig {
    fn validate(&self) -> Result<()> {
        if !(1..=20).contains(&self.feed_size) {
            return Err(ConfigError::OutOfRange {
                field: "rag.feed_size",
                constraint: "between 1 and 20",
                value: self.feed_size.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PrismConfig::default();
        assert_eq!(config.llm.provider, "ollama");
        assert_eq!(config.llm.model_id, "mistral");
        assert_eq!(config.rag.feed_size, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn env_var_in_host_is_expanded() {
        let mut config = PrismConfig::default();
        config.llm.host = "${PRISM_TEST_HOST}".to_string();

        std::env::set_var("PRISM_TEST_HOST", "http://example.test:11434");
        config.resolve_env_vars();
        std::env::remove_var("PRISM_TEST_HOST");

        assert_eq!(config.llm.host, "http://example.test:11434");
    }

    #[test]
    fn non_interpolated_host_is_left_alone() {
        let mut config = PrismConfig::default();
        config.resolve_env_vars();
        assert_eq!(config.llm.host, "http://localhost:11434");
    }

    #[test]
    fn default_config_validates() {
        assert!(PrismConfig::default().validate().is_ok());
    }

    #[test]
    fn temperature_out_of_range_fails_validation() {
        let mut config = PrismConfig::default();
        config.llm.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "llm.temperature", .. }));
    }

    #[test]
    fn zero_max_tokens_fails_validation() {
        let mut config = PrismConfig::default();
        config.llm.max_tokens = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "llm.max_tokens", .. }));
    }

    #[test]
    fn feed_size_out_of_range_fails_validation() {
        let mut config = PrismConfig::default();
        config.rag.feed_size = 21;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "rag.feed_size", .. }));

        config.rag.feed_size = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "rag.feed_size", .. }));
    }
}
