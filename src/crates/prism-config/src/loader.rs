//! Loads [`PrismConfig`] from a TOML file, falling back to defaults for
//! any table or field the file omits.

use crate::error::{ConfigError, Result};
use crate::schema::PrismConfig;
use std::path::Path;
use tracing::{debug, info};

/// Load configuration from `path`. Missing fields/tables fall back to
/// their defaults via `#[serde(default)]`; environment interpolation in
/// `llm.host` is resolved after parsing.
pub fn load_config(path: &Path) -> Result<PrismConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Read { path: path.display().to_string(), source: e })?;

    let mut config: PrismConfig = toml::from_str(&contents)
        .map_err(|e| ConfigError::Parse { path: path.display().to_string(), source: e })?;

    debug!(path = %path.display(), "loaded config file");
    config.resolve_env_vars();
    config.validate()?;
    info!("configuration loaded");

    Ok(config)
}

/// Load configuration from `path` if it exists, otherwise return
/// defaults. Used for optional `--config` flags.
pub fn load_config_or_default(path: Option<&Path>) -> Result<PrismConfig> {
    match path {
        Some(path) if path.exists() => load_config(path),
        Some(path) => {
            debug!(path = %path.display(), "config file not found, using defaults");
            let mut config = PrismConfig::default();
            config.resolve_env_vars();
            config.validate()?;
            Ok(config)
        }
        None => {
            let mut config = PrismConfig::default();
            config.resolve_env_vars();
            config.validate()?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_overrides_from_a_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prism.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            [llm]
            model_id = "llama3"

            [simulation]
            max_rounds = 10
            "#
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.llm.model_id, "llama3");
        assert_eq!(config.simulation.max_rounds, 10);
        // Untouched fields keep their defaults.
        assert_eq!(config.llm.provider, "ollama");
    }

    #[test]
    fn missing_file_errors() {
        let err = load_config(Path::new("/nonexistent/prism.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn missing_optional_file_falls_back_to_defaults() {
        let config = load_config_or_default(Some(Path::new("/nonexistent/prism.toml"))).unwrap();
        assert_eq!(config.llm.provider, "ollama");
    }

    #[test]
    fn invalid_toml_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not valid [[[ toml").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn out_of_range_feed_size_fails_fast_instead_of_clamping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prism.toml");
        std::fs::write(
            &path,
            r#"
            [rag]
            feed_size = 50
            "#,
        )
        .unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "rag.feed_size", .. }));
    }
}
