//! Application configuration.
//!
//! Resolution order (highest priority first):
//! 1. CLI flags
//! 2. Environment variables (`THCUNEWS_DELAY_MS`, `THCUNEWS_SEED`)
//! 3. Config file (`--config PATH`, else `thcunews.toml` in the working directory)
//! 4. Compiled defaults

use std::path::Path;

use serde::{Deserialize, Serialize};
use thcunews_models::mock::{SimulatorConfig, SimulatorConfigError};
use thcunews_models::ModelKind;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "thcunews.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },
    #[error("environment variable {var} has invalid value `{value}`")]
    Env { var: &'static str, value: String },
    #[error(transparent)]
    Invalid(#[from] SimulatorConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model selected when the shell starts.
    pub model: ModelKind,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub model: Option<ModelKind>,
    pub seed: Option<u64>,
    pub delay_ms: Option<u64>,
}

impl AppConfig {
    pub fn load(
        explicit: Option<&Path>,
        working_dir: &Path,
        cli: &CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = working_dir.join(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(|var| std::env::var(var).ok())?;
        config.apply_cli_overrides(cli);
        config.simulator.validate()?;

        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    fn from_toml(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::from_toml(&content, &display)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("THCUNEWS_DELAY_MS") {
            self.simulator.delay_ms = parse_env("THCUNEWS_DELAY_MS", value)?;
        }
        if let Some(value) = lookup("THCUNEWS_SEED") {
            self.simulator.seed = Some(parse_env("THCUNEWS_SEED", value)?);
        }
        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, cli: &CliOverrides) {
        if let Some(model) = cli.model {
            self.model = model;
        }
        if let Some(seed) = cli.seed {
            self.simulator.seed = Some(seed);
        }
        if let Some(delay_ms) = cli.delay_ms {
            self.simulator.delay_ms = delay_ms;
        }
    }
}

fn parse_env(var: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Env { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("", "<string>").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.simulator.delay_ms, 800);
        assert_eq!(config.model, ModelKind::Bert);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            model = "RoBERTa"

            [simulator]
            delay_ms = 0
            seed = 9
            "#,
            "<string>",
        )
        .unwrap();
        assert_eq!(config.model, ModelKind::Roberta);
        assert_eq!(config.simulator.delay_ms, 0);
        assert_eq!(config.simulator.seed, Some(9));
        assert_eq!(config.simulator.roberta_latency_offset_ms, 750);
    }

    #[test]
    fn bad_toml_is_a_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("model = 3", "<string>"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn env_then_cli_precedence() {
        let mut config = AppConfig::default();
        config
            .apply_env_overrides(|var| match var {
                "THCUNEWS_DELAY_MS" => Some("10".into()),
                "THCUNEWS_SEED" => Some(" 77 ".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.simulator.delay_ms, 10);
        assert_eq!(config.simulator.seed, Some(77));

        config.apply_cli_overrides(&CliOverrides {
            model: Some(ModelKind::Roberta),
            seed: None,
            delay_ms: Some(0),
        });
        assert_eq!(config.simulator.delay_ms, 0);
        assert_eq!(config.simulator.seed, Some(77));
        assert_eq!(config.model, ModelKind::Roberta);
    }

    #[test]
    fn malformed_env_value_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env_overrides(|var| (var == "THCUNEWS_SEED").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "THCUNEWS_SEED", .. }));
    }

    #[test]
    fn load_reads_default_file_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[simulator]\nconfidence_min = 0.3\n",
        )
        .unwrap();
        let err = AppConfig::load(None, dir.path(), &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_rejects_inverted_latency_offsets() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[simulator]\nbert_latency_offset_ms = 900\nroberta_latency_offset_ms = 100\n",
        )
        .unwrap();
        let err = AppConfig::load(None, dir.path(), &CliOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(SimulatorConfigError::LatencyOrder {
                bert: 900,
                roberta: 100
            })
        ));
    }

    #[test]
    fn out_of_range_offset_never_reaches_validation() {
        // TOML integers are i64, so u64::MAX fails at parse time.
        let err = AppConfig::from_toml(
            "[simulator]\nroberta_latency_offset_ms = 18446744073709551615\n",
            "<string>",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn load_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(
            None,
            dir.path(),
            &CliOverrides {
                delay_ms: Some(5),
                ..CliOverrides::default()
            },
        )
        .unwrap();
        assert_eq!(config.simulator.delay_ms, 5);
    }

    #[test]
    fn missing_explicit_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err =
            AppConfig::load(Some(&missing), dir.path(), &CliOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
