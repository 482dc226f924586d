//! Studio settings, read from a TOML file.
//!
//! Lookup order: the path in `SYNAPTIX_CONFIG`, then `synaptix.toml` in the
//! working directory. A missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const CONFIG_ENV: &str = "SYNAPTIX_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "synaptix.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which training engine a start hands its model to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Plays back a synthetic learning curve.
    Demo,
    /// Start only resets state and builds the model.
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub bind_addr: String,
    pub engine: EngineKind,
    /// Pause between demo epochs, so the charts animate.
    pub epoch_delay_ms: u64,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            bind_addr: "127.0.0.1:7878".to_owned(),
            engine: EngineKind::Demo,
            epoch_delay_ms: 150,
            log_filter: "info".to_owned(),
        }
    }
}

impl StudioConfig {
    pub fn epoch_delay(&self) -> Duration {
        Duration::from_millis(self.epoch_delay_ms)
    }

    /// Loads from `SYNAPTIX_CONFIG` or `synaptix.toml`.
    pub fn load() -> Result<StudioConfig, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        StudioConfig::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<StudioConfig, ConfigError> {
        if !path.exists() {
            return Ok(StudioConfig::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let cfg = StudioConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, StudioConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("synaptix.toml");
        std::fs::write(&path, "engine = \"none\"\nepoch_delay_ms = 5\n").unwrap();

        let cfg = StudioConfig::load_from(&path).unwrap();
        assert_eq!(cfg.engine, EngineKind::None);
        assert_eq!(cfg.epoch_delay(), Duration::from_millis(5));
        assert_eq!(cfg.bind_addr, "127.0.0.1:7878");
    }

    #[test]
    fn parse_errors_name_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "engine = \"quantum\"\n").unwrap();

        let err = StudioConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
