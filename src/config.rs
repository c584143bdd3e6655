//! Environment-driven configuration for the terminal host.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `LEXICON_SAVE_DIR` | `.lexicon-save` | directory for the file blob store |
//! | `LEXICON_DISABLE_SAVE` | unset | `1`/`true` keeps everything in memory |
//! | `LEXICON_SPEECH_CMD` | unset | shell command printing one transcription |
//! | `LEXICON_LOG_PATH` | unset | log file (no logging when unset) |
//! | `LEXICON_TRANSITION_MS` | `3100` | cinematic length |
//!
//! Malformed values are replaced by the default and reported back by
//! [`AppConfig::load`], so the caller can log them once logging is up.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::{Persistence, StoreError};
use crate::store::FileStore;
use crate::types::TRANSITION_MS;

pub const DEFAULT_SAVE_DIR: &str = ".lexicon-save";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: expected a number of milliseconds, got {value:?}")]
    InvalidMillis { var: &'static str, value: String },

    #[error("{var}: expected 1/0/true/false, got {value:?}")]
    InvalidFlag { var: &'static str, value: String },

    #[error("cannot open save directory {dir}: {source}")]
    SaveDir {
        dir: PathBuf,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub save_dir: PathBuf,
    pub save_enabled: bool,
    pub speech_cmd: Option<String>,
    pub log_path: Option<PathBuf>,
    pub transition_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            save_enabled: true,
            speech_cmd: None,
            log_path: None,
            transition_ms: TRANSITION_MS,
        }
    }
}

impl AppConfig {
    /// Read the environment; rejected values come back alongside the config.
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::load(|var| std::env::var(var).ok())
    }

    /// Like [`AppConfig::load`], dropping the list of rejected values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::load(lookup).0
    }

    /// Build from any variable source (the environment, or a map in tests).
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> (Self, Vec<ConfigError>) {
        let defaults = Self::default();
        let mut rejected = Vec::new();
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let save_dir = get("LEXICON_SAVE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.save_dir);

        let save_enabled = get("LEXICON_DISABLE_SAVE")
            .and_then(|v| keep_ok(parse_flag("LEXICON_DISABLE_SAVE", &v), &mut rejected))
            .map(|disabled| !disabled)
            .unwrap_or(defaults.save_enabled);

        let transition_ms = get("LEXICON_TRANSITION_MS")
            .and_then(|v| keep_ok(parse_millis("LEXICON_TRANSITION_MS", &v), &mut rejected))
            .unwrap_or(defaults.transition_ms);

        let config = Self {
            save_dir,
            save_enabled,
            speech_cmd: get("LEXICON_SPEECH_CMD"),
            log_path: get("LEXICON_LOG_PATH").map(PathBuf::from),
            transition_ms,
        };
        (config, rejected)
    }

    /// Persistence backed by the save directory, or in memory when saving is disabled.
    pub fn open_persistence(&self) -> Result<Persistence, ConfigError> {
        if !self.save_enabled {
            return Ok(Persistence::in_memory());
        }
        let store = FileStore::open(&self.save_dir).map_err(|source| ConfigError::SaveDir {
            dir: self.save_dir.clone(),
            source,
        })?;
        Ok(Persistence::new(store))
    }
}

fn keep_ok<T>(parsed: Result<T, ConfigError>, rejected: &mut Vec<ConfigError>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(err) => {
            rejected.push(err);
            None
        }
    }
}

pub fn parse_millis(var: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidMillis {
        var,
        value: value.to_string(),
    })
}

pub fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), AppConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let cfg = config(&[
            ("LEXICON_SAVE_DIR", "/tmp/lexicon"),
            ("LEXICON_DISABLE_SAVE", "true"),
            ("LEXICON_SPEECH_CMD", "  whisper-once  "),
            ("LEXICON_LOG_PATH", "lexicon.log"),
            ("LEXICON_TRANSITION_MS", "0"),
        ]);
        assert_eq!(cfg.save_dir, PathBuf::from("/tmp/lexicon"));
        assert!(!cfg.save_enabled);
        assert_eq!(cfg.speech_cmd.as_deref(), Some("whisper-once"));
        assert_eq!(cfg.log_path, Some(PathBuf::from("lexicon.log")));
        assert_eq!(cfg.transition_ms, 0);
    }

    #[test]
    fn malformed_values_fall_back() {
        let cfg = config(&[
            ("LEXICON_TRANSITION_MS", "soon"),
            ("LEXICON_DISABLE_SAVE", "maybe"),
            ("LEXICON_SPEECH_CMD", "   "),
        ]);
        assert_eq!(cfg.transition_ms, TRANSITION_MS);
        assert!(cfg.save_enabled);
        assert_eq!(cfg.speech_cmd, None);
    }

    #[test]
    fn rejected_values_are_reported() {
        let (cfg, rejected) = AppConfig::load(|var| match var {
            "LEXICON_TRANSITION_MS" => Some("soon".into()),
            "LEXICON_DISABLE_SAVE" => Some("maybe".into()),
            "LEXICON_LOG_PATH" => Some("game.log".into()),
            _ => None,
        });
        assert_eq!(cfg.log_path, Some(PathBuf::from("game.log")));
        assert_eq!(rejected.len(), 2);
        assert!(matches!(
            rejected[0],
            ConfigError::InvalidFlag { var: "LEXICON_DISABLE_SAVE", .. }
        ));
        assert!(matches!(
            rejected[1],
            ConfigError::InvalidMillis { var: "LEXICON_TRANSITION_MS", .. }
        ));

        let (_, rejected) = AppConfig::load(|_| None);
        assert!(rejected.is_empty());
    }

    #[test]
    fn parse_errors_name_the_variable() {
        let err = parse_millis("LEXICON_TRANSITION_MS", "-5").unwrap_err();
        assert!(err.to_string().contains("LEXICON_TRANSITION_MS"));
        assert!(parse_flag("X", "TRUE").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
    }

    #[test]
    fn disabled_save_uses_memory() {
        let cfg = AppConfig {
            save_enabled: false,
            save_dir: PathBuf::from("/definitely/not/writable/\0"),
            ..AppConfig::default()
        };
        assert!(cfg.open_persistence().is_ok());
    }
}
