//! Configuration for law runs
//!
//! Loaded from TOML. Every field has a default, so an empty document is a
//! valid configuration.

use std::fs;
use std::path::Path;

use resumption_core::logging::{init_tracing, LogFormat};
use serde::{Deserialize, Serialize};

use crate::error::{LawError, LawResult};

//-----------------------------------------------------------------------------
// Configuration Structures
//-----------------------------------------------------------------------------

/// How many inputs to sample and how large they may grow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LawConfig {
    /// Sampled inputs per law
    pub samples: usize,
    /// Seed of the deterministic sampler
    pub seed: u64,
    /// Largest number of nested layers in a sampled structure
    pub max_depth: usize,
    /// Filter directives used by [`LawConfig::init_logging`]
    pub log_level: String,
    /// Emit JSON lines instead of pretty output
    pub json_logs: bool,
}

impl Default for LawConfig {
    fn default() -> Self {
        Self { samples: 64, seed: 0x5eed, max_depth: 5, log_level: "info".to_string(), json_logs: false }
    }
}

impl LawConfig {
    pub fn from_toml_str(source: &str) -> LawResult<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> LawResult<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Install the global tracing subscriber at `log_level`
    pub fn init_logging(&self) -> LawResult<()> {
        let format = if self.json_logs { LogFormat::Json } else { LogFormat::Pretty };
        init_tracing(&self.log_level, format).map_err(|e| LawError::Logging(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(LawConfig::from_toml_str("").ok(), Some(LawConfig::default()));
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = LawConfig::from_toml_str("samples = 8\nseed = 42").ok();
        assert_eq!(config, Some(LawConfig { samples: 8, seed: 42, ..LawConfig::default() }));
    }

    #[test]
    fn test_wrong_type_is_a_config_error() {
        let err = LawConfig::from_toml_str("samples = \"many\"").err();
        assert!(matches!(err, Some(LawError::Config(_))));
    }

    #[test]
    fn test_init_logging_reports_an_installed_subscriber() {
        resumption_core::logging::init_test_logging();
        let config = LawConfig { log_level: "resumption_laws=debug".into(), json_logs: true, ..LawConfig::default() };
        let err = config.init_logging().err();
        assert!(matches!(err, Some(LawError::Logging(_))));
        assert_eq!(err.map(|e| e.code()), Some(crate::error::codes::LOGGING));
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = LawConfig::from_file("/nonexistent/laws.toml").err();
        assert!(matches!(err, Some(LawError::Io(_))));
    }
}
