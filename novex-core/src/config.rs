//! Layered configuration: built-in defaults, an optional `novex.toml` in the
//! platform config directory, then `NOVEX_*` environment overrides. A `.env`
//! file is honored so the API key never has to live in the config file.

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NovexConfig {
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key for the hosted model. Falls back to the GEMINI_API_KEY or
    /// GOOGLE_API_KEY environment variables when absent.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_ms: default_tick_ms(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "novex=info".to_string()
}

fn default_theme() -> String {
    "Novex Dark".to_string()
}

fn default_tick_ms() -> u64 {
    250
}

impl NovexConfig {
    /// Load configuration from `novex.toml` and the environment.
    pub fn load() -> Result<Self, ConfigLoadError> {
        dotenvy::dotenv().ok();

        let config_file = get_config_dir().join("novex.toml");

        let mut cfg: NovexConfig = ConfigBuilder::builder()
            .add_source(File::from(config_file).required(false))
            .add_source(Environment::with_prefix("NOVEX").separator("__"))
            .build()?
            .try_deserialize()?;

        if cfg.llm.api_key.is_none() {
            cfg.llm.api_key = std::env::var("GEMINI_API_KEY")
                .or_else(|_| std::env::var("GOOGLE_API_KEY"))
                .ok();
        }

        Ok(cfg)
    }
}

/// Platform config directory for Novex (`~/.config/novex` on Linux).
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("novex")
}

/// Platform data directory for Novex, used for the TUI log file.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("novex")
}

/// Create the config directory if it does not exist yet.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = get_config_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Create the data directory if it does not exist yet.
pub fn ensure_data_dir() -> std::io::Result<PathBuf> {
    let dir = get_data_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = NovexConfig::default();
        assert_eq!(cfg.llm.model, "gemini-2.0-flash");
        assert_eq!(
            cfg.llm.base_url,
            "https://generativelanguage.googleapis.com"
        );
        assert_eq!(cfg.llm.timeout_secs, 30);
        assert!(cfg.llm.api_key.is_none());
        assert_eq!(cfg.logging.level, "novex=info");
        assert_eq!(cfg.tui.theme, "Novex Dark");
        assert_eq!(cfg.tui.tick_ms, 250);
    }

    #[test]
    fn test_config_dirs_end_with_novex() {
        assert!(get_config_dir().ends_with("novex"));
        assert!(get_data_dir().ends_with("novex"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: NovexConfig = toml::from_str(
            r#"
            [llm]
            model = "gemini-1.5-flash"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.llm.model, "gemini-1.5-flash");
        assert_eq!(cfg.llm.timeout_secs, 30);
        assert_eq!(cfg.tui.theme, "Novex Dark");
    }
}
