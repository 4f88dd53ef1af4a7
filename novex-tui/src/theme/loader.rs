use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::ThemeManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

fn default_theme_name() -> String {
    "Novex Dark".to_string()
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

/// Persists the theme choice to `theme.toml` in the Novex config directory.
pub struct ThemeLoader {
    config_path: PathBuf,
}

impl ThemeLoader {
    pub fn new() -> Self {
        let config_path = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("novex")
            .join("theme.toml");
        Self { config_path }
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> Result<ThemeConfig> {
        if !self.config_path.exists() {
            return Ok(ThemeConfig::default());
        }

        let contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read theme config from {:?}", self.config_path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse theme config from {:?}", self.config_path))
    }

    pub fn save(&self, config: &ThemeConfig) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize theme config")?;

        fs::write(&self.config_path, contents)
            .with_context(|| format!("Failed to write theme config to {:?}", self.config_path))
    }

    pub fn save_theme_name(&self, name: &str) -> Result<()> {
        self.save(&ThemeConfig {
            theme: name.to_string(),
        })
    }

    /// Build a `ThemeManager` honoring the saved preference, falling back to
    /// `fallback` (from novex.toml) when no preference file exists yet.
    pub fn initialize_theme_manager(&self, fallback: &str) -> ThemeManager {
        let mut manager = ThemeManager::new();

        let preferred = if self.config_path.exists() {
            match self.load() {
                Ok(config) => Some(config.theme),
                Err(e) => {
                    tracing::warn!("Failed to load theme preference: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let name = preferred.unwrap_or_else(|| fallback.to_string());
        if !manager.set_theme_by_name(&name) {
            tracing::warn!("Unknown theme '{}', using default", name);
        }

        manager
    }
}

impl Default for ThemeLoader {
    fn default() -> Self {
        Self::new()
    }
}
