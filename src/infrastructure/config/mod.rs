//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;
use crate::application::services::SourceStrategy;
use crate::domain::entities::WatchedCategorySet;
use crate::infrastructure::language::ServiceConfig;

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub bot: BotConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    pub translation: TranslationConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct BotConfig {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiscordConfig {
    pub token: Option<String>,
}

/// What gets translated, and into which language
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct TranslationConfig {
    pub watched_categories: Vec<u64>,
    #[serde(default = "default_target")]
    pub target_language: String,
    #[serde(default)]
    pub strategy: SourceStrategy,
}

fn default_target() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                name: "lingo-bot".to_string(),
            },
            discord: DiscordConfig { token: None },
            translation: TranslationConfig {
                watched_categories: vec![1380497681688035450],
                target_language: default_target(),
                strategy: SourceStrategy::Detect,
            },
            service: ServiceConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    /// File at `path` when it exists, otherwise defaults; environment on top
    pub fn resolve(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Self::load_env();
        }

        let mut config = Self::load(path)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Defaults overlaid with environment variables
    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto this config
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(token) = var("DISCORD_TOKEN").filter(|t| !t.trim().is_empty()) {
            self.discord.token = Some(token);
        }

        if let Some(ids) = var("WATCHED_CATEGORY_IDS") {
            self.translation.watched_categories = parse_category_ids(&ids)?;
        }

        if let Some(target) = var("TARGET_LANGUAGE") {
            self.translation.target_language = target.trim().to_string();
        }

        if let Some(strategy) = var("TRANSLATE_STRATEGY") {
            self.translation.strategy = strategy.parse()?;
        }

        if let Some(url) = var("LIBRETRANSLATE_URL") {
            self.service.base_url = url;
        }

        if let Some(key) = var("LIBRETRANSLATE_API_KEY").filter(|k| !k.is_empty()) {
            self.service.api_key = Some(key);
        }

        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watched_categories().is_empty() {
            return Err(ConfigError::InvalidValue(
                "translation.watched-categories must not be empty".to_string(),
            ));
        }
        if self.translation.target_language.trim().is_empty() {
            return Err(ConfigError::MissingField("translation.target-language".to_string()));
        }
        if self.service.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("service.base-url".to_string()));
        }
        Ok(())
    }

    /// Discord token, required by `run`
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.discord
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField("discord.token".to_string()))
    }

    pub fn watched_categories(&self) -> WatchedCategorySet {
        self.translation.watched_categories.iter().copied().collect()
    }
}

/// Parse `"1, 2,3"` into category ids
pub fn parse_category_ids(raw: &str) -> Result<Vec<u64>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue(format!("invalid category id '{}'", s)))
        })
        .collect()
}
