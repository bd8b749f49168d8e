//! Language service configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public LibreTranslate instance
pub const DEFAULT_BASE_URL: &str = "https://libretranslate.com";

/// Connection settings for a LibreTranslate-compatible service
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServiceConfig {
    /// Base URL; `/detect` and `/translate` are appended
    pub base_url: String,
    /// Sent as `api_key` when the instance requires one
    pub api_key: Option<String>,
    pub detect_timeout_ms: u64,
    pub translate_timeout_ms: u64,
    /// Fixed pause before the single translate retry
    pub retry_backoff_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            detect_timeout_ms: 5_000,
            translate_timeout_ms: 10_000,
            retry_backoff_ms: 1_000,
        }
    }
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeouts(mut self, detect: Duration, translate: Duration) -> Self {
        self.detect_timeout_ms = detect.as_millis() as u64;
        self.translate_timeout_ms = translate.as_millis() as u64;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff_ms = backoff.as_millis() as u64;
        self
    }

    pub fn detect_timeout(&self) -> Duration {
        Duration::from_millis(self.detect_timeout_ms)
    }

    pub fn translate_timeout(&self) -> Duration {
        Duration::from_millis(self.translate_timeout_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Full URL for an endpoint such as `detect`.
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
}
