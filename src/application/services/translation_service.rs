//! Per-message detect/translate orchestration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::application::errors::{ConfigError, LanguageError};
use crate::domain::entities::language::{self, AUTO};
use crate::domain::entities::ReplyOutcome;
use crate::domain::traits::LanguageService;

/// How the source language is resolved before translating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStrategy {
    /// Separate detect call; suppress when the detected code is the target.
    #[default]
    Detect,
    /// Translate with `source = "auto"`; suppress when the output equals the input.
    Auto,
}

impl SourceStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceStrategy::Detect => "detect",
            SourceStrategy::Auto => "auto",
        }
    }
}

impl FromStr for SourceStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "detect" => Ok(SourceStrategy::Detect),
            "auto" => Ok(SourceStrategy::Auto),
            other => Err(ConfigError::InvalidValue(format!(
                "unknown translation strategy '{}' (expected 'detect' or 'auto')",
                other
            ))),
        }
    }
}

/// Trimmed, case-folded form used for the equivalence check.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Service that turns one message text into a ReplyOutcome
pub struct TranslationService<L: LanguageService> {
    language: L,
    strategy: SourceStrategy,
    target: String,
}

impl<L: LanguageService> TranslationService<L> {
    pub fn new(language: L, strategy: SourceStrategy, target: impl Into<String>) -> Self {
        Self {
            language,
            strategy,
            target: target.into(),
        }
    }

    pub fn language(&self) -> &L {
        &self.language
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Run detection/translation for `text`. Never fails; errors become `Failed`.
    pub async fn process(&self, text: &str) -> ReplyOutcome {
        if text.trim().is_empty() {
            tracing::debug!("Suppressed: blank message");
            return ReplyOutcome::Suppressed;
        }

        let result = match self.strategy {
            SourceStrategy::Detect => self.detect_then_translate(text).await,
            SourceStrategy::Auto => self.auto_translate(text).await,
        };

        match result {
            Ok(Some(translated)) if !translated.trim().is_empty() => {
                ReplyOutcome::Translated(translated)
            }
            Ok(Some(_)) => {
                tracing::debug!("Suppressed: blank translation");
                ReplyOutcome::Suppressed
            }
            Ok(None) => ReplyOutcome::Suppressed,
            Err(e) => {
                tracing::warn!("Translation pipeline failed: {}", e);
                ReplyOutcome::Failed(e.to_string())
            }
        }
    }

    async fn detect_then_translate(&self, text: &str) -> Result<Option<String>, LanguageError> {
        let detection = self.language.detect(text).await?;
        tracing::debug!(
            "Detected {} (confidence {:?})",
            language::describe(&detection.language),
            detection.confidence
        );

        if language::same_language(&detection.language, &self.target) {
            tracing::debug!("Suppressed: already {}", language::describe(&self.target));
            return Ok(None);
        }

        let translated = self
            .language
            .translate(text, &detection.language, &self.target)
            .await?;
        Ok(Some(translated.text))
    }

    async fn auto_translate(&self, text: &str) -> Result<Option<String>, LanguageError> {
        let translated = self.language.translate(text, AUTO, &self.target).await?;

        if normalize(&translated.text) == normalize(text) {
            tracing::debug!("Suppressed: translation matches the message");
            return Ok(None);
        }
        Ok(Some(translated.text))
    }
}
