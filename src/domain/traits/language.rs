use async_trait::async_trait;

use crate::application::errors::LanguageError;
use crate::domain::entities::{DetectionResult, TranslationResult};

/// LanguageService trait - abstraction over a remote detect/translate API
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// Top language guess for `text`.
    async fn detect(&self, text: &str) -> Result<DetectionResult, LanguageError>;

    /// Translate `text` from `source` (a code, or `"auto"`) into `target`.
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationResult, LanguageError>;
}
