//! LibreTranslate client - detect and translate over HTTP

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::{LanguageError, ServiceError};
use crate::domain::entities::{DetectionResult, TranslationResult};
use crate::domain::traits::LanguageService;
use crate::infrastructure::language::ServiceConfig;

/// Translate is tried at most this many times.
const TRANSLATE_ATTEMPTS: u32 = 2;

/// Detect request; `q` uses the array form.
#[derive(Serialize)]
struct DetectRequest<'a> {
    q: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// One language guess
#[derive(Deserialize, Debug)]
struct Guess {
    language: String,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Instances answer with either a flat list or one list per input.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum DetectResponse {
    Flat(Vec<Guess>),
    Nested(Vec<Vec<Guess>>),
}

impl DetectResponse {
    /// Highest-ranked guess for the first input.
    fn top(self) -> Option<Guess> {
        match self {
            DetectResponse::Flat(guesses) => guesses.into_iter().next(),
            DetectResponse::Nested(lists) => lists.into_iter().next()?.into_iter().next(),
        }
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
}

/// Error body returned by LibreTranslate on 4xx/5xx
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for a LibreTranslate-compatible service
pub struct LibreTranslateClient {
    config: ServiceConfig,
    client: Client,
}

impl LibreTranslateClient {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// POST `body` as JSON and decode the reply, bounded by `timeout`.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<T, ServiceError> {
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                ServiceError::Timeout(timeout)
            } else {
                ServiceError::Transport(e.to_string())
            }
        };

        let response = self
            .client
            .post(self.config.endpoint(endpoint))
            .header("Content-Type", "application/json")
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let body = serde_json::from_str::<ErrorBody>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&text).map_err(|e| ServiceError::Malformed(e.to_string()))
    }

    async fn detect_once(&self, text: &str) -> Result<DetectionResult, ServiceError> {
        let request = DetectRequest {
            q: [text],
            api_key: self.config.api_key.as_deref(),
        };

        let response: DetectResponse = self
            .post_json("detect", &request, self.config.detect_timeout())
            .await?;

        let guess = response
            .top()
            .ok_or_else(|| ServiceError::Malformed("empty detection list".to_string()))?;
        if guess.language.trim().is_empty() {
            return Err(ServiceError::Malformed("blank language code".to_string()));
        }

        let mut result = DetectionResult::new(guess.language);
        result.confidence = guess.confidence;
        Ok(result)
    }

    async fn translate_once(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationResult, ServiceError> {
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        let response: TranslateResponse = self
            .post_json("translate", &request, self.config.translate_timeout())
            .await?;

        Ok(TranslationResult::new(response.translated_text))
    }
}

#[async_trait]
impl LanguageService for LibreTranslateClient {
    async fn detect(&self, text: &str) -> Result<DetectionResult, LanguageError> {
        self.detect_once(text)
            .await
            .map_err(LanguageError::DetectionFailed)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationResult, LanguageError> {
        let backoff = self.config.retry_backoff();
        let mut attempt = 1;

        loop {
            match self.translate_once(text, source, target).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < TRANSLATE_ATTEMPTS => {
                    tracing::warn!(
                        "Translate attempt {} failed: {}, retrying in {:?}",
                        attempt,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(LanguageError::TranslationFailed(e)),
            }
        }
    }
}
