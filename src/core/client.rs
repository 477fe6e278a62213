//! Translation backend trait and the Google Translate client

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};

/// External translation collaborator, invoked once per text
#[async_trait]
pub trait TranslateBackend: Send + Sync {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String>;
}

/// Client for the public Google Translate web endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    /// Create a new client
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl TranslateBackend for GoogleTranslator {
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String> {
        debug!("Requesting translation {} -> {} ({} chars)", from, to, text.chars().count());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", from),
                ("tl", to),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();

        if status.is_success() {
            let json: serde_json::Value = response
                .json()
                .await
                .map_err(|e| TranslationError::InvalidResponseError {
                    message: e.to_string(),
                })?;

            parse_translation(&json)
        } else {
            let status_code = status.as_u16();
            if status_code == 429 {
                return Err(TranslationError::RateLimitError);
            }

            let error_text = response.text().await.unwrap_or_default();
            Err(TranslationError::ApiError {
                status: status_code,
                message: error_text,
            })
        }
    }
}

/// Concatenate the translated fragments of a `translate_a/single` body.
///
/// The body is a nested array whose first element lists one entry per
/// sentence, each starting with the translated fragment.
fn parse_translation(json: &serde_json::Value) -> Result<String> {
    let sentences = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslationError::InvalidResponseError {
            message: "No translation in response".to_string(),
        })?;

    let translation: String = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(|t| t.as_str()))
        .collect();

    Ok(translation)
}
