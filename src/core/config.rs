//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Default Google Translate web endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Configuration for translator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub endpoint: String,
    /// Upper bound on concurrent backend calls inside one batch
    pub max_workers: usize,
    /// Batches with at most this many non-empty items run sequentially
    pub sequential_threshold: usize,
    /// Per-item deadline on the HTTP path
    pub request_timeout_ms: u64,
    pub connect_timeout_ms: u64,
    pub default_from: String,
    pub default_to: String,
    pub max_segment_chars: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_workers: 3,
            sequential_threshold: 3,
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            default_from: "auto".to_string(),
            default_to: "en".to_string(),
            max_segment_chars: 500,
        }
    }
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid value for {}: {}", key, e)),
        _ => Ok(default),
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let config = Self {
            endpoint: env_or("TRANSLATE_ENDPOINT", defaults.endpoint)?,
            max_workers: env_or("MAX_WORKERS", defaults.max_workers)?,
            sequential_threshold: env_or("SEQUENTIAL_THRESHOLD", defaults.sequential_threshold)?,
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", defaults.request_timeout_ms)?,
            connect_timeout_ms: env_or("CONNECT_TIMEOUT_MS", defaults.connect_timeout_ms)?,
            default_from: env_or("DEFAULT_FROM", defaults.default_from)?,
            default_to: env_or("DEFAULT_TO", defaults.default_to)?,
            max_segment_chars: env_or("MAX_SEGMENT_CHARS", defaults.max_segment_chars)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file; missing fields fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.is_empty() {
            return Err(anyhow::anyhow!("endpoint is required"));
        }

        if self.max_workers == 0 {
            return Err(anyhow::anyhow!("max_workers must be greater than 0"));
        }

        if self.request_timeout_ms == 0 {
            return Err(anyhow::anyhow!("request_timeout_ms must be greater than 0"));
        }

        if self.max_segment_chars == 0 {
            return Err(anyhow::anyhow!("max_segment_chars must be greater than 0"));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}
