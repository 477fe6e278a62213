//! JSON request/response shapes shared by the CLI and the HTTP API

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::{LanguagePair, ResultSet};

/// Translation request body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub texts: Vec<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
}

impl TranslateRequest {
    /// Fill missing languages from the given defaults
    pub fn with_defaults(mut self, from: &str, to: &str) -> Self {
        if self.from.is_empty() {
            self.from = from.to_string();
        }
        if self.to.is_empty() {
            self.to = to.to_string();
        }
        self
    }

    pub fn languages(&self) -> LanguagePair {
        LanguagePair::new(self.from.clone(), self.to.clone())
    }

    /// The single `text` field, rejected when empty
    pub fn require_text(&self) -> Result<&str> {
        if self.text.is_empty() {
            return Err(TranslationError::InvalidInput {
                message: "Text field is required".to_string(),
            });
        }
        Ok(&self.text)
    }

    /// Inputs of a single-or-many request; `text` wins over `texts`
    pub fn inputs(&self) -> Result<Vec<String>> {
        if !self.text.is_empty() {
            Ok(vec![self.text.clone()])
        } else if !self.texts.is_empty() {
            Ok(self.texts.clone())
        } else {
            Err(TranslationError::InvalidInput {
                message: "Text or Texts field is required".to_string(),
            })
        }
    }
}

/// One entry of a batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    pub original: String,
    pub translated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Translation response body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub translated: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ResultItem>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(
        default,
        rename = "segmentCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub segment_count: Option<usize>,
}

impl TranslateResponse {
    /// Response for a request rejected before translation
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            ..Default::default()
        }
    }

    /// Response for a single translated text
    pub fn single(original: &str, result: &Result<String>, languages: &LanguagePair) -> Self {
        let mut response = Self {
            from: languages.from.clone(),
            to: languages.to.clone(),
            ..Default::default()
        };

        match result {
            Ok(translated) => {
                response.success = true;
                response.original = original.to_string();
                response.translated = translated.clone();
            }
            Err(e) => {
                response.error = e.to_string();
            }
        }

        response
    }

    /// Response for a batch; item failures are embedded per result
    pub fn batch(results: &ResultSet, languages: &LanguagePair) -> Self {
        Self {
            success: true,
            results: results
                .iter()
                .map(|outcome| ResultItem {
                    original: outcome.original.clone(),
                    translated: outcome.translated().to_string(),
                    error: outcome.error().map(ToString::to_string),
                })
                .collect(),
            from: languages.from.clone(),
            to: languages.to.clone(),
            ..Default::default()
        }
    }

    /// Response for a long text translated as sentence chunks
    pub fn joined(original: &str, results: &ResultSet, languages: &LanguagePair) -> Self {
        let mut response = Self {
            from: languages.from.clone(),
            to: languages.to.clone(),
            segment_count: Some(results.len()),
            ..Default::default()
        };

        match results.first_error() {
            Some((index, e)) => {
                response.error = format!("segment {} failed: {}", index, e);
            }
            None => {
                response.success = true;
                response.original = original.to_string();
                response.translated = results.joined("");
            }
        }

        response
    }
}
