//! Core data models for translation

use std::fmt;
use std::ops::Index;

use crate::core::errors::{Result, TranslationError};

/// Source/target language pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub from: String,
    pub to: String,
}

impl LanguagePair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Ordered batch of texts sharing one language pair
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    texts: Vec<String>,
    languages: LanguagePair,
}

impl TranslationRequest {
    pub fn new(texts: Vec<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            texts,
            languages: LanguagePair::new(from, to),
        }
    }

    /// Request holding a single text
    pub fn single(text: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(vec![text.into()], from, to)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn languages(&self) -> &LanguagePair {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// Number of items that will reach the backend
    pub fn active_len(&self) -> usize {
        self.texts.iter().filter(|t| !t.is_empty()).count()
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, LanguagePair) {
        (self.texts, self.languages)
    }
}

/// Result of translating one item
#[derive(Debug)]
pub struct TranslationOutcome {
    pub original: String,
    pub result: Result<String>,
}

impl TranslationOutcome {
    pub fn success(original: String, translated: String) -> Self {
        Self {
            original,
            result: Ok(translated),
        }
    }

    pub fn failure(original: String, error: TranslationError) -> Self {
        Self {
            original,
            result: Err(error),
        }
    }

    /// Outcome for an empty input; never touches the backend
    pub fn skipped() -> Self {
        Self::success(String::new(), String::new())
    }

    /// Translated text, empty when the item failed
    pub fn translated(&self) -> &str {
        match &self.result {
            Ok(text) => text,
            Err(_) => "",
        }
    }

    pub fn error(&self) -> Option<&TranslationError> {
        self.result.as_ref().err()
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes aligned 1:1 with the request texts
#[derive(Debug, Default)]
pub struct ResultSet {
    outcomes: Vec<TranslationOutcome>,
}

impl ResultSet {
    pub(crate) fn from_outcomes(outcomes: Vec<TranslationOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TranslationOutcome> {
        self.outcomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranslationOutcome> {
        self.outcomes.iter()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    /// First failed item, if any
    pub fn first_error(&self) -> Option<(usize, &TranslationError)> {
        self.outcomes
            .iter()
            .enumerate()
            .find_map(|(i, o)| o.error().map(|e| (i, e)))
    }

    /// Translations concatenated in input order
    pub fn joined(&self, separator: &str) -> String {
        self.outcomes
            .iter()
            .map(TranslationOutcome::translated)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Index<usize> for ResultSet {
    type Output = TranslationOutcome;

    fn index(&self, index: usize) -> &Self::Output {
        &self.outcomes[index]
    }
}

impl IntoIterator for ResultSet {
    type Item = TranslationOutcome;
    type IntoIter = std::vec::IntoIter<TranslationOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a TranslationOutcome;
    type IntoIter = std::slice::Iter<'a, TranslationOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}
