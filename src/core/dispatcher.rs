//! Batch dispatcher: sequential or pooled execution with per-item isolation

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::client::TranslateBackend;
use crate::core::config::TranslatorConfig;
use crate::core::errors::TranslationError;
use crate::core::models::{LanguagePair, ResultSet, TranslationOutcome, TranslationRequest};
use crate::core::pool::WorkerPool;
use crate::core::timeout::translate_with_timeout;

/// How a batch gets executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Sequential,
    Pooled,
}

/// Translates batches of texts against a shared backend
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn TranslateBackend>,
    pool: WorkerPool,
    sequential_threshold: usize,
    timeout: Option<Duration>,
}

impl Dispatcher {
    /// Create a dispatcher with three workers, a sequential threshold of
    /// three and no per-item deadline
    pub fn new(backend: Arc<dyn TranslateBackend>) -> Self {
        Self {
            backend,
            pool: WorkerPool::new(3),
            sequential_threshold: 3,
            timeout: None,
        }
    }

    /// Create a dispatcher sized from configuration, without a deadline
    pub fn from_config(backend: Arc<dyn TranslateBackend>, config: &TranslatorConfig) -> Self {
        Self::new(backend)
            .with_workers(config.max_workers)
            .with_sequential_threshold(config.sequential_threshold)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.pool = WorkerPool::new(workers);
        self
    }

    pub fn with_sequential_threshold(mut self, threshold: usize) -> Self {
        self.sequential_threshold = threshold;
        self
    }

    /// Bound every backend call by `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn backend(&self) -> &Arc<dyn TranslateBackend> {
        &self.backend
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Strategy used for `request`
    pub fn strategy_for(&self, request: &TranslationRequest) -> Strategy {
        if request.active_len() <= self.sequential_threshold {
            Strategy::Sequential
        } else {
            Strategy::Pooled
        }
    }

    /// Translate every text of `request`.
    ///
    /// Never fails as a whole: the returned set has one outcome per input
    /// text, in input order, and item failures stay local to their outcome.
    pub async fn dispatch(&self, request: TranslationRequest) -> ResultSet {
        let strategy = self.strategy_for(&request);
        self.dispatch_with(request, strategy).await
    }

    /// Translate `request` with an explicit strategy
    pub async fn dispatch_with(&self, request: TranslationRequest, strategy: Strategy) -> ResultSet {
        let total = request.len();
        let (texts, languages) = request.into_parts();

        debug!(
            "Dispatching {} texts ({}) with {:?} strategy",
            total, languages, strategy
        );

        let outcomes = match strategy {
            Strategy::Sequential => self.run_sequential(texts, &languages).await,
            Strategy::Pooled => self.run_pooled(texts, languages).await,
        };

        let results = ResultSet::from_outcomes(outcomes);
        let failed = results.failure_count();
        if failed > 0 {
            warn!("{} of {} translations failed", failed, total);
        } else {
            info!("Translated {} texts", total);
        }

        results
    }

    async fn run_sequential(
        &self,
        texts: Vec<String>,
        languages: &LanguagePair,
    ) -> Vec<TranslationOutcome> {
        let mut outcomes = Vec::with_capacity(texts.len());
        for text in texts {
            outcomes.push(translate_item(self.backend.as_ref(), text, languages, self.timeout).await);
        }
        outcomes
    }

    async fn run_pooled(
        &self,
        texts: Vec<String>,
        languages: LanguagePair,
    ) -> Vec<TranslationOutcome> {
        let backend = Arc::clone(&self.backend);
        let languages = Arc::new(languages);
        let timeout = self.timeout;
        let originals = texts.clone();

        let slots = self
            .pool
            .run(texts, move |text: String| {
                let backend = Arc::clone(&backend);
                let languages = Arc::clone(&languages);
                async move { translate_item(backend.as_ref(), text, &languages, timeout).await }
            })
            .await;

        slots
            .into_iter()
            .zip(originals)
            .enumerate()
            .map(|(index, (slot, original))| {
                slot.unwrap_or_else(|| {
                    TranslationOutcome::failure(original, TranslationError::WorkerLost { index })
                })
            })
            .collect()
    }
}

/// Translate one item; empty text never reaches the backend
async fn translate_item(
    backend: &dyn TranslateBackend,
    text: String,
    languages: &LanguagePair,
    timeout: Option<Duration>,
) -> TranslationOutcome {
    if text.is_empty() {
        return TranslationOutcome::skipped();
    }

    let result = match timeout {
        Some(deadline) => {
            translate_with_timeout(backend, &text, &languages.from, &languages.to, deadline).await
        }
        None => backend.translate(&text, &languages.from, &languages.to).await,
    };

    match result {
        Ok(translated) => TranslationOutcome::success(text, translated),
        Err(e) => {
            warn!("Translation failed for '{}': {}", text, e);
            TranslationOutcome::failure(text, e)
        }
    }
}
