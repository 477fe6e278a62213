//! Instrumented fake backends shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use translate_relay::core::errors::{Result, TranslationError};
use translate_relay::TranslateBackend;

/// Backend that records calls and in-flight concurrency.
///
/// Translations are `"<to>:<text>"`. Texts listed in `failing` fail, texts in
/// `stalled` never return.
#[derive(Default)]
pub struct RecordingBackend {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    failing: HashSet<String>,
    stalled: HashSet<String>,
    latency: Option<fn(&str) -> Duration>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    pub fn stalling_on(mut self, text: &str) -> Self {
        self.stalled.insert(text.to_string());
        self
    }

    pub fn with_latency(mut self, latency: fn(&str) -> Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl TranslateBackend for RecordingBackend {
    async fn translate(&self, text: &str, _from: &str, to: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlight(&self.in_flight);

        if self.stalled.contains(text) {
            std::future::pending::<()>().await;
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency(text)).await;
        }

        if self.failing.contains(text) {
            return Err(TranslationError::BackendError(format!("cannot translate {}", text)));
        }

        Ok(format!("{}:{}", to, text))
    }
}

/// `count` texts named `item-0`, `item-1`, ...
pub fn items(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{}", i)).collect()
}

/// Latency that makes later items finish first
pub fn reverse_latency(text: &str) -> Duration {
    let index: u64 = text
        .trim_start_matches("item-")
        .parse()
        .unwrap_or(0);
    Duration::from_millis(100u64.saturating_sub(index * 10))
}
