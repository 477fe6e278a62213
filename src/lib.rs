//! Translate Relay - bounded-concurrency translation front-end
//!
//! This library fans batches of texts out to a translation backend with a
//! small per-batch worker pool, keeps results in input order, and serves the
//! same JSON contract from the CLI and an HTTP API.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::{GoogleTranslator, TranslateBackend},
    config::TranslatorConfig,
    dispatcher::{Dispatcher, Strategy},
    errors::TranslationError,
    models::{LanguagePair, ResultSet, TranslationOutcome, TranslationRequest},
    pool::WorkerPool,
    timeout::translate_with_timeout,
    wire::{ResultItem, TranslateRequest, TranslateResponse},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
