//! CLI mode handlers
//!
//! Each handler writes translations to `out`, diagnostics to `err`, and
//! returns the process exit code.

use std::io::{self, Write};
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use crate::core::client::TranslateBackend;
use crate::core::config::TranslatorConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::models::{LanguagePair, TranslationRequest};
use crate::core::segment::split_sentences;
use crate::core::wire::{TranslateRequest, TranslateResponse};

/// Read all of stdin, dropping trailing line breaks
pub async fn read_stdin() -> io::Result<String> {
    let mut input = String::new();
    tokio::io::stdin().read_to_string(&mut input).await?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Translate one text; any failure is fatal
pub async fn handle_single<W: Write, E: Write>(
    backend: &dyn TranslateBackend,
    text: &str,
    languages: &LanguagePair,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    if text.is_empty() {
        writeln!(err, "Error: No text provided. Use --text or pipe text to stdin")?;
        return Ok(1);
    }

    match backend.translate(text, &languages.from, &languages.to).await {
        Ok(translated) => {
            writeln!(out, "{}", translated)?;
            Ok(0)
        }
        Err(e) => {
            writeln!(err, "Error: Translation failed: {}", e)?;
            Ok(1)
        }
    }
}

/// Translate a comma-separated list, one output line per translated entry
pub async fn handle_batch<W: Write, E: Write>(
    dispatcher: &Dispatcher,
    raw: &str,
    languages: &LanguagePair,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    let texts: Vec<String> = raw.split(',').map(|t| t.trim().to_string()).collect();
    debug!("Batch mode with {} entries", texts.len());

    let results = dispatcher
        .dispatch(TranslationRequest::new(texts, &languages.from, &languages.to))
        .await;

    for outcome in &results {
        match outcome.error() {
            Some(e) => writeln!(err, "Error translating '{}': {}", outcome.original, e)?,
            None if !outcome.translated().is_empty() => writeln!(out, "{}", outcome.translated())?,
            None => {}
        }
    }

    Ok(0)
}

/// Translate a long text sentence by sentence and print the joined result
pub async fn handle_split<W: Write, E: Write>(
    dispatcher: &Dispatcher,
    text: &str,
    max_chars: usize,
    languages: &LanguagePair,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    let segments = split_sentences(text, max_chars);
    if segments.is_empty() {
        writeln!(err, "Error: No text provided. Use --text or pipe text to stdin")?;
        return Ok(1);
    }

    info!("Split {} chars into {} segments", text.chars().count(), segments.len());
    let results = dispatcher
        .dispatch(TranslationRequest::new(segments, &languages.from, &languages.to))
        .await;

    if let Some((index, e)) = results.first_error() {
        writeln!(err, "Error: Translation failed: segment {}: {}", index, e)?;
        return Ok(1);
    }

    writeln!(out, "{}", results.joined(""))?;
    Ok(0)
}

/// Translate free text: split into sentences when asked to, or when the
/// text is longer than one segment; otherwise a fail-fast single call
pub async fn handle_text<W: Write, E: Write>(
    dispatcher: &Dispatcher,
    text: &str,
    split: bool,
    max_chars: usize,
    languages: &LanguagePair,
    out: &mut W,
    err: &mut E,
) -> io::Result<u8> {
    if split || text.chars().count() > max_chars {
        handle_split(dispatcher, text, max_chars, languages, out, err).await
    } else {
        handle_single(dispatcher.backend().as_ref(), text, languages, out, err).await
    }
}

/// Answer one JSON request read from `input`
pub async fn handle_json<W: Write>(
    dispatcher: &Dispatcher,
    input: &str,
    config: &TranslatorConfig,
    out: &mut W,
) -> io::Result<u8> {
    let request = match serde_json::from_str::<TranslateRequest>(input) {
        Ok(request) => request.with_defaults(&config.default_from, &config.default_to),
        Err(e) => {
            print_json(out, &TranslateResponse::failure(format!("Invalid JSON input: {}", e)))?;
            return Ok(1);
        }
    };
    let languages = request.languages();

    if !request.texts.is_empty() {
        let results = dispatcher
            .dispatch(TranslationRequest::new(request.texts, &languages.from, &languages.to))
            .await;
        print_json(out, &TranslateResponse::batch(&results, &languages))?;
        return Ok(0);
    }

    let text = match request.require_text() {
        Ok(text) => text,
        Err(e) => {
            print_json(out, &TranslateResponse::failure(e.to_string()))?;
            return Ok(1);
        }
    };

    let result = dispatcher
        .backend()
        .translate(text, &languages.from, &languages.to)
        .await;
    print_json(out, &TranslateResponse::single(text, &result, &languages))?;
    Ok(0)
}

/// Run the HTTP server until it stops
pub async fn handle_server(
    host: String,
    port: u16,
    backend: Arc<dyn TranslateBackend>,
    config: TranslatorConfig,
) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    info!("Starting HTTP server on {}:{}", host, port);
    run_server(host, port, backend, config).await
}

fn print_json<W: Write>(out: &mut W, response: &TranslateResponse) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, response)?;
    writeln!(out)
}
