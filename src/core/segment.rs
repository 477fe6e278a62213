//! Sentence chunking for long texts

use regex::Regex;
use std::sync::OnceLock;

fn terminators() -> &'static Regex {
    static TERMINATORS: OnceLock<Regex> = OnceLock::new();
    TERMINATORS.get_or_init(|| Regex::new(r"[。！？.!?\n]+").expect("static pattern"))
}

/// Split `text` into sentences, each keeping its trailing terminator run
fn sentences(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;

    for m in terminators().find_iter(text) {
        parts.push(&text[last..m.end()]);
        last = m.end();
    }
    if last < text.len() {
        parts.push(&text[last..]);
    }

    parts
}

/// Pack sentences of `text` into chunks of at most `max_chars` characters.
///
/// A single sentence longer than `max_chars` becomes its own chunk. Chunks
/// are trimmed and blank chunks dropped.
pub fn split_sentences(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in sentences(text) {
        let len = sentence.chars().count();
        if current_chars + len <= max_chars {
            current.push_str(sentence);
            current_chars += len;
        } else {
            push_trimmed(&mut chunks, &current);
            current = sentence.to_string();
            current_chars = len;
        }
    }
    push_trimmed(&mut chunks, &current);

    chunks
}

fn push_trimmed(chunks: &mut Vec<String>, chunk: &str) {
    let trimmed = chunk.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}
