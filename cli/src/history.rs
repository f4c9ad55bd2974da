//! Chat history input for the CLI.
//!
//! Accepts three shapes, detected from the first non-blank character:
//! a JSON array of messages, a `{"messages": [...]}` export object, or JSONL
//! with one message per line. JSONL lines that are blank, `#` comments, or
//! export metadata (`{"type": "room_export_meta", ...}`) are skipped.

use std::fs;
use std::io::{self, Read};

use serde::Deserialize;
use serde_json::Value;
use whiteboard::Message;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid history JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid message on line {line}: {source}")]
    Line { line: usize, source: serde_json::Error },
}

#[derive(Deserialize)]
struct Export {
    messages: Vec<Message>,
}

/// Read raw text from a path, or stdin for `-`.
pub fn read_input(input: &str) -> Result<String, HistoryError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| HistoryError::Read { path: "stdin".to_owned(), source })?;
        return Ok(buf);
    }
    fs::read_to_string(input).map_err(|source| HistoryError::Read { path: input.to_owned(), source })
}

/// Parse history text in any supported shape, preserving message order.
pub fn parse_history(text: &str) -> Result<Vec<Message>, HistoryError> {
    match text.trim_start().chars().next() {
        None => Ok(Vec::new()),
        Some('[') => Ok(serde_json::from_str::<Vec<Message>>(text)?),
        Some('{') if is_single_document(text) => parse_document(text),
        Some(_) => parse_jsonl(text),
    }
}

/// A single JSON object spanning the whole text (not one object per line).
fn is_single_document(text: &str) -> bool {
    serde_json::from_str::<Value>(text).is_ok_and(|v| v.get("messages").is_some_and(Value::is_array))
}

fn parse_document(text: &str) -> Result<Vec<Message>, HistoryError> {
    Ok(serde_json::from_str::<Export>(text)?.messages)
}

fn parse_jsonl(text: &str) -> Result<Vec<Message>, HistoryError> {
    let mut messages = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if let Some(message) = parse_jsonl_line(raw).map_err(|source| HistoryError::Line { line, source })? {
            messages.push(message);
        }
    }
    Ok(messages)
}

fn parse_jsonl_line(raw: &str) -> Result<Option<Message>, serde_json::Error> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let value = serde_json::from_str::<Value>(trimmed)?;
    if value.get("type").and_then(Value::as_str) == Some("room_export_meta") {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

#[cfg(test)]
#[path = "history_test.rs"]
mod tests;
