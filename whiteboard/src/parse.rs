//! Diff body parser.
//!
//! Grammar, one operation per line:
//!
//! ```text
//! SET <key> <value to end of line>
//! DELETE <key>
//! CLEAR
//! ```
//!
//! Keywords are ASCII case-insensitive, keys are whitespace-free, and values
//! understand two escapes: `\n` for a newline and `\\` for a backslash. Blank
//! lines and `#` comments are skipped. Any other line is skipped too, without
//! stopping the rest of the body from parsing.

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;

use serde::Serialize;

use crate::classify::{ContentFormat, classify, diff_body};
use crate::state::Operation;

/// Why a line produced no operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("blank line")]
    Blank,
    #[error("comment")]
    Comment,
    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),
    #[error("{0} requires a key")]
    MissingKey(&'static str),
    #[error("unexpected trailing text after {keyword}: `{trailing}`")]
    TrailingText {
        keyword: &'static str,
        trailing: String,
    },
}

impl LineError {
    /// Blank lines and comments are expected filler, not mistakes.
    #[must_use]
    pub fn is_filler(&self) -> bool {
        matches!(self, Self::Blank | Self::Comment)
    }
}

/// Outcome of parsing a single body line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLine {
    /// 1-based line number within the diff body.
    pub line_no: usize,
    pub outcome: Result<Operation, LineError>,
}

/// Parse `content` into operations in source order.
///
/// The diff envelope is stripped when present, so classified and unclassified
/// text are both accepted. An empty result means nothing parsed, which callers
/// treat the same as a diff that legitimately carries no operations.
#[must_use]
pub fn parse_whiteboard_diff(content: &str) -> Vec<Operation> {
    parse_lines(content)
        .into_iter()
        .flat_map(|line| line.outcome)
        .collect()
}

/// Parse every body line, keeping the per-line outcome for diagnostics.
#[must_use]
pub fn parse_lines(content: &str) -> Vec<ParsedLine> {
    parse_body(diff_body(content))
}

/// A line that was dropped for a reason other than being blank or a comment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// What a replay would take from one message body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// `"diff"` or `"legacy"`.
    pub format: &'static str,
    pub operations: Vec<Operation>,
    pub skipped: Vec<SkippedLine>,
}

/// Classify `content` and, for diffs, split its lines into applied
/// operations and skipped mistakes. Legacy content reports nothing.
#[must_use]
pub fn inspect(content: &str) -> ParseReport {
    let body = match classify(content) {
        ContentFormat::Diff { body } => body,
        ContentFormat::Legacy => {
            return ParseReport { format: "legacy", operations: Vec::new(), skipped: Vec::new() };
        }
    };

    let mut operations = Vec::new();
    let mut skipped = Vec::new();
    for line in parse_body(body) {
        match line.outcome {
            Ok(op) => operations.push(op),
            Err(reason) if reason.is_filler() => {}
            Err(reason) => skipped.push(SkippedLine { line: line.line_no, reason: reason.to_string() }),
        }
    }
    ParseReport { format: "diff", operations, skipped }
}

/// Parse an already-unwrapped diff body.
pub(crate) fn parse_body(body: &str) -> Vec<ParsedLine> {
    body.lines()
        .enumerate()
        .map(|(idx, line)| ParsedLine {
            line_no: idx + 1,
            outcome: parse_line(line),
        })
        .collect()
}

fn parse_line(raw: &str) -> Result<Operation, LineError> {
    let line = raw.trim();
    if line.is_empty() {
        return Err(LineError::Blank);
    }
    if line.starts_with('#') {
        return Err(LineError::Comment);
    }

    let (keyword, rest) = split_token(line);
    if keyword.eq_ignore_ascii_case("SET") {
        let (key, value) = split_token(rest);
        if key.is_empty() {
            return Err(LineError::MissingKey("SET"));
        }
        return Ok(Operation::Set {
            key: key.to_owned(),
            value: unescape(value),
        });
    }
    if keyword.eq_ignore_ascii_case("DELETE") {
        let (key, trailing) = split_token(rest);
        if key.is_empty() {
            return Err(LineError::MissingKey("DELETE"));
        }
        if !trailing.is_empty() {
            return Err(LineError::TrailingText {
                keyword: "DELETE",
                trailing: trailing.to_owned(),
            });
        }
        return Ok(Operation::Delete {
            key: key.to_owned(),
        });
    }
    if keyword.eq_ignore_ascii_case("CLEAR") {
        if !rest.is_empty() {
            return Err(LineError::TrailingText {
                keyword: "CLEAR",
                trailing: rest.to_owned(),
            });
        }
        return Ok(Operation::Clear);
    }

    Err(LineError::UnknownKeyword(keyword.to_owned()))
}

/// Split the first whitespace-delimited token off `s`. The remainder has its
/// leading whitespace removed; `s` is expected to be trimmed at the end.
fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
