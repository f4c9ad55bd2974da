//! Diff envelope detection.
//!
//! A whiteboard message is either a diff (header, fenced, or bare keyword
//! form) or legacy full-document text. Anything not clearly a diff is legacy,
//! so unknown content is shown verbatim instead of being swallowed.

#[cfg(test)]
#[path = "classify_test.rs"]
mod classify_test;

/// Header line that opens a diff body.
pub const DIFF_HEADER: &str = "[whiteboard:diff]";

/// Info strings accepted on an opening code fence.
pub const FENCE_TAGS: [&str; 2] = ["whiteboard", "whiteboard-diff"];

const FENCE: &str = "```";

/// How a whiteboard message encodes its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentFormat<'a> {
    /// Diff-encoded; `body` is the operation text with the envelope removed.
    Diff { body: &'a str },
    /// Legacy full-document content, displayed as-is.
    Legacy,
}

impl<'a> ContentFormat<'a> {
    #[must_use]
    pub fn is_diff(&self) -> bool {
        matches!(self, Self::Diff { .. })
    }

    /// Diff body, if this is a diff.
    #[must_use]
    pub fn body(&self) -> Option<&'a str> {
        match *self {
            Self::Diff { body } => Some(body),
            Self::Legacy => None,
        }
    }
}

/// Classify message content. Total: empty input is [`ContentFormat::Legacy`].
#[must_use]
pub fn classify(content: &str) -> ContentFormat<'_> {
    let Some((first, rest)) = first_non_blank_line(content) else {
        return ContentFormat::Legacy;
    };
    let head = first.trim();

    if head.eq_ignore_ascii_case(DIFF_HEADER) {
        return ContentFormat::Diff { body: rest };
    }

    if let Some(tag) = head.strip_prefix(FENCE) {
        if FENCE_TAGS.iter().any(|t| tag.trim().eq_ignore_ascii_case(t)) {
            return ContentFormat::Diff {
                body: fenced_body(rest),
            };
        }
        return ContentFormat::Legacy;
    }

    if starts_with_bare_keyword(head) {
        return ContentFormat::Diff { body: content };
    }

    ContentFormat::Legacy
}

/// `true` iff `content` carries the diff envelope.
#[must_use]
pub fn is_whiteboard_diff(content: &str) -> bool {
    classify(content).is_diff()
}

/// Strip a diff envelope if present. Content without one is returned whole so
/// the parser can be called on unclassified text.
#[must_use]
pub fn diff_body(content: &str) -> &str {
    classify(content).body().unwrap_or(content)
}

/// Split off the first non-blank line; returns it and the remainder after it.
fn first_non_blank_line(content: &str) -> Option<(&str, &str)> {
    let mut rest = content;
    while !rest.is_empty() {
        let (line, tail) = rest.split_once('\n').unwrap_or((rest, ""));
        if !line.trim().is_empty() {
            return Some((line, tail));
        }
        rest = tail;
    }
    None
}

/// Body of a fenced block: everything before the closing fence line, or the
/// whole remainder if the fence is never closed.
fn fenced_body(rest: &str) -> &str {
    let mut offset = 0usize;
    for line in rest.split_inclusive('\n') {
        if line.trim() == FENCE {
            return &rest[..offset];
        }
        offset += line.len();
    }
    rest
}

/// Bare diffs must open with an upper-case keyword so prose like
/// "Set up the agenda" stays legacy.
fn starts_with_bare_keyword(head: &str) -> bool {
    if head == "CLEAR" {
        return true;
    }
    ["SET", "DELETE"].iter().any(|kw| {
        head.strip_prefix(kw)
            .is_some_and(|tail| tail.starts_with(char::is_whitespace))
    })
}
