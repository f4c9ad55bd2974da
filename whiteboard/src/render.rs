//! Plain-text rendering of a whiteboard state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::state::WhiteboardState;

/// Rendering of a whiteboard with no cells.
pub const EMPTY_WHITEBOARD: &str = "(empty whiteboard)";

const SEPARATOR: &str = " = ";

/// Render `state` as one `key = value` line per cell, keys ascending.
///
/// Continuation lines of multi-line values are indented to line up under the
/// first line of the value. The output depends only on the state's contents.
#[must_use]
pub fn render_whiteboard(state: &WhiteboardState) -> String {
    if state.is_empty() {
        return EMPTY_WHITEBOARD.to_owned();
    }

    let mut out = String::new();
    for (key, value) in state.iter() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(key);
        out.push_str(SEPARATOR);

        let indent = " ".repeat(key.chars().count() + SEPARATOR.len());
        let mut lines = value.split('\n');
        if let Some(first) = lines.next() {
            out.push_str(first);
        }
        for line in lines {
            out.push('\n');
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}
