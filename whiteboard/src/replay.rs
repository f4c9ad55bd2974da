//! Replay of a chat history into whiteboard snapshots.
//!
//! DESIGN
//! ======
//! A replay is a single left fold over the messages in the order supplied.
//! Only messages from the whiteboard participant with non-empty content take
//! part. Diff messages fold their operations into a running state and record
//! a rendering of it; legacy messages record their own text and leave the
//! state alone. Both public entry points drive the same private fold, so the
//! final state always agrees with the last diff snapshot.
//!
//! A diff that yields no operations (unparseable or legitimately empty) keeps
//! the previous state and logs a warning; it never fails the replay.

#[cfg(test)]
#[path = "replay_test.rs"]
mod replay_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classify::{ContentFormat, classify};
use crate::message::{Message, MessageId};
use crate::parse::parse_body;
use crate::render::render_whiteboard;
use crate::state::{Operation, WhiteboardState, apply_diff};

/// Display name of the whiteboard participant unless configured otherwise.
pub const DEFAULT_WHITEBOARD_AGENT: &str = "화이트보드";

/// Replay settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Sender name whose messages encode whiteboard edits.
    pub whiteboard_agent: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            whiteboard_agent: DEFAULT_WHITEBOARD_AGENT.to_owned(),
        }
    }
}

impl ReplayConfig {
    #[must_use]
    pub fn new(whiteboard_agent: impl Into<String>) -> Self {
        Self {
            whiteboard_agent: whiteboard_agent.into(),
        }
    }

    /// Whether `message` was sent by the whiteboard participant.
    #[must_use]
    pub fn is_whiteboard_sender(&self, message: &Message) -> bool {
        message.sender() == Some(self.whiteboard_agent.as_str())
    }
}

/// Per-message result handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardMessageInfo {
    pub rendered_content: String,
    pub is_whiteboard_message: bool,
}

/// How a snapshot's content was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Rendering of the running state after a diff message.
    Diff,
    /// Legacy message text passed through verbatim.
    Legacy,
}

/// One recognized whiteboard message and its snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub message_id: MessageId,
    pub source: SnapshotSource,
    #[serde(flatten)]
    pub info: WhiteboardMessageInfo,
}

/// Snapshots keyed by message id, kept in conversation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageSnapshots {
    entries: Vec<SnapshotEntry>,
    index: HashMap<MessageId, usize>,
}

impl MessageSnapshots {
    #[must_use]
    pub fn get(&self, id: &MessageId) -> Option<&WhiteboardMessageInfo> {
        self.index.get(id).map(|&idx| &self.entries[idx].info)
    }

    #[must_use]
    pub fn contains(&self, id: &MessageId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in conversation order.
    #[must_use]
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MessageId, &WhiteboardMessageInfo)> {
        self.entries.iter().map(|e| (&e.message_id, &e.info))
    }

    /// Rendered content of the last diff-derived snapshot, if any.
    #[must_use]
    pub fn last_diff_render(&self) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.source == SnapshotSource::Diff)
            .map(|e| e.info.rendered_content.as_str())
    }

    /// Ids are expected to be unique; a repeated id overwrites the earlier
    /// entry in place.
    fn insert(&mut self, message_id: &MessageId, source: SnapshotSource, rendered_content: String) {
        let info = WhiteboardMessageInfo {
            rendered_content,
            is_whiteboard_message: true,
        };
        if let Some(&idx) = self.index.get(message_id) {
            let entry = &mut self.entries[idx];
            entry.source = source;
            entry.info = info;
            return;
        }
        self.index.insert(message_id.clone(), self.entries.len());
        self.entries.push(SnapshotEntry {
            message_id: message_id.clone(),
            source,
            info,
        });
    }
}

/// What a whiteboard message contributed to the fold.
enum Step<'m> {
    Diff,
    Legacy(&'m str),
}

/// Replay `messages` and record a snapshot for every whiteboard message.
#[must_use]
pub fn compute_message_snapshots(messages: &[Message], config: &ReplayConfig) -> MessageSnapshots {
    replay_with_state(messages, config).0
}

/// Snapshots and final state from a single pass.
pub(crate) fn replay_with_state(
    messages: &[Message],
    config: &ReplayConfig,
) -> (MessageSnapshots, WhiteboardState) {
    let mut snapshots = MessageSnapshots::default();
    let state = fold_history(messages, config, |message, step, state| match step {
        Step::Diff => {
            snapshots.insert(&message.id, SnapshotSource::Diff, render_whiteboard(state));
        }
        Step::Legacy(content) => {
            snapshots.insert(&message.id, SnapshotSource::Legacy, content.to_owned());
        }
    });
    (snapshots, state)
}

/// Replay `messages` and return only the final whiteboard state.
#[must_use]
pub fn compute_final_state(messages: &[Message], config: &ReplayConfig) -> WhiteboardState {
    fold_history(messages, config, |_, _, _| {})
}

fn fold_history<'m, F>(messages: &'m [Message], config: &ReplayConfig, mut visit: F) -> WhiteboardState
where
    F: FnMut(&'m Message, Step<'m>, &WhiteboardState),
{
    let mut state = WhiteboardState::new();

    for message in messages {
        if !config.is_whiteboard_sender(message) {
            continue;
        }
        let Some(content) = message.text() else {
            continue;
        };

        match classify(content) {
            ContentFormat::Diff { body } => {
                let ops = diff_operations(&message.id, body);
                if !ops.is_empty() {
                    state = apply_diff(&state, &ops);
                }
                visit(message, Step::Diff, &state);
            }
            ContentFormat::Legacy => visit(message, Step::Legacy(content), &state),
        }
    }

    state
}

/// Parse a diff body, logging skipped lines and empty results.
fn diff_operations(message_id: &MessageId, body: &str) -> Vec<Operation> {
    let mut ops = Vec::new();
    for line in parse_body(body) {
        match line.outcome {
            Ok(op) => ops.push(op),
            Err(reason) if reason.is_filler() => {}
            Err(reason) => {
                debug!(%message_id, line = line.line_no, %reason, "skipped whiteboard diff line");
            }
        }
    }

    if ops.is_empty() {
        warn!(%message_id, "whiteboard diff produced no operations; keeping previous state");
    }
    ops
}
