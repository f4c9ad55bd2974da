//! Chat message records as delivered by the history collaborator.
//!
//! The replay core only reads three things from a message: its id, who sent
//! it, and its text. Everything else the chat backend stores (timestamps,
//! images, thinking traces) is ignored during deserialization.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a message within a room. Backends hand out either integer
/// row ids or opaque strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single chat message. Read-only to the replay core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within a room.
    pub id: MessageId,
    /// Display name of the agent that sent the message, if any.
    #[serde(default, alias = "agentName")]
    pub agent_name: Option<String>,
    /// Custom participant name used by character-mode messages.
    #[serde(default, alias = "participantName")]
    pub participant_name: Option<String>,
    /// Raw message text.
    #[serde(default)]
    pub content: Option<String>,
}

impl Message {
    /// Build a message sent by `sender`.
    #[must_use]
    pub fn new(id: impl Into<MessageId>, sender: &str, content: &str) -> Self {
        Self {
            id: id.into(),
            agent_name: Some(sender.to_owned()),
            participant_name: None,
            content: Some(content.to_owned()),
        }
    }

    /// Originating participant: the agent name, falling back to the
    /// participant name.
    #[must_use]
    pub fn sender(&self) -> Option<&str> {
        self.agent_name
            .as_deref()
            .or(self.participant_name.as_deref())
    }

    /// Message text, or `None` when absent or whitespace-only.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}
