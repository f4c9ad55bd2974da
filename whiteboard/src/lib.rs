//! Whiteboard document replay for multi-agent chat rooms.
//!
//! The whiteboard participant never posts the whole document. It posts diff
//! messages (`SET`, `DELETE`, `CLEAR` lines) into the ordinary chat history,
//! and this crate rebuilds the document from that history on demand.
//!
//! Pipeline, leaves first:
//!
//! - [`classify`] decides once per message whether content is a diff or
//!   legacy full-document text.
//! - [`parse`] turns a diff body into [`Operation`]s, skipping bad lines.
//! - [`state`] folds operations into an immutable [`WhiteboardState`].
//! - [`render`] turns a state into a stable display string.
//! - [`replay`] walks the history and produces per-message snapshots or the
//!   final state.
//! - [`cache`] memoizes a replay against a fingerprint of its input.
//!
//! Nothing here performs I/O or holds global state; every replay starts from
//! an empty whiteboard.

pub mod cache;
pub mod classify;
pub mod message;
pub mod parse;
pub mod render;
pub mod replay;
pub mod state;

pub use cache::{CacheStats, Fingerprint, ReplayCache};
pub use classify::{ContentFormat, classify, is_whiteboard_diff};
pub use message::{Message, MessageId};
pub use parse::{
    LineError, ParseReport, ParsedLine, SkippedLine, inspect, parse_lines, parse_whiteboard_diff,
};
pub use render::{EMPTY_WHITEBOARD, render_whiteboard};
pub use replay::{
    DEFAULT_WHITEBOARD_AGENT, MessageSnapshots, ReplayConfig, SnapshotEntry, SnapshotSource,
    WhiteboardMessageInfo, compute_final_state, compute_message_snapshots,
};
pub use state::{Operation, WhiteboardState, apply_diff};
