//! Memoization of a replay over an unchanged message history.
//!
//! Callers re-ask for snapshots every time their view re-renders, while the
//! history only changes when a message arrives. `ReplayCache` keeps the last
//! result together with a [`Fingerprint`] of the input it was computed from
//! and recomputes only when the fingerprint differs. A miss always runs the
//! full replay from an empty whiteboard.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use crate::message::{Message, MessageId};
use crate::replay::{MessageSnapshots, ReplayConfig, replay_with_state};
use crate::state::WhiteboardState;

/// Cheap identity of a message history plus the config it is replayed with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    len: usize,
    last_id: Option<MessageId>,
    digest: u64,
}

impl Fingerprint {
    /// Hash every message's id, sender, and content. Editing any message in
    /// place changes the fingerprint, not only appends.
    #[must_use]
    pub fn of(messages: &[Message], config: &ReplayConfig) -> Self {
        let mut hasher = DefaultHasher::new();
        config.whiteboard_agent.hash(&mut hasher);
        for message in messages {
            message.id.hash(&mut hasher);
            message.sender().hash(&mut hasher);
            message.content.hash(&mut hasher);
        }
        Self {
            len: messages.len(),
            last_id: messages.last().map(|m| m.id.clone()),
            digest: hasher.finish(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn last_id(&self) -> Option<&MessageId> {
        self.last_id.as_ref()
    }
}

/// Hit and miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
struct CachedReplay {
    fingerprint: Fingerprint,
    snapshots: Arc<MessageSnapshots>,
    final_state: Arc<WhiteboardState>,
}

/// Last replay result for one message history.
#[derive(Debug, Default)]
pub struct ReplayCache {
    cached: Option<CachedReplay>,
    stats: CacheStats,
}

impl ReplayCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-message snapshots for `messages`, recomputed only on change.
    pub fn snapshots(&mut self, messages: &[Message], config: &ReplayConfig) -> Arc<MessageSnapshots> {
        Arc::clone(&self.refresh(messages, config).snapshots)
    }

    /// Final whiteboard state for `messages`, recomputed only on change.
    pub fn final_state(&mut self, messages: &[Message], config: &ReplayConfig) -> Arc<WhiteboardState> {
        Arc::clone(&self.refresh(messages, config).final_state)
    }

    /// Whether a replay for exactly this input is cached.
    #[must_use]
    pub fn is_fresh(&self, fingerprint: &Fingerprint) -> bool {
        self.cached
            .as_ref()
            .is_some_and(|c| &c.fingerprint == fingerprint)
    }

    /// Drop the cached result; the next query recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn refresh(&mut self, messages: &[Message], config: &ReplayConfig) -> &CachedReplay {
        let fingerprint = Fingerprint::of(messages, config);
        let fresh = self.is_fresh(&fingerprint);
        match self.cached.take() {
            Some(cached) if fresh => {
                self.stats.hits += 1;
                self.cached.insert(cached)
            }
            _ => {
                self.stats.misses += 1;
                debug!(
                    messages = fingerprint.len(),
                    last_id = ?fingerprint.last_id(),
                    "replaying whiteboard history"
                );
                let (snapshots, final_state) = replay_with_state(messages, config);
                self.cached.insert(CachedReplay {
                    fingerprint,
                    snapshots: Arc::new(snapshots),
                    final_state: Arc::new(final_state),
                })
            }
        }
    }
}
