//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! service keeps no chat history of its own; callers post the room history
//! with each request. What it does keep is one `ReplayCache` per room, so a
//! client re-asking for an unchanged history skips the replay. The room map
//! is bounded and evicts the room that was inserted first.
//!
//! The map lock is only held to look up or create a room's cache. Each cache
//! has its own mutex, so replays for different rooms run concurrently.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use whiteboard::ReplayCache;

use crate::config::AppConfig;

// =============================================================================
// ROOM CACHES
// =============================================================================

/// One room's replay memo, locked independently of the room map.
pub type SharedCache = Arc<Mutex<ReplayCache>>;

/// Bounded map of room id to that room's replay memo.
#[derive(Debug)]
pub struct RoomCaches {
    caches: HashMap<String, SharedCache>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
    capacity: usize,
}

impl RoomCaches {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { caches: HashMap::new(), order: VecDeque::new(), capacity: capacity.max(1) }
    }

    /// Cache for `room_id`, created on first use. Inserting past capacity
    /// evicts the oldest room. An evicted cache stays alive for callers that
    /// still hold it.
    pub fn entry(&mut self, room_id: &str) -> SharedCache {
        if !self.caches.contains_key(room_id) {
            while self.caches.len() >= self.capacity {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.caches.remove(&oldest);
                tracing::debug!(room_id = %oldest, "evicted room replay cache");
            }
            self.order.push_back(room_id.to_owned());
        }
        Arc::clone(self.caches.entry(room_id.to_owned()).or_default())
    }

    /// Drop a room's cache. Returns whether one existed.
    pub fn remove(&mut self, room_id: &str) -> bool {
        self.order.retain(|id| id != room_id);
        self.caches.remove(room_id).is_some()
    }

    #[must_use]
    pub fn contains(&self, room_id: &str) -> bool {
        self.caches.contains_key(room_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.caches.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.caches.is_empty()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub rooms: Arc<RwLock<RoomCaches>>,
}

impl AppState {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let rooms = RoomCaches::new(config.cache_rooms);
        Self { config: Arc::new(config), rooms: Arc::new(RwLock::new(rooms)) }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
