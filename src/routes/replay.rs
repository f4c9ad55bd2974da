//! Whiteboard replay routes.
//!
//! Every route that takes a history runs it through the room's replay cache,
//! so repeated polls with an unchanged history skip the replay.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};
use whiteboard::{Message, ParseReport, SnapshotEntry, inspect, render_whiteboard};

use crate::state::AppState;

pub const MAX_ROOM_ID_LEN: usize = 128;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("invalid room id: {0:?}")]
    InvalidRoomId(String),
    #[error("history too large: {count} messages (max {max})")]
    TooManyMessages { count: usize, max: usize },
}

pub(crate) fn replay_error_to_status(err: ReplayError) -> StatusCode {
    match err {
        ReplayError::InvalidRoomId(_) => StatusCode::BAD_REQUEST,
        ReplayError::TooManyMessages { .. } => StatusCode::PAYLOAD_TOO_LARGE,
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryBody {
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct SnapshotsResponse {
    pub snapshots: Vec<SnapshotEntry>,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub cells: BTreeMap<String, String>,
    pub rendered: String,
}

#[derive(Debug, Deserialize)]
pub struct ParseBody {
    pub content: String,
}


/// `POST /api/rooms/{room_id}/whiteboard/snapshots` — per-message snapshots.
pub async fn snapshots(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(body): Json<HistoryBody>,
) -> Result<Json<SnapshotsResponse>, StatusCode> {
    validate(&state, &room_id, &body.messages).map_err(replay_error_to_status)?;

    let cache = state.rooms.write().await.entry(&room_id);
    let snapshots = {
        let mut cache = cache.lock().await;
        info_span!("whiteboard_replay", %room_id)
            .in_scope(|| cache.snapshots(&body.messages, &state.config.replay))
    };

    debug!(%room_id, messages = body.messages.len(), snapshots = snapshots.len(), "served whiteboard snapshots");
    Ok(Json(SnapshotsResponse { snapshots: snapshots.entries().to_vec() }))
}

/// `POST /api/rooms/{room_id}/whiteboard/state` — current document only.
pub async fn final_state(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
    Json(body): Json<HistoryBody>,
) -> Result<Json<StateResponse>, StatusCode> {
    validate(&state, &room_id, &body.messages).map_err(replay_error_to_status)?;

    let cache = state.rooms.write().await.entry(&room_id);
    let whiteboard = {
        let mut cache = cache.lock().await;
        info_span!("whiteboard_replay", %room_id)
            .in_scope(|| cache.final_state(&body.messages, &state.config.replay))
    };

    Ok(Json(StateResponse { cells: whiteboard.cells().clone(), rendered: render_whiteboard(&whiteboard) }))
}

/// `DELETE /api/rooms/{room_id}/whiteboard/cache` — forget a room's memo.
pub async fn drop_cache(State(state): State<AppState>, Path(room_id): Path<String>) -> StatusCode {
    if state.rooms.write().await.remove(&room_id) {
        info!(%room_id, "dropped whiteboard replay cache");
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// `POST /api/whiteboard/parse` — classify one message body and show what a
/// replay would apply from it.
pub async fn parse(Json(body): Json<ParseBody>) -> Json<ParseReport> {
    Json(inspect(&body.content))
}

fn validate(state: &AppState, room_id: &str, messages: &[Message]) -> Result<(), ReplayError> {
    let valid_room = !room_id.is_empty()
        && room_id.chars().count() <= MAX_ROOM_ID_LEN
        && !room_id.chars().any(|c| c.is_whitespace() || c.is_control());
    if !valid_room {
        return Err(ReplayError::InvalidRoomId(room_id.to_owned()));
    }

    let max = state.config.max_messages;
    if messages.len() > max {
        return Err(ReplayError::TooManyMessages { count: messages.len(), max });
    }
    Ok(())
}

#[cfg(test)]
#[path = "replay_test.rs"]
mod tests;
