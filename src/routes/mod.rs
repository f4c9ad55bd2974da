//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The service sits between the chat backend, which owns room history, and
//! the presentation layer, which shows either a message's raw text or the
//! whiteboard rendering this service returns. History arrives in request
//! bodies; nothing here reads or writes a database.

pub mod replay;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/rooms/{room_id}/whiteboard/snapshots", post(replay::snapshots))
        .route("/api/rooms/{room_id}/whiteboard/state", post(replay::final_state))
        .route("/api/rooms/{room_id}/whiteboard/cache", delete(replay::drop_cache))
        .route("/api/whiteboard/parse", post(replay::parse))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
