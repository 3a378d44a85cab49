use crate::interface_adapters::protocol::ArenaSnapshotDto;
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;

pub async fn arena_snapshot_handler(State(state): State<Arc<AppState>>) -> Json<ArenaSnapshotDto> {
    // Clone out of the watch guard so it is not held while serializing.
    let update = state.updates_rx.borrow().clone();
    Json(ArenaSnapshotDto::from(&update))
}

pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}
