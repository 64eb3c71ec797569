use axum::{extract::State, http::StatusCode};

use crate::api::AppState;

/// Drops cached tables so the next request re-reads the data files
pub async fn reload(State(state): State<AppState>) -> StatusCode {
    state.store.invalidate();
    StatusCode::NO_CONTENT
}
