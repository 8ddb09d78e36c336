//! Chat history endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::error;

use super::ApiError;
use crate::api::websocket::AppState;

/// GET /history - the full chat log as a JSON array of lines
pub async fn get_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    match state.broadcaster.history().load_all().await {
        Ok(entries) => Ok(Json(entries)),
        Err(e) => {
            error!(error = %e, "failed to load chat history");
            Err(ApiError::internal("failed to load chat history"))
        }
    }
}
