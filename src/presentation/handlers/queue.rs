use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn queue_stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.status.queue_stats().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read queue stats");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read queue: {}", e),
                }),
            )
                .into_response()
        }
    }
}
