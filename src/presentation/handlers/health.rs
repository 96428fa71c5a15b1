use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub pending_count: usize,
    pub running_count: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.status.counts().await {
        Ok(counts) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                pending_count: counts.pending,
                running_count: counts.running,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed to read job store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    pending_count: 0,
                    running_count: 0,
                }),
            )
                .into_response()
        }
    }
}
