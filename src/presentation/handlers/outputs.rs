use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::ArtifactStoreError;
use crate::domain::JobId;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state))]
pub async fn download_output_handler(
    State(state): State<AppState>,
    Path((job_id, name)): Path<(String, String)>,
) -> impl IntoResponse {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid job ID: {}", job_id),
                }),
            )
                .into_response();
        }
    };
    let id = JobId::from_uuid(uuid);

    // Only artifacts the job actually recorded are served; this also yields
    // a 404 for evicted jobs whose files may still be mid-deletion.
    match state.status.status(id).await {
        Ok(Some(view)) if view.outputs.iter().any(|o| o == &name) => {}
        Ok(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Output not found: {}", name),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job for download");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to fetch job: {}", e),
                }),
            )
                .into_response();
        }
    }

    match state.artifacts.read_output(id, &name).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "audio/wav".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", name),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(ArtifactStoreError::NotFound(_) | ArtifactStoreError::InvalidName(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Output not found: {}", name),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read output artifact");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to read output: {}", e),
                }),
            )
                .into_response()
        }
    }
}
