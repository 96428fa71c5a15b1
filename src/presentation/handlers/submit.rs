use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::application::services::AdmissionError;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitParams {
    #[serde(default)]
    pub stems: Option<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub job_id: String,
    pub status: String,
    pub queue_position: usize,
    /// Effective profile after normalization; may differ from the request.
    pub profile: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn submit_handler(
    State(state): State<AppState>,
    Query(params): Query<SubmitParams>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload: Option<(String, Bytes)> = None;
    let mut stems_field: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        if field.name() == Some("stems") {
            match field.text().await {
                Ok(value) => stems_field = Some(value),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stems field");
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ErrorResponse {
                            error: format!("Failed to read stems field: {}", e),
                        }),
                    )
                        .into_response();
                }
            }
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.bin").to_string();
        match field.bytes().await {
            Ok(data) => upload = Some((filename, data)),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read file bytes");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read file: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    }

    let Some((filename, data)) = upload else {
        tracing::warn!("Separation request with no file");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file provided".to_string(),
            }),
        )
            .into_response();
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "Processing file upload");

    let raw_profile = stems_field.or(params.stems).unwrap_or_default();

    match state.admission.submit(&data, &filename, &raw_profile).await {
        Ok(job) => (
            StatusCode::ACCEPTED,
            Json(SubmitResponse {
                job_id: job.id.to_string(),
                status: job.state.as_str().to_string(),
                queue_position: job.queue_position,
                profile: job.profile.as_str().to_string(),
                message: format!("Separation queued at position {}", job.queue_position),
            }),
        )
            .into_response(),
        Err(e @ (AdmissionError::EmptyUpload | AdmissionError::DurationExceeded { .. })) => {
            tracing::warn!(error = %e, "Separation request rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to enqueue separation job");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create job: {}", e),
                }),
            )
                .into_response()
        }
    }
}
