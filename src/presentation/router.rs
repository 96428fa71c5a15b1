use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    download_output_handler, health_handler, job_status_handler, queue_stats_handler,
    submit_handler,
};
use crate::presentation::state::AppState;

/// Uploads are whole tracks; the axum default of 2 MB would reject them.
const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/jobs", post(submit_handler))
        .route("/api/v1/jobs/{job_id}", get(job_status_handler))
        .route(
            "/api/v1/jobs/{job_id}/outputs/{name}",
            get(download_output_handler),
        )
        .route("/api/v1/queue", get(queue_stats_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
