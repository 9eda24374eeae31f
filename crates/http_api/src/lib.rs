mod errors;
mod handlers;
mod middleware;
mod state;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

pub use errors::HttpError;
pub use state::{DEFAULT_MAX_UPLOAD_BYTES, HttpState};

pub fn router(state: HttpState) -> Router<()> {
    let upload_limit = state.max_upload_bytes;
    Router::new()
        .route("/", get(handlers::root))
        .route("/costs", get(handlers::costs))
        .route("/costs/summary", get(handlers::costs_summary))
        .route("/services", get(handlers::services))
        .route("/anomalies", get(handlers::anomalies))
        .route(
            "/upload-csv",
            post(handlers::upload_csv).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/reset-mock-data", post(handlers::reset_mock_data))
        .layer(CorsLayer::very_permissive())
        .layer(axum_middleware::from_fn(middleware::log_requests))
        .with_state(state)
}
