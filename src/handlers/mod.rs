use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::error::SiteError;
use crate::state::AppState;

mod generate;
mod health;
mod metrics;
mod preview;

pub use generate::generate_handler;
pub use health::health_handler;
pub use metrics::metrics_handler;
pub use preview::preview_handler;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/generate",
            post(generate_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/preview",
            post(preview_handler).fallback(method_not_allowed),
        )
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

// Any verb other than POST, answered before the body is read
async fn method_not_allowed() -> SiteError {
    SiteError::MethodNotAllowed
}
