use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use super::generate::{generate_bundle, read_prompt, record_failure};
use crate::error::SiteError;
use crate::metrics::{REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::{GenerateRequest, PreviewResponse};
use crate::state::AppState;

// Generate and parse only, nothing is deployed
pub async fn preview_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<PreviewResponse>, SiteError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let result = match read_prompt(payload) {
        Ok(prompt) => generate_bundle(&state, &prompt).await,
        Err(e) => Err(e),
    };

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    result
        .map(|bundle| {
            Json(PreviewResponse {
                success: true,
                files: bundle.files,
            })
        })
        .inspect_err(record_failure)
}
