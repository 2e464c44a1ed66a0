use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use crate::deployer::{build_payload, deploy, deployment_name};
use crate::error::SiteError;
use crate::extract::parse_bundle;
use crate::generator::generate;
use crate::metrics::{
    DEPLOYMENTS_TOTAL, FAILURES_TOTAL, FILES_GENERATED, REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::models::{DeployResponse, GenerateRequest, SiteBundle};
use crate::state::AppState;

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<DeployResponse>, SiteError> {
    REQUEST_TOTAL.inc();
    let start_time = Instant::now();

    let result = generate_and_deploy(&state, payload).await;

    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    result.map(Json).inspect_err(record_failure)
}

async fn generate_and_deploy(
    state: &AppState,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<DeployResponse, SiteError> {
    let prompt = read_prompt(payload)?;
    let bundle = generate_bundle(state, &prompt).await?;

    let name = deployment_name(&state.config.name_prefix, chrono::Utc::now());
    let deployment = build_payload(&bundle, name, &state.config.target);

    log::info!("Deploying {} ({} files)", deployment.name, deployment.files.len());
    let url = deploy(&state.client, &state.config, &deployment).await?;
    DEPLOYMENTS_TOTAL.inc();
    log::info!("Deployed {} to {}", deployment.name, url);

    Ok(DeployResponse {
        success: true,
        deployed: true,
        url,
    })
}

pub(crate) fn read_prompt(
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<String, SiteError> {
    payload
        .map(|Json(req)| req.prompt)
        .map_err(|e| SiteError::InvalidRequest(e.body_text()))
}

/// Generation call followed by extraction. Shared with the preview route.
pub(crate) async fn generate_bundle(
    state: &AppState,
    prompt: &str,
) -> Result<SiteBundle, SiteError> {
    log::info!("Generating site ({} prompt chars)", prompt.len());
    let text = generate(&state.client, &state.config, prompt).await?;
    log::debug!("model returned {} chars", text.len());

    let bundle = parse_bundle(&text)?;
    if bundle.is_empty() {
        log::warn!("model returned no files");
    }
    FILES_GENERATED.inc_by(bundle.len() as f64);
    Ok(bundle)
}

pub(crate) fn record_failure(err: &SiteError) {
    FAILURES_TOTAL.with_label_values(&[err.kind()]).inc();
    log::error!("request failed: {}", err);
}
