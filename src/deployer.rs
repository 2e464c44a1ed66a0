use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::SiteError;
use crate::models::SiteBundle;

// Deployment creation body
#[derive(Serialize, Debug, Clone)]
pub struct DeploymentPayload {
    pub name: String,
    pub files: Vec<DeploymentFile>,
    pub target: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DeploymentFile {
    pub file: String,
    pub data: String,
    pub encoding: String,
}

// Deployment creation response, both success and failure shapes
#[derive(Deserialize, Debug, Default)]
pub struct DeploymentResult {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<DeploymentError>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DeploymentError {
    #[serde(default)]
    pub message: Option<String>,
}

/// Prefix plus the current time in milliseconds. Unique enough across
/// requests without any coordination.
pub fn deployment_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}{}", prefix, now.timestamp_millis())
}

pub fn build_payload(bundle: &SiteBundle, name: String, target: &str) -> DeploymentPayload {
    let files = bundle
        .files
        .iter()
        .map(|f| DeploymentFile {
            file: f.path.clone(),
            data: STANDARD.encode(f.content.as_bytes()),
            encoding: "base64".to_string(),
        })
        .collect();

    DeploymentPayload {
        name,
        files,
        target: target.to_string(),
    }
}

pub fn public_url(host: Option<&str>) -> String {
    match host {
        Some(host) if !host.is_empty() => format!("https://{}", host),
        _ => "Unknown".to_string(),
    }
}

/// Submit the payload and return the public url of the new deployment.
pub async fn deploy(
    client: &reqwest::Client,
    config: &ProviderConfig,
    payload: &DeploymentPayload,
) -> Result<String, SiteError> {
    let token = config
        .vercel_token
        .as_deref()
        .ok_or(SiteError::MissingCredential("VERCEL_TOKEN"))?;

    log::debug!(
        "creating deployment name={} files={}",
        payload.name,
        payload.files.len()
    );

    let res = client
        .post(format!("{}/v13/deployments", config.vercel_url))
        .bearer_auth(token)
        .json(payload)
        .send()
        .await
        .map_err(|e| SiteError::Deployment(format!("Deploy failed: {}", e)))?;

    let status = res.status();
    let raw = match res.text().await {
        Ok(raw) => raw,
        Err(e) if status.is_success() => {
            return Err(SiteError::Deployment(format!("Deploy failed: {}", e)));
        }
        Err(_) => String::new(),
    };
    let result: DeploymentResult = serde_json::from_str(&raw).unwrap_or_default();

    if !status.is_success() {
        let message = result
            .error
            .and_then(|e| e.message)
            .unwrap_or_else(|| "Deploy failed".to_string());
        log::warn!("deployment provider returned {}: {}", status, message);
        return Err(SiteError::Deployment(message));
    }

    Ok(public_url(result.url.as_deref()))
}
