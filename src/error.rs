use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::ErrorResponse;

#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Malformed generation output: {0}")]
    MalformedOutput(String),

    // Provider message is relayed as-is
    #[error("{0}")]
    Deployment(String),
}

impl SiteError {
    // Metric label
    pub fn kind(&self) -> &'static str {
        match self {
            SiteError::MethodNotAllowed => "method_not_allowed",
            SiteError::InvalidRequest(_) => "invalid_request",
            SiteError::MissingCredential(_) => "missing_credential",
            SiteError::Generation(_) => "generation",
            SiteError::MalformedOutput(_) => "malformed_output",
            SiteError::Deployment(_) => "deployment",
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            SiteError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
            }
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    success: false,
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
