use serde::{Deserialize, Serialize};

// Inbound request body
#[derive(Deserialize, Clone, Debug)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
}

// One generated file
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SiteFile {
    pub path: String,
    #[serde(default)]
    pub content: String,
}

/// Files making up one generated website, in the order the model returned them.
///
/// Paths are expected to be unique but duplicates are passed through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteBundle {
    pub files: Vec<SiteFile>,
}

impl SiteBundle {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// 200 body for /api/generate
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct DeployResponse {
    pub success: bool,
    pub deployed: bool,
    pub url: String,
}

// 200 body for /api/preview
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct PreviewResponse {
    pub success: bool,
    pub files: Vec<SiteFile>,
}

// 500 body for every failure
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}
