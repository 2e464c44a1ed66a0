use serde::{Deserialize, Serialize};

use crate::config::ProviderConfig;
use crate::error::SiteError;

pub const SYSTEM_PROMPT: &str = r#"You are a professional web developer. Build a complete, self-contained static website.
Reply with a single JSON object and nothing else, shaped exactly like this:
{
  "files": [
    {"path": "index.html", "content": "..."},
    {"path": "style.css", "content": "..."},
    {"path": "script.js", "content": "..."}
  ]
}
Paths are relative to the site root. "content" holds the full text of the file.
The website must match this description:
"#;

// generateContent request body
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// Asks for JSON-only output when the model supports it
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
}

// generateContent response body
#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Deserialize, Debug)]
struct ProviderError {
    error: Option<ProviderErrorBody>,
}

#[derive(Deserialize, Debug)]
struct ProviderErrorBody {
    message: Option<String>,
}

pub fn build_prompt(user_prompt: &str) -> String {
    format!("{}{}\n", SYSTEM_PROMPT, user_prompt)
}

impl GenerateContentRequest {
    pub fn new(prompt: String) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
            },
        }
    }
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        Some(text)
    }
}

/// Ask the generative provider for a site and return its raw text output.
pub async fn generate(
    client: &reqwest::Client,
    config: &ProviderConfig,
    user_prompt: &str,
) -> Result<String, SiteError> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or(SiteError::MissingCredential("GEMINI_API_KEY"))?;

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        config.gemini_url, config.gemini_model
    );
    let body = GenerateContentRequest::new(build_prompt(user_prompt));

    log::debug!("calling generative provider model={}", config.gemini_model);

    let res = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| SiteError::Generation(format!("request failed: {}", e)))?;

    let status = res.status();
    if !status.is_success() {
        let raw = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderError>(&raw)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("provider returned {}", status));
        return Err(SiteError::Generation(message));
    }

    let parsed = res
        .json::<GenerateContentResponse>()
        .await
        .map_err(|e| SiteError::Generation(format!("unreadable response: {}", e)))?;

    parsed
        .text()
        .ok_or_else(|| SiteError::Generation("provider returned no candidates".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve, test_config};
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[test]
    fn prompt_is_template_then_user_text() {
        let prompt = build_prompt("a bakery landing page");
        assert!(prompt.starts_with(SYSTEM_PROMPT));
        assert!(prompt.ends_with("a bakery landing page\n"));
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let res: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"files\":"}, {"text": "[]}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(res.text().as_deref(), Some("{\"files\":[]}"));
    }

    #[test]
    fn request_asks_for_json_output() {
        let body = serde_json::to_value(GenerateContentRequest::new("p".into())).unwrap();
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
    }

    #[tokio::test]
    async fn sends_key_header_and_returns_text() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let mock = Router::new().route(
            "/v1beta/models/gemini-test:generateContent",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    let key = headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *captured.lock().unwrap() = Some((key, body));
                    Json(json!({"candidates": [{"content": {"parts": [{"text": "hello"}]}}]}))
                }
            }),
        );
        let base = serve(mock).await;
        let config = test_config(&base, "http://unused");

        let text = generate(&reqwest::Client::new(), &config, "a blog")
            .await
            .unwrap();

        assert_eq!(text, "hello");
        let (key, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(key, "gemini-key");
        let sent = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(sent.ends_with("a blog\n"));
    }

    #[tokio::test]
    async fn provider_error_message_is_surfaced() {
        let mock = Router::new().route(
            "/v1beta/models/gemini-test:generateContent",
            post(|| async {
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"error": {"message": "quota exceeded"}})),
                )
            }),
        );
        let base = serve(mock).await;
        let config = test_config(&base, "http://unused");

        let err = generate(&reqwest::Client::new(), &config, "x")
            .await
            .unwrap_err();

        assert!(matches!(err, SiteError::Generation(ref m) if m == "quota exceeded"));
    }

    #[tokio::test]
    async fn empty_candidate_list_is_generation_failure() {
        let mock = Router::new().route(
            "/v1beta/models/gemini-test:generateContent",
            post(|| async { Json(json!({"candidates": []})) }),
        );
        let base = serve(mock).await;
        let config = test_config(&base, "http://unused");

        let err = generate(&reqwest::Client::new(), &config, "x")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SiteError::Generation(ref m) if m == "provider returned no candidates"
        ));
    }

    #[tokio::test]
    async fn non_json_success_body_is_generation_failure() {
        let mock = Router::new().route(
            "/v1beta/models/gemini-test:generateContent",
            post(|| async { "<html>maintenance</html>" }),
        );
        let base = serve(mock).await;
        let config = test_config(&base, "http://unused");

        let err = generate(&reqwest::Client::new(), &config, "x")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SiteError::Generation(ref m) if m.starts_with("unreadable response")
        ));
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_out() {
        let mut config = test_config("http://127.0.0.1:9", "http://unused");
        config.gemini_api_key = None;

        let err = generate(&reqwest::Client::new(), &config, "x")
            .await
            .unwrap_err();

        assert!(matches!(err, SiteError::MissingCredential("GEMINI_API_KEY")));
    }
}
