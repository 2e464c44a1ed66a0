use serde::Deserialize;

use crate::error::SiteError;
use crate::models::{SiteBundle, SiteFile};

const FENCE: &str = "```";

// Shape the model is asked to produce
#[derive(Deserialize)]
struct GeneratedOutput {
    #[serde(default)]
    files: Option<Vec<SiteFile>>,
}

/// Locate the JSON object embedded in free-form model output.
///
/// From the first `{` the scan tracks nesting and string literals, and stops
/// at the brace that closes it, so prose or stray braces after the object are
/// ignored. The body of a fenced code block is searched only when the whole
/// text holds no complete object.
pub fn extract_json_object(text: &str) -> Result<&str, SiteError> {
    match scan_object(text) {
        Ok(json) => Ok(json),
        Err(err) => fenced_body(text).map(scan_object).unwrap_or(Err(err)),
    }
}

fn scan_object(region: &str) -> Result<&str, SiteError> {
    let start = region
        .find('{')
        .ok_or_else(|| SiteError::MalformedOutput("no JSON object found in model output".into()))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in region[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(&region[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(SiteError::MalformedOutput(
        "unterminated JSON object in model output".into(),
    ))
}

// Body of the first ``` block, language tag line skipped
fn fenced_body(text: &str) -> Option<&str> {
    let open = text.find(FENCE)?;
    let after_open = &text[open + FENCE.len()..];
    let body_start = after_open.find('\n').map(|i| i + 1)?;
    let body = &after_open[body_start..];
    let close = body.find(FENCE)?;
    Some(&body[..close])
}

fn decode(json: &str) -> Result<SiteBundle, SiteError> {
    let output: GeneratedOutput = serde_json::from_str(json)
        .map_err(|e| SiteError::MalformedOutput(format!("invalid JSON: {}", e)))?;

    Ok(SiteBundle {
        files: output.files.unwrap_or_default(),
    })
}

/// Extract and deserialize the file list. A missing or null `files` key
/// yields an empty bundle.
///
/// If the first object in the text is not a valid bundle, the body of a
/// fenced code block gets a second chance before the error is returned.
pub fn parse_bundle(text: &str) -> Result<SiteBundle, SiteError> {
    let first = extract_json_object(text).and_then(decode);
    if first.is_ok() {
        return first;
    }

    match fenced_body(text).map(|body| scan_object(body).and_then(decode)) {
        Some(Ok(bundle)) => Ok(bundle),
        _ => first,
    }
}
