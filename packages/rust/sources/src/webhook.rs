//! CRM webhook payloads: vendor detection and flattening to parseable text.
//!
//! A payload such as
//!
//! ```json
//! {"deal": {"title": "Portal", "items": ["design", "build"]}, "amount": 5000}
//! ```
//!
//! flattens to one line per scalar, keys joined with `": "` and list items
//! prefixed with their index:
//!
//! ```text
//! deal: title: Portal
//! deal: items: [0] design
//! deal: items: [1] build
//! amount: 5000
//! ```

use serde_json::Value;

use briefparse_shared::{BriefParseError, Result};

/// Vendor markers, checked in order against the lowercased payload.
const CRM_VENDORS: &[&str] = &["hubspot", "pipedrive", "salesforce", "zoho"];

/// Label used when no vendor marker is present.
pub const GENERIC_CRM: &str = "crm";

/// First known vendor mentioned anywhere in the payload (keys or values).
pub fn identify_crm_source(payload: &Value) -> &'static str {
    let haystack = payload.to_string().to_lowercase();
    CRM_VENDORS
        .iter()
        .copied()
        .find(|vendor| haystack.contains(vendor))
        .unwrap_or(GENERIC_CRM)
}

/// Flatten a JSON object into newline-separated `key: value` lines.
///
/// Key order follows the payload. Fails if the root is not an object.
pub fn flatten_payload(payload: &Value) -> Result<String> {
    if !payload.is_object() {
        return Err(BriefParseError::payload(format!(
            "webhook payload must be a JSON object, got {}",
            kind(payload)
        )));
    }

    let mut lines = Vec::new();
    flatten_into(payload, "", &mut lines);
    Ok(lines.join("\n"))
}

fn flatten_into(value: &Value, prefix: &str, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if is_container(child) {
                    flatten_into(child, &format!("{prefix}{key}: "), lines);
                } else {
                    lines.push(format!("{prefix}{key}: {}", render_scalar(child)));
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(item, &format!("{prefix}[{i}] "), lines);
            }
        }
        scalar => lines.push(format!("{prefix}{}", render_scalar(scalar))),
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Strings are written raw; other scalars use their JSON spelling.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
