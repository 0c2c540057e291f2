//! Model response decoding
//!
//! Models wrap their JSON in markdown fences and occasionally return a one
//! element array instead of an object; both are tolerated here.

use std::sync::LazyLock;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{GeneratorError, GeneratorResult};
use crate::types::{CopyFields, CopyValue, FieldSuggestions, ParsedOutput};

/// Field holding the complete page document
pub const DOCUMENT_FIELD: &str = "html_code";

/// Field holding the copywriting sub-object
pub const COPY_FIELD: &str = "copywriting";

static FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("fence pattern is valid"));

/// Remove every "```json" and "```" delimiter, wherever it appears
pub fn strip_code_fences(raw: &str) -> String {
    FENCE_REGEX.replace_all(raw, "").into_owned()
}

/// Decode text into the root object, taking the first element of an array
fn decode_root(text: &str) -> Result<serde_json::Map<String, Value>, String> {
    let value: Value = serde_json::from_str(text).map_err(|e| e.to_string())?;

    let root = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| "response is an empty array".to_string())?,
        other => other,
    };

    match root {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected an object, found {}", json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn leaf_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn copy_fields_from(value: Option<&Value>) -> CopyFields {
    let Some(Value::Object(map)) = value else {
        return CopyFields::new();
    };

    map.iter()
        .map(|(name, value)| {
            let copy_value = match value {
                Value::Array(items) => CopyValue::List(items.iter().map(leaf_to_string).collect()),
                other => CopyValue::Text(leaf_to_string(other)),
            };
            (name.clone(), copy_value)
        })
        .collect()
}

/// Decode the page generation response; never fails
pub fn parse(raw: &str) -> ParsedOutput {
    let cleaned = strip_code_fences(raw);

    match decode_root(&cleaned) {
        Ok(root) => {
            let document_markup = root.get(DOCUMENT_FIELD).map(leaf_to_string).unwrap_or_default();
            let copy_fields = copy_fields_from(root.get(COPY_FIELD));
            debug!(
                markup_chars = document_markup.len(),
                copy_fields = copy_fields.len(),
                "Decoded generation response"
            );
            ParsedOutput {
                document_markup,
                copy_fields,
                decode_failed: false,
            }
        }
        Err(reason) => {
            warn!(reason = %reason, "Could not separate copy from markup, using raw response as document");
            ParsedOutput {
                document_markup: cleaned,
                copy_fields: CopyFields::new(),
                decode_failed: true,
            }
        }
    }
}

/// Decode the field suggestion response
pub fn parse_suggestions(raw: &str) -> GeneratorResult<FieldSuggestions> {
    let cleaned = strip_code_fences(raw);
    let root = decode_root(&cleaned).map_err(|message| GeneratorError::SuggestionDecode { message })?;

    let field = |name: &str| root.get(name).map(leaf_to_string).unwrap_or_default();

    Ok(FieldSuggestions {
        target_audience: field("target_audience"),
        cta_text: field("cta_text"),
        product_desc: field("product_desc"),
    })
}

/// Plain-text draft of the copy fields, in reading order
pub fn render_copy_draft(copy_fields: &CopyFields) -> String {
    const SECTIONS: &[(&str, &str)] = &[
        ("headline", "Headline"),
        ("subheadline", "Subheadline"),
        ("body_copy", "Body copy / story"),
        ("benefits", "Benefits"),
        ("cta", "Call to action"),
        ("guarantee", "Guarantee"),
    ];

    let render_value = |value: &CopyValue| match value {
        CopyValue::Text(text) => text.clone(),
        CopyValue::List(items) => items
            .iter()
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    let mut blocks: Vec<String> = SECTIONS
        .iter()
        .map(|(key, title)| {
            let body = copy_fields.get(*key).map(render_value).unwrap_or_default();
            format!("{title}:\n{body}")
        })
        .collect();

    // Extra fields the model chose to add
    for (key, value) in copy_fields {
        if !SECTIONS.iter().any(|(known, _)| *known == key.as_str()) {
            blocks.push(format!("{key}:\n{}", render_value(value)));
        }
    }

    blocks.join("\n\n") + "\n"
}
