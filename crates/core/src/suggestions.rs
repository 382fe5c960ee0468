//! AI field suggestions: prompt construction, reply parsing, and merging
//! accepted suggestions into a form's field list.
//!
//! The HTTP side lives behind [`SuggestionProvider`]; implementations are
//! picked once at startup and injected into the application state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::form::{normalize_field_order, FieldKind, FieldType, FormField};

/// Number of suggestions requested from the model.
pub const SUGGESTION_RANGE: (u32, u32) = (8, 12);

/// A text-completion backend.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Short provider name used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Send a single-turn prompt and return the raw text reply.
    async fn complete(&self, prompt: &str) -> Result<String, CoreError>;
}

/// One suggested field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSuggestion {
    pub id: String,
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

/// Build the completion prompt for a form purpose.
pub fn build_prompt(purpose: &str) -> String {
    let (min, max) = SUGGESTION_RANGE;
    format!(
        r#"You are a form design expert. Based on the following form purpose, suggest relevant form fields that would help collect the necessary information.

Form Purpose: {purpose}

Please provide {min}-{max} field suggestions in JSON format. Include a variety of field types to make the form comprehensive. Each field should have:
- fieldType: one of "text", "email", "textarea", "select", "radio", "checkbox", "date", "rating", "file"
- label: the field label
- placeholder: optional placeholder text (not for date, rating, file types)
- required: boolean indicating if the field is required
- options: array of options (only for select, radio, checkbox types)
- reasoning: brief explanation of why this field is useful

Return ONLY a valid JSON array of field objects, no additional text or markdown formatting.

Example format:
[
  {{
    "fieldType": "text",
    "label": "Full Name",
    "placeholder": "Enter your full name",
    "required": true,
    "reasoning": "Essential for identifying respondents"
  }},
  {{
    "fieldType": "select",
    "label": "Age Range",
    "required": false,
    "options": ["18-25", "26-35", "36-45", "46+"],
    "reasoning": "Helps segment responses by age group"
  }}
]"#
    )
}

/// Remove a surrounding Markdown code fence, if any.
pub fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline.
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a model reply into suggestions.
///
/// Items without `fieldType` or `label` make the whole reply invalid. Unknown
/// field types fall back to `text`. `id_seed` (typically the current time in
/// milliseconds) keeps ids unique across calls.
pub fn parse_suggestions(reply: &str, id_seed: i64) -> Result<Vec<FieldSuggestion>, CoreError> {
    let parsed: Value = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| CoreError::Upstream(format!("Failed to parse AI suggestions: {e}")))?;

    let items = parsed.as_array().ok_or_else(|| {
        CoreError::Upstream("Failed to parse AI suggestions: reply is not an array".into())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(item, index, id_seed))
        .collect()
}

fn parse_item(item: &Value, index: usize, id_seed: i64) -> Result<FieldSuggestion, CoreError> {
    let missing = || {
        CoreError::Upstream(format!(
            "Failed to parse AI suggestions: suggestion {index} is missing fieldType or label"
        ))
    };

    let raw_type = item.get("fieldType").and_then(Value::as_str).ok_or_else(missing)?;
    let label = item
        .get("label")
        .and_then(Value::as_str)
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(missing)?;

    let field_type = FieldType::parse(raw_type).unwrap_or(FieldType::Text);
    let options = item.get("options").and_then(Value::as_array).map(|arr| {
        arr.iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    Ok(FieldSuggestion {
        id: format!("ai-suggestion-{id_seed}-{index}"),
        field_type,
        label: label.trim().to_string(),
        placeholder: item
            .get("placeholder")
            .and_then(Value::as_str)
            .map(str::to_string),
        required: item.get("required").and_then(Value::as_bool).unwrap_or(false),
        options,
        reasoning: item
            .get("reasoning")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

/// Reject a blank purpose before any provider call is made.
pub fn validate_purpose(purpose: &str) -> Result<&str, CoreError> {
    let purpose = purpose.trim();
    if purpose.is_empty() {
        return Err(CoreError::Validation("Form purpose is required".into()));
    }
    Ok(purpose)
}

/// Ask `provider` for suggestions for `purpose`.
pub async fn suggest_fields(
    provider: &dyn SuggestionProvider,
    purpose: &str,
    id_seed: i64,
) -> Result<Vec<FieldSuggestion>, CoreError> {
    let purpose = validate_purpose(purpose)?;
    let reply = provider.complete(&build_prompt(purpose)).await?;
    parse_suggestions(&reply, id_seed)
}

impl From<FieldSuggestion> for FormField {
    fn from(s: FieldSuggestion) -> Self {
        FormField {
            id: s.id,
            label: s.label,
            placeholder: s.placeholder,
            required: s.required,
            order: 0,
            kind: FieldKind::from_type(s.field_type, s.options.unwrap_or_default()),
        }
    }
}

/// Append accepted suggestions to an existing field list.
pub fn merge_suggestions(
    mut fields: Vec<FormField>,
    accepted: impl IntoIterator<Item = FieldSuggestion>,
) -> Vec<FormField> {
    fields.extend(accepted.into_iter().map(FormField::from));
    normalize_field_order(&mut fields);
    fields
}
