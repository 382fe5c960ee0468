//! Form schema model: field definitions, publish status, and save-time
//! validation.
//!
//! A field travels over the wire (and is stored in JSONB) as a flat object
//! whose `type` key selects a [`FieldKind`] variant. The variant carries only
//! the configuration meaningful for that type, so per-type logic elsewhere in
//! the crate is an exhaustive `match` rather than string comparisons.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a form title (characters, after trimming).
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum length of a form description.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Maximum length of the free-text purpose used as an AI prompt hint.
pub const PURPOSE_MAX_LEN: usize = 500;

/// Lower rating bound when a rating field does not set `minRating`.
pub const DEFAULT_MIN_RATING: i32 = 1;

/// Upper rating bound when a rating field does not set `maxRating`.
pub const DEFAULT_MAX_RATING: i32 = 5;

// ---------------------------------------------------------------------------
// FieldType
// ---------------------------------------------------------------------------

/// The fixed enumeration of field types, without per-type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
    Date,
    Rating,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 9] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::Rating,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Rating => "rating",
            FieldType::File => "file",
        }
    }

    /// Parse a wire/tag string. Returns `None` for unknown types.
    pub fn parse(s: &str) -> Option<Self> {
        FieldType::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Per-type configuration of a field, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
    Select {
        #[serde(default, deserialize_with = "null_as_empty")]
        options: Vec<String>,
    },
    Radio {
        #[serde(default, deserialize_with = "null_as_empty")]
        options: Vec<String>,
    },
    Checkbox {
        #[serde(default, deserialize_with = "null_as_empty")]
        options: Vec<String>,
    },
    Date,
    Rating {
        #[serde(
            rename = "minRating",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        min_rating: Option<i32>,
        #[serde(
            rename = "maxRating",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        max_rating: Option<i32>,
    },
    File {
        #[serde(
            rename = "acceptedFileTypes",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        accepted_file_types: Option<String>,
        /// Maximum upload size in megabytes.
        #[serde(
            rename = "maxFileSize",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        max_file_size: Option<f64>,
    },
}

/// Clients send `"options": null` for choice fields they have not filled in.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text => FieldType::Text,
            FieldKind::Email => FieldType::Email,
            FieldKind::Textarea => FieldType::Textarea,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Radio { .. } => FieldType::Radio,
            FieldKind::Checkbox { .. } => FieldType::Checkbox,
            FieldKind::Date => FieldType::Date,
            FieldKind::Rating { .. } => FieldType::Rating,
            FieldKind::File { .. } => FieldType::File,
        }
    }

    /// Options of a choice field; empty for every other kind.
    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Select { options }
            | FieldKind::Radio { options }
            | FieldKind::Checkbox { options } => options,
            _ => &[],
        }
    }

    /// Build a kind from a bare type with empty configuration.
    pub fn from_type(field_type: FieldType, options: Vec<String>) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::Email => FieldKind::Email,
            FieldType::Textarea => FieldKind::Textarea,
            FieldType::Select => FieldKind::Select { options },
            FieldType::Radio => FieldKind::Radio { options },
            FieldType::Checkbox => FieldKind::Checkbox { options },
            FieldType::Date => FieldKind::Date,
            FieldType::Rating => FieldKind::Rating {
                min_rating: None,
                max_rating: None,
            },
            FieldType::File => FieldKind::File {
                accepted_file_types: None,
                max_file_size: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// FormField
// ---------------------------------------------------------------------------

/// One typed question within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Client-generated id, unique within the form and stable across edits.
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: i32,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

// ---------------------------------------------------------------------------
// PublishStatus
// ---------------------------------------------------------------------------

/// Whether a form's public link accepts submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    Published,
}

impl PublishStatus {
    /// String representation for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishStatus::Draft => "draft",
            PublishStatus::Published => "published",
        }
    }
}

impl TryFrom<String> for PublishStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "draft" => Ok(PublishStatus::Draft),
            "published" => Ok(PublishStatus::Published),
            other => Err(CoreError::Internal(format!(
                "Unknown publish status '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Save-time validation and normalization
// ---------------------------------------------------------------------------

/// Borrowed view of the form attributes checked on every save.
#[derive(Debug, Clone, Copy)]
pub struct FormDraft<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub purpose: Option<&'a str>,
    pub fields: &'a [FormField],
}

/// Validate a form before it is persisted.
///
/// Every problem is collected before failing so the caller can fix the whole
/// form in one round trip. Fields are referred to by label when they have one
/// and by 1-based position otherwise.
pub fn validate_form_definition(draft: &FormDraft<'_>) -> Result<(), CoreError> {
    let mut problems: Vec<String> = Vec::new();

    let title = draft.title.trim();
    if title.is_empty() {
        problems.push("Title is required".to_string());
    } else if title.chars().count() > TITLE_MAX_LEN {
        problems.push(format!("Title must be at most {TITLE_MAX_LEN} characters"));
    }

    if exceeds(draft.description, DESCRIPTION_MAX_LEN) {
        problems.push(format!(
            "Description must be at most {DESCRIPTION_MAX_LEN} characters"
        ));
    }
    if exceeds(draft.purpose, PURPOSE_MAX_LEN) {
        problems.push(format!(
            "Purpose must be at most {PURPOSE_MAX_LEN} characters"
        ));
    }

    let mut seen_ids = std::collections::HashSet::new();
    for (index, field) in draft.fields.iter().enumerate() {
        let name = if field.label.trim().is_empty() {
            problems.push(format!("Field {} is missing a label", index + 1));
            format!("Field {}", index + 1)
        } else {
            format!("\"{}\"", field.label.trim())
        };

        if field.id.trim().is_empty() {
            problems.push(format!("{name} is missing an id"));
        } else if !seen_ids.insert(field.id.as_str()) {
            problems.push(format!("{name} reuses the id '{}'", field.id));
        }

        match &field.kind {
            FieldKind::Select { options }
            | FieldKind::Radio { options }
            | FieldKind::Checkbox { options } => {
                if options.iter().all(|o| o.trim().is_empty()) {
                    problems.push(format!("{name} needs at least one option"));
                }
            }
            FieldKind::Rating {
                min_rating,
                max_rating,
            } => {
                let min = min_rating.unwrap_or(DEFAULT_MIN_RATING);
                let max = max_rating.unwrap_or(DEFAULT_MAX_RATING);
                if min > max {
                    problems.push(format!(
                        "{name} has a minimum rating above its maximum ({min} > {max})"
                    ));
                }
            }
            FieldKind::File { max_file_size, .. } => {
                if matches!(max_file_size, Some(size) if *size <= 0.0) {
                    problems.push(format!("{name} must allow a positive file size"));
                }
            }
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Date => {}
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(problems.join("; ")))
    }
}

fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| v.trim().chars().count() > max)
}

/// Rewrite `order` to the dense `0..N-1` sequence of list positions.
///
/// The incoming list order is authoritative; whatever `order` values the
/// client sent are discarded.
pub fn normalize_field_order(fields: &mut [FormField]) {
    for (index, field) in fields.iter_mut().enumerate() {
        field.order = index as i32;
    }
}

/// Trim user-entered text on every field and renumber `order`.
pub fn normalize_fields(mut fields: Vec<FormField>) -> Vec<FormField> {
    for field in &mut fields {
        field.label = field.label.trim().to_string();
        field.placeholder = trim_optional(field.placeholder.take());
    }
    normalize_field_order(&mut fields);
    fields
}

/// Trim an optional string, mapping blank values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
