//! Response validation: required-field presence and duplicate suppression.
//!
//! Pure functions of `(fields, payload)`. Only presence is checked; values
//! are not type- or range-checked (a rating of `"99"` on a 1..5 field is
//! accepted).

use crate::answer::{present_answer, ResponseData};
use crate::error::CoreError;
use crate::form::{FieldType, FormField};

/// Labels of required fields that were not answered, in form field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields {
    pub labels: Vec<String>,
}

impl MissingFields {
    pub fn message(&self) -> String {
        format!("Missing required fields: {}", self.labels.join(", "))
    }
}

impl From<MissingFields> for CoreError {
    fn from(missing: MissingFields) -> Self {
        CoreError::Validation(missing.message())
    }
}

/// Check every required field against the payload.
///
/// A field is missing when its key is absent, `null`, the empty string, or an
/// empty list. All missing labels are collected; validation never stops at
/// the first failure.
pub fn validate_submission(
    fields: &[FormField],
    data: &ResponseData,
) -> Result<(), MissingFields> {
    let labels: Vec<String> = fields
        .iter()
        .filter(|f| f.required && present_answer(data, &f.id).is_none())
        .map(|f| f.label.clone())
        .collect();

    if labels.is_empty() {
        Ok(())
    } else {
        Err(MissingFields { labels })
    }
}

/// Drop payload keys that name no field of the form.
///
/// Stored responses only ever reference fields that existed at submission
/// time; keys can go stale later when a field is removed from the form.
pub fn retain_known_fields(fields: &[FormField], mut data: ResponseData) -> ResponseData {
    data.retain(|key, _| fields.iter().any(|f| f.id == *key));
    data
}

// ---------------------------------------------------------------------------
// Duplicate suppression
// ---------------------------------------------------------------------------

/// Normalized email answers in `data`, one per email field answered.
pub fn email_fingerprints(fields: &[FormField], data: &ResponseData) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.field_type() == FieldType::Email)
        .filter_map(|f| present_answer(data, &f.id))
        .filter_map(|v| v.as_text())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Reject `candidate` when it repeats an email already present in `existing`.
///
/// Forms without email fields never conflict.
pub fn check_duplicate<'a, I>(
    fields: &[FormField],
    candidate: &ResponseData,
    existing: I,
) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a ResponseData>,
{
    let wanted = email_fingerprints(fields, candidate);
    if wanted.is_empty() {
        return Ok(());
    }

    for previous in existing {
        let seen = email_fingerprints(fields, previous);
        if let Some(email) = wanted.iter().find(|e| seen.contains(e)) {
            return Err(CoreError::Conflict(format!(
                "A response has already been submitted for {email}"
            )));
        }
    }
    Ok(())
}
