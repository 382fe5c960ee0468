//! Submitted answer values.
//!
//! A response payload maps field ids to loosely typed JSON values. They are
//! narrowed here to [`AnswerValue`] so the validator and aggregator can match
//! on shape instead of poking at raw JSON. A key missing from the map means
//! the field was not answered at all.

use indexmap::IndexMap;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Payload of a single response, keyed by field id.
///
/// Key order follows the request body while in memory. Postgres `JSONB` does
/// not keep it, so responses read back from the database are not guaranteed
/// to list keys in submission order.
pub type ResponseData = IndexMap<String, AnswerValue>;

/// One submitted value.
///
/// Numbers and booleans are accepted and kept as their string form (rating
/// widgets commonly send either `4` or `"4"`). Nested objects are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Null,
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Whether this value counts as an answer.
    ///
    /// `null`, the empty string, and the empty list are all treated as "no
    /// answer". The empty-list case is what makes a required checkbox with
    /// nothing ticked fail validation.
    pub fn is_present(&self) -> bool {
        match self {
            AnswerValue::Null => false,
            AnswerValue::Text(s) => !s.is_empty(),
            AnswerValue::List(items) => !items.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Every selected value: the items of a list, or a lone scalar.
    pub fn values(&self) -> &[String] {
        match self {
            AnswerValue::Null => &[],
            AnswerValue::Text(s) => std::slice::from_ref(s),
            AnswerValue::List(items) => items,
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(items: Vec<&str>) -> Self {
        AnswerValue::List(items.into_iter().map(str::to_string).collect())
    }
}

/// Look up a field's answer, treating non-present values as absent.
pub fn present_answer<'a>(data: &'a ResponseData, field_id: &str) -> Option<&'a AnswerValue> {
    data.get(field_id).filter(|v| v.is_present())
}

// ---------------------------------------------------------------------------
// Deserialization
// ---------------------------------------------------------------------------

impl<'de> Deserialize<'de> for AnswerValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AnswerVisitor)
    }
}

struct AnswerVisitor;

impl<'de> Visitor<'de> for AnswerVisitor {
    type Value = AnswerValue;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("a string, number, boolean, null, or list of scalars")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AnswerValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(AnswerValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AnswerVisitor)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(AnswerValue::Text(v.to_string()))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<AnswerValue>()? {
            match item {
                AnswerValue::Text(s) => items.push(s),
                AnswerValue::Null => {}
                AnswerValue::List(_) => {
                    return Err(de::Error::custom("nested lists are not valid answers"))
                }
            }
        }
        Ok(AnswerValue::List(items))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_each_shape() {
        let data: ResponseData = serde_json::from_value(json!({
            "name": "Alice",
            "rating": 4,
            "agree": true,
            "tags": ["a", "b"],
            "skipped": null
        }))
        .unwrap();

        assert_eq!(data["name"], AnswerValue::Text("Alice".into()));
        assert_eq!(data["rating"], AnswerValue::Text("4".into()));
        assert_eq!(data["agree"], AnswerValue::Text("true".into()));
        assert_eq!(data["tags"], AnswerValue::from(vec!["a", "b"]));
        assert_eq!(data["skipped"], AnswerValue::Null);
    }

    #[test]
    fn keeps_request_body_key_order_in_memory() {
        let data: ResponseData =
            serde_json::from_str(r#"{"z": "1", "a": "2", "m": "3"}"#).unwrap();
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn rejects_objects_and_nested_lists() {
        assert!(serde_json::from_value::<AnswerValue>(json!({"url": "/x"})).is_err());
        assert!(serde_json::from_value::<AnswerValue>(json!([["a"]])).is_err());
    }

    #[test]
    fn presence_rules() {
        assert!(!AnswerValue::Null.is_present());
        assert!(!AnswerValue::from("").is_present());
        assert!(!AnswerValue::List(vec![]).is_present());
        assert!(AnswerValue::from(" ").is_present());
        assert!(AnswerValue::from(vec!["x"]).is_present());
    }

    #[test]
    fn serializes_untagged() {
        let value = serde_json::to_value(AnswerValue::from(vec!["a"])).unwrap();
        assert_eq!(value, json!(["a"]));
        assert_eq!(serde_json::to_value(AnswerValue::Null).unwrap(), json!(null));
    }
}
