//! Response analytics: per-field statistics over every response of a form.
//!
//! A full scan, recomputed on each call. Output order follows the form's
//! field order; distribution keys follow first-seen order, so the result is
//! deterministic for a fixed list of responses.

use indexmap::IndexMap;
use serde::Serialize;

use crate::answer::{present_answer, AnswerValue, ResponseData};
use crate::form::{FieldKind, FieldType, FormField};
use crate::types::DbId;

/// Statistics summary for one form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalytics {
    pub form_id: DbId,
    pub form_title: String,
    /// Total number of responses, regardless of which fields they answered.
    pub response_count: usize,
    pub field_statistics: Vec<FieldStatistics>,
}

/// Statistics for one field.
///
/// `response_count` counts only responses with a present answer for this
/// field, so it is independent of the form-level total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStatistics {
    pub field_id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub response_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<IndexMap<String, usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_percentages: Option<IndexMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<String>>,
}

/// Compute the analytics summary for a form.
pub fn aggregate(
    form_id: DbId,
    form_title: &str,
    fields: &[FormField],
    responses: &[ResponseData],
) -> FormAnalytics {
    let field_statistics = fields
        .iter()
        .map(|field| field_statistics(field, responses))
        .collect();

    FormAnalytics {
        form_id,
        form_title: form_title.to_string(),
        response_count: responses.len(),
        field_statistics,
    }
}

fn field_statistics(field: &FormField, responses: &[ResponseData]) -> FieldStatistics {
    let answers: Vec<&AnswerValue> = responses
        .iter()
        .filter_map(|data| present_answer(data, &field.id))
        .collect();
    let count = answers.len();

    let mut stats = FieldStatistics {
        field_id: field.id.clone(),
        label: field.label.clone(),
        field_type: field.field_type(),
        response_count: count,
        distribution: None,
        distribution_percentages: None,
        average: None,
        responses: None,
    };

    match &field.kind {
        FieldKind::Select { .. } | FieldKind::Radio { .. } | FieldKind::Checkbox { .. } => {
            set_distribution(&mut stats, &answers);
        }
        FieldKind::Rating { .. } => {
            set_distribution(&mut stats, &answers);
            stats.average = average(&answers);
        }
        FieldKind::Text
        | FieldKind::Email
        | FieldKind::Textarea
        | FieldKind::Date
        | FieldKind::File { .. } => {
            stats.responses = Some(raw_values(&answers));
        }
    }

    stats
}

fn set_distribution(stats: &mut FieldStatistics, answers: &[&AnswerValue]) {
    let distribution = distribution(answers);
    stats.distribution_percentages = Some(percentages(&distribution, stats.response_count));
    stats.distribution = Some(distribution);
}

/// Occurrence count per distinct value. A value repeated inside one list
/// answer is counted once for that response.
pub fn distribution(answers: &[&AnswerValue]) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for answer in answers {
        let mut seen: Vec<&str> = Vec::new();
        for value in answer.values() {
            if value.is_empty() || seen.contains(&value.as_str()) {
                continue;
            }
            seen.push(value);
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// `count / denominator * 100`, rounded to two decimals; all zero when the
/// denominator is zero.
pub fn percentages(
    distribution: &IndexMap<String, usize>,
    denominator: usize,
) -> IndexMap<String, f64> {
    distribution
        .iter()
        .map(|(value, count)| {
            let pct = if denominator > 0 {
                round2(*count as f64 / denominator as f64 * 100.0)
            } else {
                0.0
            };
            (value.clone(), pct)
        })
        .collect()
}

fn average(answers: &[&AnswerValue]) -> Option<f64> {
    let numbers: Vec<f64> = answers
        .iter()
        .filter_map(|a| a.as_text())
        .filter_map(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .collect();
    if numbers.is_empty() {
        return None;
    }
    Some(round2(numbers.iter().sum::<f64>() / numbers.len() as f64))
}

/// One entry per answer; list answers are joined with ", ".
fn raw_values(answers: &[&AnswerValue]) -> Vec<String> {
    answers.iter().map(|a| a.values().join(", ")).collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn field(id: &str, label: &str, kind: FieldKind) -> FormField {
        FormField {
            id: id.into(),
            label: label.into(),
            placeholder: None,
            required: false,
            order: 0,
            kind,
        }
    }

    fn select(id: &str) -> FormField {
        field(
            id,
            "Choice",
            FieldKind::Select {
                options: vec!["Yes".into(), "No".into()],
            },
        )
    }

    fn responses(values: Vec<serde_json::Value>) -> Vec<ResponseData> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn select_distribution_and_percentages() {
        let fields = vec![select("f2")];
        let data = responses(vec![
            json!({"f2": "Yes"}),
            json!({"f2": "Yes"}),
            json!({"f2": "No"}),
        ]);

        let result = aggregate(1, "Poll", &fields, &data);
        let stats = &result.field_statistics[0];

        assert_eq!(result.response_count, 3);
        assert_eq!(stats.response_count, 3);
        let dist = stats.distribution.as_ref().unwrap();
        assert_eq!(dist["Yes"], 2);
        assert_eq!(dist["No"], 1);
        let pct = stats.distribution_percentages.as_ref().unwrap();
        assert_eq!(pct["Yes"], 66.67);
        assert_eq!(pct["No"], 33.33);
        assert!(stats.responses.is_none());
    }

    #[test]
    fn field_counts_are_independent_of_total() {
        let fields = vec![
            field("x", "X", FieldKind::Text),
            field("y", "Y", FieldKind::Text),
        ];
        let data = responses(
            (0..10)
                .map(|i| {
                    if i % 2 == 0 {
                        json!({"x": format!("x{i}"), "y": "v"})
                    } else {
                        json!({"x": "", "y": "v"})
                    }
                })
                .collect(),
        );

        let result = aggregate(1, "T", &fields, &data);
        assert_eq!(result.response_count, 10);
        assert_eq!(result.field_statistics[0].response_count, 5);
        assert_eq!(result.field_statistics[1].response_count, 10);
    }

    #[test]
    fn percentages_use_field_denominator() {
        let fields = vec![select("s")];
        let data = responses(vec![
            json!({"s": "Yes"}),
            json!({"s": null}),
            json!({}),
            json!({"s": "No"}),
        ]);
        let stats = &aggregate(1, "T", &fields, &data).field_statistics[0];
        assert_eq!(stats.response_count, 2);
        assert_eq!(stats.distribution_percentages.as_ref().unwrap()["Yes"], 50.0);
    }

    #[test]
    fn empty_response_set() {
        let fields = vec![select("s"), field("t", "Notes", FieldKind::Textarea)];
        let result = aggregate(9, "Empty", &fields, &[]);
        assert_eq!(result.response_count, 0);
        assert_eq!(result.field_statistics[0].response_count, 0);
        assert!(result.field_statistics[0]
            .distribution
            .as_ref()
            .unwrap()
            .is_empty());
        assert_eq!(result.field_statistics[1].responses, Some(vec![]));
    }

    #[test]
    fn zero_denominator_gives_zero_percent() {
        let mut dist = IndexMap::new();
        dist.insert("A".to_string(), 3);
        assert_eq!(percentages(&dist, 0)["A"], 0.0);
    }

    #[test]
    fn text_responses_keep_submission_order() {
        let fields = vec![field("t", "Name", FieldKind::Text)];
        let data = responses(vec![json!({"t": "b"}), json!({"t": "a"}), json!({"t": ""})]);
        let stats = &aggregate(1, "T", &fields, &data).field_statistics[0];
        assert_eq!(stats.responses.as_deref(), Some(&["b".to_string(), "a".to_string()][..]));
    }

    #[test]
    fn list_answer_to_text_field_is_one_entry() {
        let fields = vec![field("t", "Notes", FieldKind::Text)];
        let data = responses(vec![json!({"t": ["a", "b", "c"]}), json!({"t": "d"})]);
        let stats = &aggregate(1, "T", &fields, &data).field_statistics[0];
        assert_eq!(stats.response_count, 2);
        assert_eq!(
            stats.responses.as_deref(),
            Some(&["a, b, c".to_string(), "d".to_string()][..])
        );
    }

    #[test]
    fn checkbox_counts_each_selected_option() {
        let fields = vec![field(
            "c",
            "Toppings",
            FieldKind::Checkbox {
                options: vec!["Ham".into(), "Egg".into()],
            },
        )];
        let data = responses(vec![
            json!({"c": ["Ham", "Egg"]}),
            json!({"c": ["Ham", "Ham"]}),
            json!({"c": []}),
        ]);
        let stats = &aggregate(1, "T", &fields, &data).field_statistics[0];
        assert_eq!(stats.response_count, 2);
        let dist = stats.distribution.as_ref().unwrap();
        assert_eq!(dist["Ham"], 2);
        assert_eq!(dist["Egg"], 1);
        assert_eq!(stats.distribution_percentages.as_ref().unwrap()["Ham"], 100.0);
    }

    #[test]
    fn rating_average() {
        let fields = vec![field(
            "r",
            "Score",
            FieldKind::Rating {
                min_rating: None,
                max_rating: None,
            },
        )];
        let data = responses(vec![json!({"r": "4"}), json!({"r": 5}), json!({"r": "5"})]);
        let stats = &aggregate(1, "T", &fields, &data).field_statistics[0];
        assert_eq!(stats.average, Some(4.67));
        assert_eq!(stats.distribution.as_ref().unwrap()["5"], 2);
    }

    #[test]
    fn output_follows_field_order_and_is_deterministic() {
        let fields = vec![
            field("b", "B", FieldKind::Text),
            select("a"),
        ];
        let data = responses(vec![json!({"a": "No", "b": "x"}), json!({"a": "Yes"})]);
        let first = aggregate(1, "T", &fields, &data);
        let second = aggregate(1, "T", &fields, &data);
        assert_eq!(first, second);
        let ids: Vec<&str> = first.field_statistics.iter().map(|s| s.field_id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        let keys: Vec<&String> = first.field_statistics[1]
            .distribution
            .as_ref()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys, ["No", "Yes"]);
    }

    #[test]
    fn serialized_shape() {
        let fields = vec![select("f2")];
        let data = responses(vec![json!({"f2": "Yes"})]);
        let value = serde_json::to_value(aggregate(5, "Poll", &fields, &data)).unwrap();
        assert_eq!(value["formId"], 5);
        assert_eq!(value["formTitle"], "Poll");
        assert_eq!(value["responseCount"], 1);
        let stats = &value["fieldStatistics"][0];
        assert_eq!(stats["fieldId"], "f2");
        assert_eq!(stats["type"], "select");
        assert_eq!(stats["distribution"]["Yes"], 1);
        assert_eq!(stats["distributionPercentages"]["Yes"], 100.0);
        assert!(stats.get("responses").is_none());
    }
}
