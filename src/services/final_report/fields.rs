//! Tolerant accessors over loosely-typed grade records.
//!
//! Upstream rows name the same concept differently depending on which
//! endpoint produced them, so every lookup walks an ordered list of
//! candidate field names.

use serde_json::Value;

const STUDENT_ID_FIELDS: &[&str] = &["student_user_id", "user_id"];
const SCORE_FIELDS: &[&str] = &["score", "grade", "final_grade"];
const WEIGHT_FIELDS: &[&str] = &["weight_percentage", "weight"];

/// First candidate that is present and not `null`. Later candidates are not
/// consulted even if the chosen value turns out to be unusable.
fn first_present<'a>(record: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().filter_map(|field| record.get(*field)).find(|value| !value.is_null())
}

/// Numbers and numeric strings (`"17.50"` from DECIMAL columns) are accepted.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    };

    number.filter(|number| number.is_finite())
}

pub(crate) fn score(record: &Value) -> Option<f64> {
    first_present(record, SCORE_FIELDS).and_then(coerce_number)
}

/// Missing or unusable weights count as 0.
pub(crate) fn weight(metadata: &Value) -> f64 {
    first_present(metadata, WEIGHT_FIELDS).and_then(coerce_number).unwrap_or(0.0)
}

pub(crate) fn belongs_to_student(record: &Value, student_id: i64) -> bool {
    STUDENT_ID_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .filter_map(coerce_number)
        .any(|id| id == student_id as f64)
}

/// Ids of 0, blanks and non-integers are treated as absent.
pub(crate) fn activity_id(record: &Value) -> Option<i64> {
    let number = coerce_number(record.get("activity_id")?)?;
    (number.fract() == 0.0 && number > 0.0 && number <= i64::MAX as f64).then_some(number as i64)
}

/// Distinct activity ids in order of first appearance.
pub(crate) fn distinct_activity_ids(records: &[Value]) -> Vec<i64> {
    let mut ids = Vec::new();
    for id in records.iter().filter_map(activity_id) {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// Non-empty text of `field`. Numbers are rendered as text.
pub(crate) fn text(record: &Value, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::String(value) if !value.is_empty() => Some(value.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Accepts `{ "grades": [...] }` or a bare array.
pub(crate) fn grades_from_body(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("grades") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Accepts `{ "activity": {...} }` or `{ "activities": [{...}, ...] }`.
pub(crate) fn activity_from_body(body: Value) -> Option<Value> {
    let Value::Object(mut map) = body else {
        return None;
    };

    match map.remove("activity") {
        Some(activity @ Value::Object(_)) => Some(activity),
        _ => match map.remove("activities") {
            Some(Value::Array(items)) => items.into_iter().next().filter(Value::is_object),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn score_walks_candidates_in_order() {
        assert_eq!(score(&json!({ "score": 18, "grade": 3 })), Some(18.0));
        assert_eq!(score(&json!({ "score": null, "grade": "15.5" })), Some(15.5));
        assert_eq!(score(&json!({ "final_grade": 12 })), Some(12.0));
        assert_eq!(score(&json!({ "title": "Quiz" })), None);
    }

    #[test]
    fn unusable_first_candidate_does_not_fall_through() {
        assert_eq!(score(&json!({ "score": "n/a", "grade": 14 })), None);
        assert_eq!(score(&json!({ "score": "", "grade": 14 })), None);
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        assert_eq!(score(&json!({ "score": "NaN" })), None);
        assert_eq!(score(&json!({ "score": "inf" })), None);
        assert_eq!(score(&json!({ "score": true })), None);
    }

    #[test]
    fn weight_defaults_to_zero() {
        assert_eq!(weight(&json!({ "weight_percentage": "25.00" })), 25.0);
        assert_eq!(weight(&json!({ "weight": 40 })), 40.0);
        assert_eq!(weight(&json!({ "title": "Quiz" })), 0.0);
        assert_eq!(weight(&json!({ "weight_percentage": "abc" })), 0.0);
    }

    #[test]
    fn student_match_accepts_either_id_field() {
        assert!(belongs_to_student(&json!({ "student_user_id": 7 }), 7));
        assert!(belongs_to_student(&json!({ "user_id": "7" }), 7));
        assert!(belongs_to_student(&json!({ "student_user_id": 8, "user_id": 7 }), 7));
        assert!(!belongs_to_student(&json!({ "student_user_id": 8 }), 7));
        assert!(!belongs_to_student(&json!({}), 7));
    }

    #[test]
    fn activity_ids_are_distinct_and_ordered() {
        let records = vec![
            json!({ "activity_id": 5 }),
            json!({ "activity_id": "3" }),
            json!({ "activity_id": 5 }),
            json!({ "activity_id": null }),
            json!({ "activity_id": 0 }),
            json!({ "activity_id": 2.5 }),
            json!({}),
        ];
        assert_eq!(distinct_activity_ids(&records), vec![5, 3]);
    }

    #[test]
    fn text_skips_empty_values() {
        let record = json!({ "subject_name": "", "title": "Quiz 1", "section": 4 });
        assert_eq!(text(&record, "subject_name"), None);
        assert_eq!(text(&record, "title").as_deref(), Some("Quiz 1"));
        assert_eq!(text(&record, "section").as_deref(), Some("4"));
        assert_eq!(text(&record, "teacher_name"), None);
    }

    #[test]
    fn body_envelopes() {
        assert_eq!(grades_from_body(json!({ "grades": [{ "score": 1 }] })).len(), 1);
        assert_eq!(grades_from_body(json!([{ "score": 1 }, { "score": 2 }])).len(), 2);
        assert!(grades_from_body(json!({ "message": "none" })).is_empty());

        let single = activity_from_body(json!({ "activity": { "weight": 10 } })).unwrap();
        assert_eq!(single["weight"], 10);
        let listed =
            activity_from_body(json!({ "activities": [{ "weight": 20 }, { "weight": 30 }] }))
                .unwrap();
        assert_eq!(listed["weight"], 20);
        assert!(activity_from_body(json!({ "activity": null })).is_none());
        assert!(activity_from_body(json!([])).is_none());
    }
}
