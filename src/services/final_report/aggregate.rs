use std::collections::HashMap;

use serde_json::Value;

use super::fields;
use crate::schemas::report::{ActivityContribution, SubjectSummary};

const UNNAMED_SUBJECT: &str = "Sin nombre";

/// Everything fetched for one activity the student has a grade on.
#[derive(Debug, Clone)]
pub(crate) struct ActivityInput {
    pub(crate) activity_id: i64,
    pub(crate) roster: Vec<Value>,
    pub(crate) metadata: Value,
}

/// Subjects keyed by name, in order of first appearance.
struct SubjectTable<T> {
    index: HashMap<String, usize>,
    entries: Vec<T>,
}

impl<T> SubjectTable<T> {
    fn new() -> Self {
        Self { index: HashMap::new(), entries: Vec::new() }
    }

    fn entry(&mut self, name: &str, create: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(name) {
            Some(position) => *position,
            None => {
                self.entries.push(create());
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position]
    }

    fn into_entries(self) -> Vec<T> {
        self.entries
    }
}

struct WeightedSubject {
    subject_name: String,
    teacher_name: String,
    activities: Vec<ActivityContribution>,
    weight_evaluated: f64,
    contribution: f64,
}

/// Weighted aggregation: each activity adds `score * weight / 100` to its
/// subject, so the subject total stays on the original score scale.
///
/// Activities without a usable score for this student are left out.
pub(crate) fn weighted(student_id: i64, activities: &[ActivityInput]) -> Vec<SubjectSummary> {
    let mut table = SubjectTable::<WeightedSubject>::new();

    for input in activities {
        let own = input.roster.iter().find(|record| fields::belongs_to_student(record, student_id));
        let first = input.roster.first();

        // Subject and teacher come from the student's own row when present,
        // otherwise from whichever row the roster lists first.
        let context = |field: &str| {
            own.and_then(|record| fields::text(record, field))
                .or_else(|| first.and_then(|record| fields::text(record, field)))
        };

        let Some(score) = own.and_then(fields::score) else {
            tracing::debug!(
                student_id,
                activity_id = input.activity_id,
                "activity has no usable score for student"
            );
            metrics::counter!(
                crate::core::metrics::REPORT_ACTIVITIES_SKIPPED_TOTAL,
                "reason" => "no_score"
            )
            .increment(1);
            continue;
        };

        let subject_name = context("subject_name").unwrap_or_else(|| UNNAMED_SUBJECT.to_string());
        let teacher_name = context("teacher_name").unwrap_or_default();
        let title =
            context("title").unwrap_or_else(|| format!("Actividad {}", input.activity_id));
        let weight = fields::weight(&input.metadata);
        let contribution = score * (weight / 100.0);

        let subject = table.entry(&subject_name, || WeightedSubject {
            subject_name: subject_name.clone(),
            teacher_name,
            activities: Vec::new(),
            weight_evaluated: 0.0,
            contribution: 0.0,
        });
        subject.activities.push(ActivityContribution {
            activity_id: input.activity_id,
            title,
            score,
            weight,
            contribution,
        });
        subject.weight_evaluated += weight;
        subject.contribution += contribution;
    }

    table
        .into_entries()
        .into_iter()
        .filter(|subject| !subject.activities.is_empty())
        .map(|subject| SubjectSummary {
            subject_name: subject.subject_name,
            teacher_name: subject.teacher_name,
            average: subject.contribution,
            activities: subject.activities,
            evaluated_percent: Some(subject.weight_evaluated.clamp(0.0, 100.0)),
            total_contribution: Some(subject.contribution),
        })
        .collect()
}

struct UnweightedSubject {
    subject_name: String,
    teacher_name: String,
    scores: Vec<f64>,
}

/// Used when no record carries an activity id: plain mean of the scores
/// grouped by subject (or title).
pub(crate) fn unweighted(records: &[Value]) -> Vec<SubjectSummary> {
    let mut table = SubjectTable::<UnweightedSubject>::new();

    for record in records {
        let Some(score) = fields::score(record) else {
            continue;
        };

        let subject_name = fields::text(record, "subject_name")
            .or_else(|| fields::text(record, "title"))
            .unwrap_or_else(|| UNNAMED_SUBJECT.to_string());

        table
            .entry(&subject_name, || UnweightedSubject {
                subject_name: subject_name.clone(),
                teacher_name: fields::text(record, "teacher_name").unwrap_or_default(),
                scores: Vec::new(),
            })
            .scores
            .push(score);
    }

    table
        .into_entries()
        .into_iter()
        .filter(|subject| !subject.scores.is_empty())
        .map(|subject| SubjectSummary {
            average: subject.scores.iter().sum::<f64>() / subject.scores.len() as f64,
            subject_name: subject.subject_name,
            teacher_name: subject.teacher_name,
            activities: Vec::new(),
            evaluated_percent: None,
            total_contribution: None,
        })
        .collect()
}
