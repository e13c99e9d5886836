//! Final grade report for one student.
//!
//! The student's grade log names the activities they were graded on. For
//! each activity the full roster and the activity descriptor are fetched
//! concurrently; the student's score is weighted by the activity's
//! percentage and accumulated per subject. Activities whose lookups fail
//! are left out instead of failing the report.

pub(crate) mod aggregate;
pub(crate) mod fields;
pub(crate) mod grading;


use futures::future::join_all;
use thiserror::Error;

use crate::core::metrics::{REPORTS_BUILT_TOTAL, REPORT_ACTIVITIES_SKIPPED_TOTAL};
use crate::schemas::report::FinalReport;
use crate::services::grade_sources::{GradeSource, SourceError};
use aggregate::ActivityInput;

#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error("student {0} not found")]
    StudentNotFound(i64),
    #[error("grades for student {student_id} could not be retrieved")]
    GradesUnavailable {
        student_id: i64,
        #[source]
        source: SourceError,
    },
    #[error("no grades found for student {0}")]
    NoData(i64),
}

impl ReportError {
    fn outcome(&self) -> &'static str {
        match self {
            Self::StudentNotFound(_) => "student_not_found",
            Self::GradesUnavailable { .. } => "grades_unavailable",
            Self::NoData(_) => "no_data",
        }
    }
}

pub(crate) async fn build_final_report<S>(
    source: &S,
    student_id: i64,
) -> Result<FinalReport, ReportError>
where
    S: GradeSource + ?Sized,
{
    let result = build(source, student_id).await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(err) => err.outcome(),
    };
    metrics::counter!(REPORTS_BUILT_TOTAL, "outcome" => outcome).increment(1);

    result
}

async fn build<S>(source: &S, student_id: i64) -> Result<FinalReport, ReportError>
where
    S: GradeSource + ?Sized,
{
    let records = source.student_grades(student_id).await.map_err(|err| match err {
        SourceError::StudentNotFound(id) => ReportError::StudentNotFound(id),
        source => ReportError::GradesUnavailable { student_id, source },
    })?;

    let activity_ids = fields::distinct_activity_ids(&records);

    let subjects = if activity_ids.is_empty() {
        tracing::debug!(student_id, records = records.len(), "no activity ids, using plain means");
        aggregate::unweighted(&records)
    } else {
        let inputs = fetch_activities(source, student_id, &activity_ids).await;
        tracing::debug!(
            student_id,
            requested = activity_ids.len(),
            fetched = inputs.len(),
            "activity details fetched"
        );
        aggregate::weighted(student_id, &inputs)
    };

    if subjects.is_empty() {
        return Err(ReportError::NoData(student_id));
    }

    Ok(grading::finalize(student_id, subjects))
}

/// Fetches roster and descriptor of every activity at once. Activities with
/// a failed or empty lookup are dropped.
async fn fetch_activities<S>(
    source: &S,
    student_id: i64,
    activity_ids: &[i64],
) -> Vec<ActivityInput>
where
    S: GradeSource + ?Sized,
{
    let lookups = activity_ids.iter().map(|&activity_id| async move {
        let (roster, metadata) =
            tokio::join!(source.activity_grades(activity_id), source.activity(activity_id));

        let skipped = match (roster, metadata) {
            (Ok(roster), Ok(Some(metadata))) if !roster.is_empty() => {
                return Some(ActivityInput { activity_id, roster, metadata });
            }
            (Err(err), _) => {
                tracing::warn!(
                    student_id,
                    activity_id,
                    error = %err,
                    "activity roster unavailable"
                );
                "roster_error"
            }
            (_, Err(err)) => {
                tracing::warn!(
                    student_id,
                    activity_id,
                    error = %err,
                    "activity metadata unavailable"
                );
                "metadata_error"
            }
            (Ok(_), Ok(None)) => {
                tracing::warn!(student_id, activity_id, "activity metadata missing");
                "metadata_missing"
            }
            (Ok(_), Ok(Some(_))) => {
                tracing::warn!(student_id, activity_id, "activity roster empty");
                "roster_empty"
            }
        };

        metrics::counter!(REPORT_ACTIVITIES_SKIPPED_TOTAL, "reason" => skipped).increment(1);
        None
    });

    join_all(lookups).await.into_iter().flatten().collect()
}
