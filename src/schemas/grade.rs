use serde::Serialize;

use crate::core::time::{format_optional, format_primitive};
use crate::db::models::{Activity, GradeLogEntry};

/// One row of the grade log as served to clients and fed to the report builder.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GradeRecord {
    pub(crate) grade_log_id: i64,
    pub(crate) activity_id: i64,
    pub(crate) student_user_id: i64,
    pub(crate) student_name: String,
    pub(crate) score: f64,
    pub(crate) title: String,
    pub(crate) subject_name: String,
    pub(crate) teacher_name: String,
    pub(crate) recorded_at: String,
}

impl From<GradeLogEntry> for GradeRecord {
    fn from(entry: GradeLogEntry) -> Self {
        Self {
            grade_log_id: entry.grade_log_id,
            activity_id: entry.activity_id,
            student_user_id: entry.student_user_id,
            student_name: entry.student_name,
            score: entry.score,
            title: entry.title,
            subject_name: entry.subject_name,
            teacher_name: entry.teacher_name,
            recorded_at: format_primitive(entry.recorded_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GradesResponse {
    pub(crate) message: String,
    pub(crate) grades: Vec<GradeRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ActivityDetail {
    pub(crate) activity_id: i64,
    pub(crate) assignment_id: i64,
    pub(crate) subject_name: String,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) weight_percentage: f64,
    pub(crate) due_date: Option<String>,
    pub(crate) created_at: String,
}

impl From<Activity> for ActivityDetail {
    fn from(activity: Activity) -> Self {
        Self {
            activity_id: activity.activity_id,
            assignment_id: activity.assignment_id,
            subject_name: activity.subject_name,
            title: activity.title,
            description: activity.description,
            weight_percentage: activity.weight_percentage,
            due_date: format_optional(activity.due_date),
            created_at: format_primitive(activity.created_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ActivityResponse {
    pub(crate) message: String,
    pub(crate) activity: ActivityDetail,
}
