use serde::Serialize;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::Role;

#[derive(Debug, Clone, FromRow)]
pub(crate) struct User {
    pub(crate) user_id: i64,
    pub(crate) role_id: i32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) password_hash: String,
    pub(crate) is_active: bool,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

impl User {
    pub(crate) fn role(&self) -> Role {
        Role::from_id(self.role_id)
    }
}

/// Lightweight projection used by the role lookup.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct UserRoleRow {
    pub(crate) role_id: i32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

/// Read-only join over teacher_assignments, users, subjects, sections,
/// grades and academic_years.
#[derive(Debug, Clone, Serialize, FromRow)]
pub(crate) struct TeacherAssignment {
    pub(crate) assignment_id: i64,
    pub(crate) teacher_user_id: i64,
    pub(crate) teacher_name: String,
    pub(crate) subject_id: i64,
    pub(crate) subject_name: String,
    pub(crate) section_id: i64,
    pub(crate) section_name: String,
    pub(crate) grade_name: String,
    pub(crate) academic_year: String,
}

/// One grade of one student on one activity, with the subject and teacher
/// context resolved through the activity's assignment.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct GradeLogEntry {
    pub(crate) grade_log_id: i64,
    pub(crate) activity_id: i64,
    pub(crate) student_user_id: i64,
    pub(crate) student_name: String,
    pub(crate) score: f64,
    pub(crate) title: String,
    pub(crate) subject_name: String,
    pub(crate) teacher_name: String,
    pub(crate) recorded_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub(crate) struct Activity {
    pub(crate) activity_id: i64,
    pub(crate) assignment_id: i64,
    pub(crate) title: String,
    pub(crate) description: Option<String>,
    pub(crate) weight_percentage: f64,
    pub(crate) due_date: Option<PrimitiveDateTime>,
    pub(crate) subject_name: String,
    pub(crate) created_at: PrimitiveDateTime,
}
