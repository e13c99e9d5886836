use serde::Serialize;

use crate::db::models::TeacherAssignment;

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentsResponse {
    pub(crate) message: String,
    pub(crate) assignments: Vec<TeacherAssignment>,
}
