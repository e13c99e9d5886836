use sqlx::PgPool;

use crate::db::models::GradeLogEntry;

const SELECT_JOINED: &str = "\
    SELECT gl.grade_log_id,
           gl.activity_id,
           gl.student_user_id,
           CONCAT(st.first_name, ' ', st.last_name) AS student_name,
           gl.score,
           a.title,
           s.subject_name,
           CONCAT(t.first_name, ' ', t.last_name) AS teacher_name,
           gl.recorded_at
    FROM grades_log gl
    JOIN users st ON gl.student_user_id = st.user_id
    JOIN activities a ON gl.activity_id = a.activity_id
    JOIN teacher_assignments ta ON a.assignment_id = ta.assignment_id
    JOIN subjects s ON ta.subject_id = s.subject_id
    JOIN users t ON ta.teacher_user_id = t.user_id";

pub(crate) async fn list_by_student(
    pool: &PgPool,
    student_user_id: i64,
) -> Result<Vec<GradeLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, GradeLogEntry>(&format!(
        "{SELECT_JOINED} WHERE gl.student_user_id = $1 ORDER BY gl.activity_id"
    ))
    .bind(student_user_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_activity(
    pool: &PgPool,
    activity_id: i64,
) -> Result<Vec<GradeLogEntry>, sqlx::Error> {
    sqlx::query_as::<_, GradeLogEntry>(&format!(
        "{SELECT_JOINED} WHERE gl.activity_id = $1 ORDER BY gl.student_user_id"
    ))
    .bind(activity_id)
    .fetch_all(pool)
    .await
}
