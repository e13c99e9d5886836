use sqlx::PgPool;

use crate::db::models::TeacherAssignment;

const SELECT_JOINED: &str = "\
    SELECT ta.assignment_id,
           ta.teacher_user_id,
           CONCAT(u.first_name, ' ', u.last_name) AS teacher_name,
           ta.subject_id, s.subject_name,
           ta.section_id, sec.section_name, g.grade_name,
           ay.name AS academic_year
    FROM teacher_assignments ta
    JOIN users u ON ta.teacher_user_id = u.user_id
    JOIN subjects s ON ta.subject_id = s.subject_id
    JOIN sections sec ON ta.section_id = sec.section_id
    JOIN grades g ON sec.grade_id = g.grade_id
    JOIN academic_years ay ON sec.academic_year_id = ay.year_id";

pub(crate) async fn list_all(pool: &PgPool) -> Result<Vec<TeacherAssignment>, sqlx::Error> {
    sqlx::query_as::<_, TeacherAssignment>(&format!("{SELECT_JOINED} ORDER BY ta.assignment_id"))
        .fetch_all(pool)
        .await
}

pub(crate) async fn list_by_teacher(
    pool: &PgPool,
    teacher_user_id: i64,
) -> Result<Vec<TeacherAssignment>, sqlx::Error> {
    sqlx::query_as::<_, TeacherAssignment>(&format!(
        "{SELECT_JOINED} WHERE ta.teacher_user_id = $1 ORDER BY ta.assignment_id"
    ))
    .bind(teacher_user_id)
    .fetch_all(pool)
    .await
}
