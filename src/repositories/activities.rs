use sqlx::PgPool;

use crate::db::models::Activity;

pub(crate) async fn find_by_id(
    pool: &PgPool,
    activity_id: i64,
) -> Result<Option<Activity>, sqlx::Error> {
    sqlx::query_as::<_, Activity>(
        "SELECT a.activity_id, a.assignment_id, a.title, a.description,
                a.weight_percentage, a.due_date, s.subject_name, a.created_at
         FROM activities a
         JOIN teacher_assignments ta ON a.assignment_id = ta.assignment_id
         JOIN subjects s ON ta.subject_id = s.subject_id
         WHERE a.activity_id = $1",
    )
    .bind(activity_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn exists(pool: &PgPool, activity_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM activities WHERE activity_id = $1)")
        .bind(activity_id)
        .fetch_one(pool)
        .await
}
