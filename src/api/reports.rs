use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{ensure_can_view_student, CurrentUser};
use crate::api::validation::parse_positive_id;
use crate::core::state::AppState;
use crate::schemas::report::FinalReport;
use crate::services::final_report::build_final_report;
use crate::services::grade_sources::PgGradeSource;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/final/me", get(my_final_report))
        .route("/final/:student_id", get(final_report))
}

async fn my_final_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<FinalReport>, ApiError> {
    report_for(&state, user.user_id).await
}

async fn final_report(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(student_id): Path<String>,
) -> Result<Json<FinalReport>, ApiError> {
    let student_id = parse_positive_id(&student_id, "Invalid user id")?;
    ensure_can_view_student(&user, student_id)?;

    report_for(&state, student_id).await
}

async fn report_for(state: &AppState, student_id: i64) -> Result<Json<FinalReport>, ApiError> {
    let source = PgGradeSource::new(state.db().clone());
    let report = build_final_report(&source, student_id).await?;

    tracing::info!(
        student_id,
        subjects = report.subjects.len(),
        average_percent = report.average_percent,
        "final report built"
    );

    Ok(Json(report))
}
