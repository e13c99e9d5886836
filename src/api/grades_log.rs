use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::{ensure_can_view_student, CurrentUser};
use crate::api::validation::parse_positive_id;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::grade::{GradeRecord, GradesResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", get(grades_for_user))
        .route("/activity/:activity_id", get(grades_for_activity))
}

/// An existing user without grades gets an empty list, not a 404.
async fn grades_for_user(
    State(state): State<AppState>,
    CurrentUser(viewer): CurrentUser,
    Path(user_id): Path<String>,
) -> Result<Json<GradesResponse>, ApiError> {
    let student_id = parse_positive_id(&user_id, "Invalid user id")?;
    ensure_can_view_student(&viewer, student_id)?;

    let student = repositories::users::find_role_by_id(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;
    if student.is_none() {
        return Err(ApiError::not_found("User not found"));
    }

    let rows = repositories::grades_log::list_by_student(state.db(), student_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load grades"))?;

    Ok(Json(GradesResponse {
        message: "Grades retrieved successfully".to_string(),
        grades: rows.into_iter().map(GradeRecord::from).collect(),
    }))
}

/// Any signed-in user; the report builder reads the roster for subject context.
async fn grades_for_activity(
    State(state): State<AppState>,
    _viewer: CurrentUser,
    Path(activity_id): Path<String>,
) -> Result<Json<GradesResponse>, ApiError> {
    let activity_id = parse_positive_id(&activity_id, "Invalid activity id")?;

    let exists = repositories::activities::exists(state.db(), activity_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load activity"))?;
    if !exists {
        return Err(ApiError::not_found("Activity not found"));
    }

    let rows = repositories::grades_log::list_by_activity(state.db(), activity_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load grades"))?;

    Ok(Json(GradesResponse {
        message: "Activity grades retrieved successfully".to_string(),
        grades: rows.into_iter().map(GradeRecord::from).collect(),
    }))
}

#[cfg(test)]
mod tests;
