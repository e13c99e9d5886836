use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::validation::parse_positive_id;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::teacher_assignment::AssignmentsResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", get(list_assignments)).route("/:user_id", get(list_for_teacher))
}

async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    let assignments = repositories::teacher_assignments::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list teacher assignments"))?;

    if assignments.is_empty() {
        return Err(ApiError::not_found("No assignments registered"));
    }

    Ok(Json(AssignmentsResponse {
        message: "Assignments retrieved successfully".to_string(),
        assignments,
    }))
}

async fn list_for_teacher(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    let teacher_id = parse_positive_id(&user_id, "Invalid user id")?;

    let teacher = repositories::users::find_role_by_id(state.db(), teacher_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load teacher"))?;
    if teacher.is_none() {
        return Err(ApiError::not_found("Teacher not found"));
    }

    let assignments = repositories::teacher_assignments::list_by_teacher(state.db(), teacher_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list teacher assignments"))?;

    if assignments.is_empty() {
        return Err(ApiError::not_found("No assignments found for this teacher"));
    }

    Ok(Json(AssignmentsResponse {
        message: "Teacher assignments retrieved successfully".to_string(),
        assignments,
    }))
}
