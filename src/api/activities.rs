use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation::parse_positive_id;
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::grade::{ActivityDetail, ActivityResponse};

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/activity/:activity_id", get(get_activity))
}

async fn get_activity(
    State(state): State<AppState>,
    _viewer: CurrentUser,
    Path(activity_id): Path<String>,
) -> Result<Json<ActivityResponse>, ApiError> {
    let activity_id = parse_positive_id(&activity_id, "Invalid activity id")?;

    let activity = repositories::activities::find_by_id(state.db(), activity_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load activity"))?
        .ok_or_else(|| ApiError::not_found("Activity not found"))?;

    Ok(Json(ActivityResponse {
        message: "Activity retrieved successfully".to_string(),
        activity: ActivityDetail::from(activity),
    }))
}
