use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::api::errors::ApiError;
use crate::api::guards::CurrentAdmin;
use crate::api::validation::{parse_positive_id, require_non_blank};
use crate::core::state::AppState;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::user::{UserListItem, UserResponse, UserRoleResponse, UserWithHashResponse};

const INVALID_USER_ID: &str = "Invalid user id";
const USER_NOT_FOUND: &str = "User not found";

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/name/:name", get(get_user_by_name))
        .route("/email/:email", get(get_user_by_email))
        .route("/:id", get(get_user))
        .route("/:id/role", get(get_user_role))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserListItem>>, ApiError> {
    let users = repositories::users::list_all(state.db())
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list users"))?;

    Ok(Json(users.into_iter().map(UserListItem::from).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user_id = parse_positive_id(&id, INVALID_USER_ID)?;
    let user = repositories::users::find_by_id(state.db(), user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

    found(user).map(|user| Json(UserResponse::from_db(user)))
}

async fn get_user_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRoleResponse>, ApiError> {
    let user_id = parse_positive_id(&id, INVALID_USER_ID)?;
    let row = repositories::users::find_role_by_id(state.db(), user_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user role"))?
        .ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))?;

    Ok(Json(UserRoleResponse::from(row)))
}

async fn get_user_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let name = require_non_blank(&name, "Invalid name parameter")?;
    let user = repositories::users::find_by_name(state.db(), name)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

    found(user).map(|user| Json(UserResponse::from_db(user)))
}

/// Includes the password hash, so only admins may call it.
async fn get_user_by_email(
    State(state): State<AppState>,
    CurrentAdmin(_admin): CurrentAdmin,
    Path(email): Path<String>,
) -> Result<Json<UserWithHashResponse>, ApiError> {
    let email = require_non_blank(&email, "Invalid email parameter")?;
    let user = repositories::users::find_by_email(state.db(), email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

    found(user).map(|user| Json(UserWithHashResponse::from_db(user)))
}

fn found(user: Option<User>) -> Result<User, ApiError> {
    user.ok_or_else(|| ApiError::not_found(USER_NOT_FOUND))
}
