use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::guards::CurrentUser;
use crate::api::validation;
use crate::core::redis::rate_limit_key;
use crate::core::security;
use crate::core::state::AppState;
use crate::db::models::User;
use crate::repositories;
use crate::schemas::auth::{LoginResponse, RegisterResponse};
use crate::schemas::user::{UserLogin, UserRegister, UserResponse};

/// Max attempts per window for login and registration, per email.
const AUTH_RATE_LIMIT: u64 = 10;
const AUTH_RATE_WINDOW_SECONDS: u64 = 60;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const REGISTER_FIELD_ORDER: &[&str] = &["email", "first_name", "last_name", "password"];

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<UserRegister>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    payload.validate().map_err(|errors| {
        ApiError::BadRequest(validation::first_message(&errors, REGISTER_FIELD_ORDER))
    })?;
    let first_name = validation::require_non_blank(&payload.first_name, "first_name is required")?;
    let last_name = validation::require_non_blank(&payload.last_name, "last_name is required")?;

    ensure_within_rate_limit(&state, "register", &payload.email).await?;

    let existing = repositories::users::exists_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            email: &payload.email,
            first_name,
            last_name,
            phone: payload.phone.as_deref(),
            password_hash,
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Email already registered".to_string())
        } else {
            ApiError::internal(e, "Could not create user")
        }
    })?;

    tracing::info!(user_id = user.user_id, "user registered");

    let response = RegisterResponse { ok: true, user: UserResponse::from_db(user) };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserLogin>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::bad_request("Email and password required"));
    }

    ensure_within_rate_limit(&state, "login", &payload.email).await?;

    let user = repositories::users::find_by_email(state.db(), &payload.email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;
    let user = check_credentials(user, &payload.password)?;

    let access_token = security::create_access_token(user.user_id, state.settings(), None)
        .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    Ok(Json(LoginResponse {
        ok: true,
        access_token,
        token_type: "bearer".to_string(),
        user: UserResponse::from_db(user),
    }))
}

/// Unknown email, wrong password and unreadable hash all yield the same error.
fn check_credentials(user: Option<User>, password: &str) -> Result<User, ApiError> {
    let user = user.ok_or(ApiError::Unauthorized(INVALID_CREDENTIALS))?;
    match security::verify_password(password, &user.password_hash) {
        Ok(true) => Ok(user),
        _ => Err(ApiError::Unauthorized(INVALID_CREDENTIALS)),
    }
}

async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from_db(user))
}

async fn ensure_within_rate_limit(
    state: &AppState,
    scope: &str,
    email: &str,
) -> Result<(), ApiError> {
    let allowed = state
        .redis()
        .rate_limit(&rate_limit_key(scope, email), AUTH_RATE_LIMIT, AUTH_RATE_WINDOW_SECONDS)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, scope, "rate limit check failed, allowing request");
            true
        });

    if allowed {
        Ok(())
    } else {
        Err(ApiError::TooManyRequests("Too many attempts, try again later"))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| db_err.is_unique_violation())
}
