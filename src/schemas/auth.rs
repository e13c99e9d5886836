use serde::Serialize;

use crate::schemas::user::UserResponse;

/// Login result. `ok` mirrors the contract the browser client checks.
#[derive(Debug, Serialize)]
pub(crate) struct LoginResponse {
    pub(crate) ok: bool,
    pub(crate) access_token: String,
    pub(crate) token_type: String,
    pub(crate) user: UserResponse,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterResponse {
    pub(crate) ok: bool,
    pub(crate) user: UserResponse,
}
