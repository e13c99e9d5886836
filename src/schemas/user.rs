use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::{User, UserRoleRow};

/// Fields default to empty so that a missing field is reported by
/// validation as a 400 instead of being rejected by the JSON extractor.
#[derive(Debug, Deserialize, Validate)]
pub(crate) struct UserRegister {
    #[serde(default)]
    #[validate(contains(pattern = "@", message = "Invalid email"))]
    pub(crate) email: String,
    #[serde(default)]
    #[serde(alias = "firstName")]
    #[validate(length(min = 1, message = "first_name is required"))]
    pub(crate) first_name: String,
    #[serde(default)]
    #[serde(alias = "lastName")]
    #[validate(length(min = 1, message = "last_name is required"))]
    pub(crate) last_name: String,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password is required (min 6 characters)"))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserLogin {
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) password: String,
}

/// Public profile. Never carries the password hash.
#[derive(Debug, Serialize)]
pub(crate) struct UserResponse {
    pub(crate) id: i64,
    pub(crate) role_id: i32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) phone: Option<String>,
    pub(crate) is_active: bool,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl UserResponse {
    pub(crate) fn from_db(user: User) -> Self {
        Self {
            id: user.user_id,
            role_id: user.role_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            is_active: user.is_active,
            created_at: format_primitive(user.created_at),
            updated_at: format_primitive(user.updated_at),
        }
    }
}

/// Raw by-email lookup used by the authentication boundary.
#[derive(Debug, Serialize)]
pub(crate) struct UserWithHashResponse {
    #[serde(flatten)]
    pub(crate) user: UserResponse,
    pub(crate) password_hash: String,
}

impl UserWithHashResponse {
    pub(crate) fn from_db(mut user: User) -> Self {
        let password_hash = std::mem::take(&mut user.password_hash);
        Self { user: UserResponse::from_db(user), password_hash }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UserRoleResponse {
    pub(crate) role_id: i32,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl From<UserRoleRow> for UserRoleResponse {
    fn from(row: UserRoleRow) -> Self {
        Self { role_id: row.role_id, first_name: row.first_name, last_name: row.last_name }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UserListItem {
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) role_id: i32,
    pub(crate) email: String,
    pub(crate) is_active: bool,
}

impl From<User> for UserListItem {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            role_id: user.role_id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}
