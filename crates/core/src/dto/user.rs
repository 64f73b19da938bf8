use serde::{Deserialize, Serialize};
use validator::Validate;

use super::auth::MIN_PASSWORD_LENGTH;
use super::UserStatus;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

/// Public user representation. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub level: Option<String>,
    pub status: UserStatus,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub last_active: Option<Timestamp>,
    pub join_date: Timestamp,
}

fn default_role() -> Role {
    Role::Student
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default = "default_role")]
    pub role: Role,
    #[validate(length(max = 60))]
    pub level: Option<String>,
    pub status: Option<UserStatus>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(url)]
    pub avatar: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    /// Optional initial password; users created without one must be given
    /// one before they can log in.
    #[validate(length(min = MIN_PASSWORD_LENGTH, max = 128))]
    pub password: Option<String>,
}

/// Body of `PUT /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub role: Option<Role>,
    #[validate(length(max = 60))]
    pub level: Option<String>,
    pub status: Option<UserStatus>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(url)]
    pub avatar: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    #[validate(length(min = MIN_PASSWORD_LENGTH, max = 128))]
    pub password: Option<String>,
}

/// Query string of `GET /users`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub level: Option<String>,
    pub status: Option<UserStatus>,
    /// Case-insensitive substring match against name or email.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
