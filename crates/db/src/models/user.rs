//! User entity model and DTOs.

use lms_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Contains the password hash. Convert to `lms_core::dto::user::User` before
/// returning it from an API.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub level: Option<String>,
    pub status: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub level: Option<String>,
    /// Defaults to `active`.
    pub status: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Partial update. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Filters for [`UserRepo::list`](crate::repositories::UserRepo::list).
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<String>,
    pub level: Option<String>,
    pub status: Option<String>,
    /// Case-insensitive substring of `full_name` or `email`.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
