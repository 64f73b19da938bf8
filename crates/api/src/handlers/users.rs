//! Handlers for the `/users` resource.

use axum::extract::State;
use axum::http::StatusCode;
use lms_core::dto::user::{CreateUserRequest, UpdateUserRequest, User, UserListQuery};
use lms_core::error::CoreError;
use lms_core::pagination::{clamp_limit, clamp_offset};
use lms_core::types::DbId;
use lms_db::models::user::{CreateUser, UpdateUser, UserFilter};
use lms_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::password::hash_password;
use crate::convert;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<Vec<User>>> {
    let filter = UserFilter {
        role: params.role.map(|r| r.as_str().to_string()),
        level: params.level.filter(|l| !l.trim().is_empty()),
        status: params.status.map(|s| s.as_str().to_string()),
        search: params.search.filter(|s| !s.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let rows = UserRepo::list(&state.pool, &filter).await?;
    let users = rows
        .into_iter()
        .map(convert::user)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let row = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("User", id))?;
    Ok(Json(convert::user(row)?))
}

/// POST /api/v1/users
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;

    let password_hash = input
        .password
        .as_deref()
        .map(hash_password)
        .transpose()
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let row = UserRepo::create(
        &state.pool,
        &CreateUser {
            full_name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash,
            role: input.role.as_str().to_string(),
            level: input.level,
            status: input.status.map(|s| s.as_str().to_string()),
            phone: input.phone,
            avatar_url: input.avatar,
            bio: input.bio,
        },
    )
    .await?;

    tracing::info!(user_id = row.id, created_by = admin.user_id, role = %row.role, "User created");
    Ok((StatusCode::CREATED, Json(convert::user(row)?)))
}

/// PUT /api/v1/users/{id}
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    input.validate()?;

    let changes = UpdateUser {
        full_name: input.name.map(|n| n.trim().to_string()),
        email: input.email.map(|e| e.trim().to_string()),
        role: input.role.map(|r| r.as_str().to_string()),
        level: input.level,
        status: input.status.map(|s| s.as_str().to_string()),
        phone: input.phone,
        avatar_url: input.avatar,
        bio: input.bio,
    };
    let row = UserRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found("User", id))?;

    if let Some(password) = input.password.as_deref() {
        let hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        UserRepo::set_password(&state.pool, id, &hash).await?;
        SessionRepo::revoke_all_for_user(&state.pool, id).await?;
    }

    Ok(Json(convert::user(row)?))
}

/// DELETE /api/v1/users/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if admin.user_id == id {
        return Err(CoreError::Conflict("You cannot delete your own account".into()).into());
    }
    if UserRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("User", id))
    }
}
