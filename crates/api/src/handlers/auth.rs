//! Handlers for the `/auth` resource (signup, login, refresh, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use lms_core::dto::auth::{AuthResponse, LoginRequest, RefreshRequest, SignupRequest};
use lms_core::dto::user::User;
use lms_core::dto::UserStatus;
use lms_core::error::CoreError;
use lms_core::roles::Role;
use lms_db::models::session::CreateSession;
use lms_db::models::user::{self as user_row, CreateUser};
use lms_db::repositories::{SessionRepo, UserRepo};
use validator::Validate;

use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::convert;
use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid email or password".into(),
    ))
}

/// POST /api/v1/auth/signup
///
/// Self-service registration. New accounts are always students.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Response> {
    input.validate()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let row = UserRepo::create(
        &state.pool,
        &CreateUser {
            full_name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            password_hash: Some(password_hash),
            role: Role::Student.as_str().to_string(),
            level: input.level,
            status: None,
            phone: None,
            avatar_url: None,
            bio: None,
        },
    )
    .await?;
    tracing::info!(user_id = row.id, "User signed up");

    let response = create_auth_response(&state, row).await?;
    Ok(with_session_cookie(&state, StatusCode::CREATED, response))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    input.validate()?;

    let user = UserRepo::find_by_email(&state.pool, input.email.trim())
        .await?
        .ok_or_else(invalid_credentials)?;
    let password_hash = user
        .password_hash
        .as_deref()
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    ensure_active(&user)?;
    UserRepo::record_login(&state.pool, user.id).await?;

    let response = create_auth_response(&state, user).await?;
    Ok(with_session_cookie(&state, StatusCode::OK, response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new token pair. The old session is revoked.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Response> {
    let token_hash = hash_refresh_token(&input.refresh_token);
    let session = SessionRepo::redeem(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    ensure_active(&user)?;

    let response = create_auth_response(&state, user).await?;
    Ok(with_session_cookie(&state, StatusCode::OK, response))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller and clear the session cookie.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Response> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "Logged out");
    Ok((
        StatusCode::NO_CONTENT,
        [(SET_COOKIE, clear_session_cookie(state.config.cookie_secure))],
    )
        .into_response())
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<User>> {
    let row = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::not_found("User", auth_user.user_id))?;
    Ok(Json(convert::user(row)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_active(user: &user_row::User) -> AppResult<()> {
    if user.status != UserStatus::Active.as_str() {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Account is {}",
            user.status
        ))));
    }
    Ok(())
}

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(state: &AppState, row: user_row::User) -> AppResult<AuthResponse> {
    let user = convert::user(row)?;
    let jwt = &state.config.jwt;

    let access_token = generate_access_token(user.id, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
            user_agent: None,
            ip_address: None,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_ttl_secs(),
        user,
    })
}

fn with_session_cookie(state: &AppState, status: StatusCode, body: AuthResponse) -> Response {
    let cookie = session_cookie(
        &body.access_token,
        body.expires_in,
        state.config.cookie_secure,
    );
    (status, [(SET_COOKIE, cookie)], Json(body)).into_response()
}
