//! Role-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects with 403 when the caller's
//! role is not allowed.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lms_core::error::CoreError;
use lms_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `admin` or `instructor`.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin or Instructor role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}

/// Requires a role that may author assessments: staff or `committee_tester`.
pub struct RequireAssessmentManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireAssessmentManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.can_manage_assessments() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Assessment management role required".into(),
            )));
        }
        Ok(RequireAssessmentManager(user))
    }
}

/// Any authenticated user. Same as [`AuthUser`], named for route signatures
/// where "requires login" should read explicitly.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
