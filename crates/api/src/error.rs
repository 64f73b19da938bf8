use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lms_core::error::CoreError;
use lms_zoom::ZoomError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error": message, "code": CODE }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Zoom(#[from] ZoomError),

    /// Zoom credentials are absent from the configuration.
    #[error("Zoom integration is not configured")]
    ZoomNotConfigured,

    /// Malformed body, query string or path parameter.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Route not found")]
    RouteNotFound,

    #[error("Request timed out")]
    Timeout,

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(errors.into())
    }
}

impl AppError {
    pub fn not_found(entity: &'static str, id: lms_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }

    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string())
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::Zoom(err) => classify_zoom_error(err),
            AppError::ZoomNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "ZOOM_NOT_CONFIGURED",
                self.to_string(),
            ),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RouteNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            AppError::Timeout => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", self.to_string()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
        });
        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "Internal server error".to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on a `uq_*` constraint map to 409.
/// - Everything else is a 500 carrying the database's message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                db_err.message().to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                other.to_string(),
            )
        }
    }
}

/// Zoom's own 404 passes through; anything else from Zoom is a bad gateway.
fn classify_zoom_error(err: &ZoomError) -> (StatusCode, &'static str, String) {
    tracing::warn!(error = %err, "Zoom request failed");
    match err {
        ZoomError::Api { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Meeting not found".to_string(),
        ),
        _ => (StatusCode::BAD_GATEWAY, "ZOOM_ERROR", err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn core_errors_map_to_their_statuses() {
        assert_eq!(status_of(AppError::not_found("Course", 7)), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(CoreError::Validation("title: too short".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(CoreError::Unauthorized("no token".into()).into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(CoreError::Forbidden("staff only".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(CoreError::Internal("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_404_and_other_database_errors_are_500() {
        assert_eq!(
            status_of(sqlx::Error::RowNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(sqlx::Error::PoolTimedOut.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn database_message_is_returned() {
        let (_, code, message) = AppError::Database(sqlx::Error::PoolTimedOut).parts();
        assert_eq!(code, "DATABASE_ERROR");
        assert_eq!(message, sqlx::Error::PoolTimedOut.to_string());
    }

    #[test]
    fn zoom_errors() {
        assert_eq!(
            status_of(AppError::ZoomNotConfigured),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(
                ZoomError::Api {
                    status: 404,
                    body: "{}".into()
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(
                ZoomError::Api {
                    status: 401,
                    body: "{}".into()
                }
                .into()
            ),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn transport_level_errors() {
        assert_eq!(
            status_of(AppError::BadRequest("bad json".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::RouteNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_of(AppError::Timeout), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn internal_message_is_generic() {
        let (_, _, message) = AppError::InternalError("secret detail".into()).parts();
        assert_eq!(message, "Internal server error");
    }
}
