//! Route definitions for the `/assessments` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::assessments;
use crate::state::AppState;

/// Routes mounted at `/assessments`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (assessment manager)
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update (assessment manager)
/// DELETE /{id}            -> delete (assessment manager)
/// GET    /{id}/attempts   -> list_attempts
/// POST   /{id}/attempts   -> submit_attempt
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assessments::list).post(assessments::create))
        .route(
            "/{id}",
            get(assessments::get_by_id)
                .put(assessments::update)
                .delete(assessments::delete),
        )
        .route(
            "/{id}/attempts",
            get(assessments::list_attempts).post(assessments::submit_attempt),
        )
}
