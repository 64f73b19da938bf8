//! Route definitions for the `/courses` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::courses;
use crate::state::AppState;

/// Routes mounted at `/courses`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (staff)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (staff)
/// DELETE /{id}   -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(courses::list).post(courses::create))
        .route(
            "/{id}",
            get(courses::get_by_id)
                .put(courses::update)
                .delete(courses::delete),
        )
}
