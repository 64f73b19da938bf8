//! Route definitions for the `/meetings` resource (Zoom).

use axum::routing::get;
use axum::Router;

use crate::handlers::meetings;
use crate::state::AppState;

/// Routes mounted at `/meetings`. All require a staff role.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(meetings::list).post(meetings::create))
        .route(
            "/{id}",
            get(meetings::get_by_id)
                .patch(meetings::update)
                .delete(meetings::delete),
        )
}
