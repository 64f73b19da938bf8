//! Route definitions for the `/content` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create (staff)
/// GET    /{id}        -> get_by_id
/// PUT    /{id}        -> update (staff)
/// DELETE /{id}        -> delete (staff)
/// POST   /{id}/view   -> record_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(content::list).post(content::create))
        .route(
            "/{id}",
            get(content::get_by_id)
                .put(content::update)
                .delete(content::delete),
        )
        .route("/{id}/view", post(content::record_view))
}
