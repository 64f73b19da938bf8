pub mod assessments;
pub mod auth;
pub mod content;
pub mod courses;
pub mod health;
pub mod meetings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                           signup (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
/// /auth/me                               current user (requires auth)
///
/// /users                                 list (staff), create (admin)
/// /users/{id}                            get (staff), update, delete (admin)
///
/// /courses                               list (auth), create (staff)
/// /courses/{id}                          get (auth), update, delete (staff)
///
/// /content                               list (auth), create (staff)
/// /content/{id}                          get (auth), update, delete (staff)
/// /content/{id}/view                     increment view counter (POST)
///
/// /assessments                           list (auth), create (manager)
/// /assessments/{id}                      get (auth), update, delete (manager)
/// /assessments/{id}/attempts             submit (POST), list (GET)
///
/// /meetings                              list, create (staff, Zoom)
/// /meetings/{id}                         get, update (PATCH), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/courses", courses::router())
        .nest("/content", content::router())
        .nest("/assessments", assessments::router())
        .nest("/meetings", meetings::router())
}
