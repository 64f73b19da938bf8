//! Request extractors whose rejections render as [`AppError`].
//!
//! axum's own `Json`, `Query` and `Path` reject with plain-text bodies (and a
//! 422 for a body that parses but misses a field). These wrappers delegate to
//! them and turn every rejection into a 400 `{ "error", "code" }` body.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor and response wrapper.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query-string extractor.
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path-parameter extractor.
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    struct Payload {
        title: String,
    }

    #[derive(Debug, Deserialize)]
    struct Filter {
        #[allow(dead_code)]
        limit: Option<i64>,
    }

    fn app() -> Router {
        Router::new()
            .route("/items", post(|Json(p): Json<Payload>| async move { Json(p) }))
            .route("/items/{id}", get(|Path(id): Path<i64>| async move { id.to_string() }))
            .route("/search", get(|Query(_): Query<Filter>| async { "ok" }))
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    fn post_body(body: &'static str) -> Request<Body> {
        Request::post("/items")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_json_is_a_json_400() {
        let (status, body) = send(post_body("{not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn missing_field_is_400_not_422() {
        let (status, body) = send(post_body("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let request = Request::post("/items")
            .body(Body::from(r#"{"title":"x"}"#))
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn bad_path_and_query_are_json_400s() {
        let (status, body) = send(Request::get("/items/abc").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) =
            send(Request::get("/search?limit=many").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let (status, body) = send(post_body(r#"{"title":"Rust"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Rust");
    }
}
