//! Course CRUD with embedded YouTube links.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, post_json_auth, post_raw_auth, put_json_auth,
};
use lms_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;

fn course_body() -> serde_json::Value {
    json!({
        "title": "Rust for Beginners",
        "description": "Ownership, borrowing and lifetimes",
        "category": "Programming",
        "level": "Foundation",
        "duration": 90,
        "students": 12,
        "price": 49.5,
        "status": "published",
        "youtube_links": [
            { "title": "Intro", "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s" },
            { "title": "Borrowing", "url": "https://youtu.be/oHg5SJYRHA0", "description": "Part 2" }
        ]
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_then_get_round_trip(pool: PgPool) {
    let (instructor, token) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app.clone(), "/api/v1/courses", course_body(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["instructor_id"], instructor.id);
    assert_eq!(created["instructor"], "Ivy Instructor");

    let uri = format!("/api/v1/courses/{}", created["id"]);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let course = body_json(response).await;
    assert_eq!(course["title"], "Rust for Beginners");
    assert_eq!(course["duration"], 90);
    assert_eq!(course["students"], 12);
    assert_eq!(course["price"], 49.5);
    assert_eq!(course["status"], "published");

    let links = course["youtube_links"].as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["video_id"], "dQw4w9WgXcQ");
    assert_eq!(links[0]["order"], 0);
    assert_eq!(links[1]["video_id"], "oHg5SJYRHA0");
    assert_eq!(links[1]["description"], "Part 2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructor_resolved_by_name(pool: PgPool) {
    let (ivy, _) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let (_, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let mut body = course_body();
    body["instructor"] = json!("ivy instructor");
    let response = post_json_auth(app.clone(), "/api/v1/courses", body, &admin).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["instructor_id"], ivy.id);

    let mut body = course_body();
    body["instructor"] = json!("Nobody Here");
    let response = post_json_auth(app, "/api/v1/courses", body, &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_youtube_link_is_rejected(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let app = common::build_test_app(pool);

    let mut body = course_body();
    body["youtube_links"] = json!([{ "title": "Vimeo", "url": "https://vimeo.com/123" }]);
    let response = post_json_auth(app.clone(), "/api/v1/courses", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = get_auth(app, "/api/v1/courses", &token).await;
    assert!(body_json(response).await.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_links_and_delete_removes_course(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let app = common::build_test_app(pool.clone());

    let created =
        body_json(post_json_auth(app.clone(), "/api/v1/courses", course_body(), &token).await)
            .await;
    let uri = format!("/api/v1/courses/{}", created["id"]);

    // Leaving links out keeps them.
    let response = put_json_auth(app.clone(), &uri, json!({ "rating": 4.5 }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let course = body_json(response).await;
    assert_eq!(course["rating"], 4.5);
    assert_eq!(course["youtube_links"].as_array().unwrap().len(), 2);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "youtube_links": [{ "title": "Only", "url": "https://youtube.com/shorts/dQw4w9WgXcQ", "order": 5 }] }),
        &token,
    )
    .await;
    let course = body_json(response).await;
    let links = course["youtube_links"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["order"], 5);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM youtube_links")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters(pool: PgPool) {
    let (_, token) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let app = common::build_test_app(pool);

    post_json_auth(app.clone(), "/api/v1/courses", course_body(), &token).await;
    post_json_auth(
        app.clone(),
        "/api/v1/courses",
        json!({ "title": "Watercolour Basics", "category": "Art", "status": "draft" }),
        &token,
    )
    .await;

    let response = get_auth(app.clone(), "/api/v1/courses?status=draft", &token).await;
    let courses = body_json(response).await;
    assert_eq!(courses.as_array().unwrap().len(), 1);
    assert_eq!(courses[0]["title"], "Watercolour Basics");

    let response = get_auth(app.clone(), "/api/v1/courses?category=programming", &token).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = get_auth(app, "/api/v1/courses?search=BORROWING", &token).await;
    let courses = body_json(response).await;
    assert_eq!(courses.as_array().unwrap().len(), 1);
    assert_eq!(courses[0]["title"], "Rust for Beginners");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn students_read_but_cannot_write(pool: PgPool) {
    let (_, student) = common::create_user(&pool, "Ana Lima", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/courses", &student).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(app.clone(), "/api/v1/courses", course_body(), &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get(app, "/api/v1/courses").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_requests_are_json_400s(pool: PgPool) {
    let (_, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = post_raw_auth(app.clone(), "/api/v1/courses", "{not json", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = post_raw_auth(app.clone(), "/api/v1/courses", "{}", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("title"));

    let response = get_auth(app, "/api/v1/courses/abc", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
