//! User administration and role checks.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use lms_core::roles::Role;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_creates_user_without_password(pool: PgPool) {
    let (_, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/users",
        json!({
            "name": "Committee Member",
            "email": "committee@example.com",
            "role": "committee_tester",
            "level": "Advanced"
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await;
    assert_eq!(user["role"], "committee_tester");
    assert_eq!(user["status"], "active");

    // No password set yet, so login is refused.
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "email": "committee@example.com", "password": "whatever-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_role_and_search(pool: PgPool) {
    let (_, staff) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    common::create_user(&pool, "Ana Lima", Role::Student).await;
    common::create_user(&pool, "Ben Costa", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/users?role=student", &staff).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    let response = get_auth(app.clone(), "/api/v1/users?search=LIMA", &staff).await;
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "Ana Lima");

    let response = get_auth(app, "/api/v1/users?role=student&limit=1&offset=1", &staff).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn students_cannot_list_users(pool: PgPool) {
    let (_, student) = common::create_user(&pool, "Ana Lima", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users", &student).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn instructors_cannot_create_users(pool: PgPool) {
    let (_, instructor) = common::create_user(&pool, "Ivy Instructor", Role::Instructor).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/users",
        json!({ "name": "X", "email": "x@example.com" }),
        &instructor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_and_delete(pool: PgPool) {
    let (admin_row, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let (student, _) = common::create_user(&pool, "Ana Lima", Role::Student).await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/users/{}", student.id);
    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "level": "Intermediate", "status": "inactive" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["level"], "Intermediate");
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["name"], "Ana Lima");

    let response = delete_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app.clone(), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let own = format!("/api/v1/users/{}", admin_row.id);
    let response = delete_auth(app, &own, &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_is_rejected(pool: PgPool) {
    let (_, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/users",
        json!({ "name": "X", "email": "x@example.com", "role": "superuser" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("superuser"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_filter_is_a_json_400(pool: PgPool) {
    let (_, admin) = common::create_user(&pool, "Root Admin", Role::Admin).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users?role=bogus", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}
