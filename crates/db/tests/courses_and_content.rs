//! Integration tests for courses, content items and their YouTube links.
//!
//! - Parent and links are written together and read back in order
//! - Supplying links on update replaces the whole set
//! - Deleting a parent removes its links

use lms_db::models::content::{ContentFilter, CreateContent, UpdateContent};
use lms_db::models::course::{CourseFilter, CreateCourse, UpdateCourse};
use lms_db::models::user::CreateUser;
use lms_db::models::youtube_link::NewYoutubeLink;
use lms_db::repositories::{ContentRepo, CourseRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn link(title: &str, video_id: &str, sort_order: i32) -> NewYoutubeLink {
    NewYoutubeLink {
        title: title.to_string(),
        url: format!("https://www.youtube.com/watch?v={video_id}"),
        video_id: video_id.to_string(),
        description: None,
        sort_order,
    }
}

async fn instructor(pool: &PgPool) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            full_name: "Cara Diaz".into(),
            email: "cara@example.com".into(),
            password_hash: None,
            role: "instructor".into(),
            level: None,
            status: None,
            phone: None,
            avatar_url: None,
            bio: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn link_count(pool: &PgPool) -> i64 {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM youtube_links")
        .fetch_one(pool)
        .await
        .unwrap();
    count
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_create_with_links(pool: PgPool) {
    let instructor_id = instructor(&pool).await;

    let detail = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Algebra I".into(),
            instructor_id: Some(instructor_id),
            rating: Some(4.5),
            links: vec![link("Second", "bbbbbbbbbbb", 1), link("First", "aaaaaaaaaaa", 0)],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(detail.course.title, "Algebra I");
    assert_eq!(detail.course.status, "draft");
    assert_eq!(detail.course.instructor_name.as_deref(), Some("Cara Diaz"));
    assert_eq!(detail.course.rating, 4.5);
    let titles: Vec<_> = detail.links.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["First", "Second"]);

    let fetched = CourseRepo::find_detail(&pool, detail.course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.links.len(), 2);
    assert_eq!(fetched.links[0].video_id, "aaaaaaaaaaa");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_invalid_link_rolls_back_parent(pool: PgPool) {
    let result = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Broken".into(),
            // violates the video_id length check
            links: vec![link("Bad", "short", 0)],
            ..Default::default()
        },
    )
    .await;
    assert!(result.is_err());

    let (courses,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM courses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(courses, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_update_replaces_links_only_when_given(pool: PgPool) {
    let created = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Physics".into(),
            links: vec![link("Intro", "aaaaaaaaaaa", 0)],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let id = created.course.id;

    let renamed = CourseRepo::update(
        &pool,
        id,
        &UpdateCourse {
            title: Some("Physics I".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(renamed.course.title, "Physics I");
    assert_eq!(renamed.links.len(), 1);

    let relinked = CourseRepo::update(
        &pool,
        id,
        &UpdateCourse {
            links: Some(vec![
                link("Waves", "ccccccccccc", 0),
                link("Optics", "ddddddddddd", 1),
            ]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    let ids: Vec<_> = relinked.links.iter().map(|l| l.video_id.as_str()).collect();
    assert_eq!(ids, ["ccccccccccc", "ddddddddddd"]);
    assert_eq!(link_count(&pool).await, 2);

    assert!(CourseRepo::update(&pool, 999_999, &UpdateCourse::default())
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_delete_removes_links(pool: PgPool) {
    let created = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Chemistry".into(),
            links: vec![link("A", "aaaaaaaaaaa", 0), link("B", "bbbbbbbbbbb", 1)],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(link_count(&pool).await, 2);

    assert!(CourseRepo::delete(&pool, created.course.id).await.unwrap());
    assert_eq!(link_count(&pool).await, 0);
    assert!(CourseRepo::find_detail(&pool, created.course.id)
        .await
        .unwrap()
        .is_none());
    assert!(!CourseRepo::delete(&pool, created.course.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_course_list_filters(pool: PgPool) {
    let instructor_id = instructor(&pool).await;
    for (title, category, status) in [
        ("Algebra", "Math", "published"),
        ("Geometry", "math", "draft"),
        ("Poetry", "Arts", "published"),
    ] {
        CourseRepo::create(
            &pool,
            &CreateCourse {
                title: title.into(),
                category: Some(category.into()),
                status: Some(status.into()),
                instructor_id: Some(instructor_id),
                links: vec![link(title, "aaaaaaaaaaa", 0)],
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }
    let base = CourseFilter {
        limit: 50,
        ..Default::default()
    };

    let math = CourseRepo::list(
        &pool,
        &CourseFilter {
            category: Some("MATH".into()),
            ..base.clone()
        },
    )
    .await
    .unwrap();
    assert_eq!(math.len(), 2);
    assert!(math.iter().all(|c| c.links.len() == 1));

    let published = CourseRepo::list(
        &pool,
        &CourseFilter {
            status: Some("published".into()),
            search: Some("poe".into()),
            ..base.clone()
        },
    )
    .await
    .unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].course.title, "Poetry");

    let by_instructor = CourseRepo::list(
        &pool,
        &CourseFilter {
            instructor_id: Some(instructor_id),
            ..base
        },
    )
    .await
    .unwrap();
    assert_eq!(by_instructor.len(), 3);
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_round_trip_and_views(pool: PgPool) {
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "Biology".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let created = ContentRepo::create(
        &pool,
        &CreateContent {
            title: "Cells".into(),
            content_type: "video".into(),
            course_id: Some(course.course.id),
            links: vec![link("Cells 101", "eeeeeeeeeee", 0)],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(created.item.course_title.as_deref(), Some("Biology"));
    assert_eq!(created.item.views_count, 0);
    assert_eq!(created.links.len(), 1);

    let views = ContentRepo::increment_views(&pool, created.item.id)
        .await
        .unwrap();
    assert_eq!(views, Some(1));
    assert_eq!(ContentRepo::increment_views(&pool, 999_999).await.unwrap(), None);

    let updated = ContentRepo::update(
        &pool,
        created.item.id,
        &UpdateContent {
            status: Some("published".into()),
            links: Some(vec![]),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.item.status, "published");
    assert_eq!(updated.item.views_count, 1);
    assert!(updated.links.is_empty());

    let listed = ContentRepo::list(
        &pool,
        &ContentFilter {
            content_type: Some("video".into()),
            course_id: Some(course.course.id),
            limit: 50,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_content_delete_removes_links(pool: PgPool) {
    let created = ContentRepo::create(
        &pool,
        &CreateContent {
            title: "Handout".into(),
            content_type: "file".into(),
            links: vec![link("Walkthrough", "fffffffffff", 0)],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(ContentRepo::delete(&pool, created.item.id).await.unwrap());
    assert_eq!(link_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_course_keeps_content(pool: PgPool) {
    let course = CourseRepo::create(
        &pool,
        &CreateCourse {
            title: "History".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let item = ContentRepo::create(
        &pool,
        &CreateContent {
            title: "Timeline".into(),
            content_type: "page".into(),
            course_id: Some(course.course.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    CourseRepo::delete(&pool, course.course.id).await.unwrap();

    let orphan = ContentRepo::find_by_id(&pool, item.item.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(orphan.course_id, None);
    assert_eq!(orphan.course_title, None);
}
