//! Handlers for the `/courses` resource.

use axum::extract::State;
use axum::http::StatusCode;
use lms_core::dto::course::{Course, CourseListQuery, CreateCourseRequest, UpdateCourseRequest};
use lms_core::pagination::{clamp_limit, clamp_offset};
use lms_core::roles::Role;
use lms_core::types::DbId;
use lms_db::models::course::{CourseFilter, CreateCourse, UpdateCourse};
use lms_db::repositories::CourseRepo;
use validator::Validate;

use super::resolve_user_ref;
use crate::convert;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/courses
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<CourseListQuery>,
) -> AppResult<Json<Vec<Course>>> {
    let filter = CourseFilter {
        status: params.status.map(|s| s.as_str().to_string()),
        category: params.category.filter(|c| !c.trim().is_empty()),
        instructor_id: params.instructor_id,
        search: params.search.filter(|s| !s.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let courses = CourseRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(convert::course)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Course>> {
    let detail = CourseRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Course", id))?;
    Ok(Json(convert::course(detail)?))
}

/// POST /api/v1/courses
///
/// Instructors who name no instructor teach the course themselves.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<Course>)> {
    input.validate()?;

    let instructor_id = resolve_user_ref(
        &state.pool,
        "instructor",
        input.instructor_id,
        input.instructor.as_deref(),
    )
    .await?
    .or((user.role == Role::Instructor).then_some(user.user_id));

    let create = CreateCourse {
        title: input.title.trim().to_string(),
        description: input.description,
        instructor_id,
        category: input.category,
        level: input.level,
        duration_minutes: input.duration,
        students_count: input.students,
        rating: input.rating,
        price: input.price,
        status: input.status.map(|s| s.as_str().to_string()),
        thumbnail_url: input.thumbnail,
        links: convert::new_links(&input.youtube_links)?,
    };
    let detail = CourseRepo::create(&state.pool, &create).await?;

    tracing::info!(
        course_id = detail.course.id,
        links = detail.links.len(),
        created_by = user.user_id,
        "Course created"
    );
    Ok((StatusCode::CREATED, Json(convert::course(detail)?)))
}

/// PUT /api/v1/courses/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCourseRequest>,
) -> AppResult<Json<Course>> {
    input.validate()?;

    let instructor_id = resolve_user_ref(
        &state.pool,
        "instructor",
        input.instructor_id,
        input.instructor.as_deref(),
    )
    .await?;

    let changes = UpdateCourse {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        instructor_id,
        category: input.category,
        level: input.level,
        duration_minutes: input.duration,
        students_count: input.students,
        rating: input.rating,
        price: input.price,
        status: input.status.map(|s| s.as_str().to_string()),
        thumbnail_url: input.thumbnail,
        links: input
            .youtube_links
            .as_deref()
            .map(convert::new_links)
            .transpose()?,
    };
    let detail = CourseRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found("Course", id))?;
    Ok(Json(convert::course(detail)?))
}

/// DELETE /api/v1/courses/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CourseRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Course", id))
    }
}
