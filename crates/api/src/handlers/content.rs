//! Handlers for the `/content` resource (the content library).

use axum::extract::State;
use axum::http::StatusCode;
use lms_core::dto::content::{
    ContentItem, ContentListQuery, CreateContentRequest, UpdateContentRequest, ViewCount,
};
use lms_core::pagination::{clamp_limit, clamp_offset};
use lms_core::types::DbId;
use lms_db::models::content::{ContentFilter, CreateContent, UpdateContent};
use lms_db::repositories::ContentRepo;
use validator::Validate;

use super::resolve_user_ref;
use crate::convert;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::{RequireAuth, RequireStaff};
use crate::state::AppState;

/// GET /api/v1/content
pub async fn list(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ContentListQuery>,
) -> AppResult<Json<Vec<ContentItem>>> {
    let filter = ContentFilter {
        content_type: params.content_type.map(|t| t.as_str().to_string()),
        course_id: params.course_id,
        status: params.status.map(|s| s.as_str().to_string()),
        search: params.search.filter(|s| !s.trim().is_empty()),
        limit: clamp_limit(params.limit),
        offset: clamp_offset(params.offset),
    };
    let items = ContentRepo::list(&state.pool, &filter)
        .await?
        .into_iter()
        .map(convert::content)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(items))
}

/// GET /api/v1/content/{id}
pub async fn get_by_id(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContentItem>> {
    let detail = ContentRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Content", id))?;
    Ok(Json(convert::content(detail)?))
}

/// POST /api/v1/content
///
/// The author defaults to the caller.
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateContentRequest>,
) -> AppResult<(StatusCode, Json<ContentItem>)> {
    input.validate()?;

    let author_id = resolve_user_ref(
        &state.pool,
        "author",
        input.author_id,
        input.author.as_deref(),
    )
    .await?
    .unwrap_or(user.user_id);

    let create = CreateContent {
        title: input.title.trim().to_string(),
        description: input.description,
        content_type: input.content_type.as_str().to_string(),
        course_id: input.course_id,
        author_id: Some(author_id),
        url: input.url,
        body: input.body,
        file_size_bytes: input.size,
        duration_minutes: input.duration,
        status: input.status.map(|s| s.as_str().to_string()),
        links: convert::new_links(&input.youtube_links)?,
    };
    let detail = ContentRepo::create(&state.pool, &create).await?;

    tracing::info!(
        content_id = detail.item.id,
        content_type = %detail.item.content_type,
        links = detail.links.len(),
        "Content item created"
    );
    Ok((StatusCode::CREATED, Json(convert::content(detail)?)))
}

/// PUT /api/v1/content/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContentRequest>,
) -> AppResult<Json<ContentItem>> {
    input.validate()?;

    let author_id = resolve_user_ref(
        &state.pool,
        "author",
        input.author_id,
        input.author.as_deref(),
    )
    .await?;

    let changes = UpdateContent {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        content_type: input.content_type.map(|t| t.as_str().to_string()),
        course_id: input.course_id,
        author_id,
        url: input.url,
        body: input.body,
        file_size_bytes: input.size,
        duration_minutes: input.duration,
        status: input.status.map(|s| s.as_str().to_string()),
        links: input
            .youtube_links
            .as_deref()
            .map(convert::new_links)
            .transpose()?,
    };
    let detail = ContentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found("Content", id))?;
    Ok(Json(convert::content(detail)?))
}

/// DELETE /api/v1/content/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ContentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Content", id))
    }
}

/// POST /api/v1/content/{id}/view
pub async fn record_view(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ViewCount>> {
    let views = ContentRepo::increment_views(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Content", id))?;
    Ok(Json(ViewCount { id, views }))
}
