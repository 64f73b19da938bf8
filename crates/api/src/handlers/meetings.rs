//! Handlers for `/meetings`, a thin pass-through to Zoom.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use lms_zoom::meetings::{CreateMeeting, Meeting, MeetingList, UpdateMeeting};
use lms_zoom::ZoomClient;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::rbac::RequireStaff;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct MeetingListParams {
    pub page_size: Option<u32>,
    pub next_page_token: Option<String>,
}

fn zoom(state: &AppState) -> AppResult<Arc<ZoomClient>> {
    state.zoom.clone().ok_or(AppError::ZoomNotConfigured)
}

/// GET /api/v1/meetings
pub async fn list(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<MeetingListParams>,
) -> AppResult<Json<MeetingList>> {
    let page = zoom(&state)?
        .list_meetings(
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            params.next_page_token.as_deref(),
        )
        .await?;
    Ok(Json(page))
}

/// POST /api/v1/meetings
pub async fn create(
    RequireStaff(user): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateMeeting>,
) -> AppResult<(StatusCode, Json<Meeting>)> {
    input.validate()?;

    let meeting = zoom(&state)?.create_meeting(&input).await?;
    tracing::info!(meeting_id = meeting.id, created_by = user.user_id, "Zoom meeting created");
    Ok((StatusCode::CREATED, Json(meeting)))
}

/// GET /api/v1/meetings/{id}
pub async fn get_by_id(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Meeting>> {
    Ok(Json(zoom(&state)?.get_meeting(id).await?))
}

/// PATCH /api/v1/meetings/{id}
pub async fn update(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateMeeting>,
) -> AppResult<StatusCode> {
    input.validate()?;
    zoom(&state)?.update_meeting(id, &input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/meetings/{id}
pub async fn delete(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    zoom(&state)?.delete_meeting(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
