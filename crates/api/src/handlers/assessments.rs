//! Handlers for `/assessments` and their attempts.
//!
//! Callers who cannot manage assessments only see published ones, never see
//! the answer key, and only see their own attempts.

use axum::extract::State;
use axum::http::StatusCode;
use lms_core::dto::assessment::{
    Assessment, AssessmentListQuery, Attempt, CreateAssessmentRequest, SubmitAttemptRequest,
    UpdateAssessmentRequest,
};
use lms_core::dto::PublishStatus;
use lms_core::error::CoreError;
use lms_core::scoring::{calculate_score, grade_answers, is_passing};
use lms_core::types::DbId;
use lms_db::models::assessment::{AssessmentDetail, CreateAssessment, CreateAttempt, UpdateAssessment};
use lms_db::repositories::AssessmentRepo;
use validator::Validate;

use crate::convert;
use crate::error::{AppError, AppResult};
use crate::extract::{Json, Path, Query};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAssessmentManager, RequireAuth};
use crate::state::AppState;

/// Load an assessment the caller is allowed to see.
async fn visible_detail(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> AppResult<AssessmentDetail> {
    let detail = AssessmentRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Assessment", id))?;
    let published = detail.assessment.status == PublishStatus::Published.as_str();
    if !published && !user.role.can_manage_assessments() {
        return Err(AppError::not_found("Assessment", id));
    }
    Ok(detail)
}

fn to_i32(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// GET /api/v1/assessments
pub async fn list(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AssessmentListQuery>,
) -> AppResult<Json<Vec<Assessment>>> {
    let status = if user.role.can_manage_assessments() {
        params.status
    } else {
        Some(PublishStatus::Published)
    };
    let rows = AssessmentRepo::list(&state.pool, params.course_id, status.map(|s| s.as_str())).await?;
    let assessments = rows
        .into_iter()
        .map(|(row, count)| convert::assessment_summary(row, count))
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(assessments))
}

/// GET /api/v1/assessments/{id}
pub async fn get_by_id(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Assessment>> {
    let detail = visible_detail(&state, &user, id).await?;
    let include_key = user.role.can_manage_assessments();
    Ok(Json(convert::assessment(detail, include_key)?))
}

/// POST /api/v1/assessments
pub async fn create(
    RequireAssessmentManager(user): RequireAssessmentManager,
    State(state): State<AppState>,
    Json(input): Json<CreateAssessmentRequest>,
) -> AppResult<(StatusCode, Json<Assessment>)> {
    input.validate()?;

    let create = CreateAssessment {
        title: input.title.trim().to_string(),
        description: input.description,
        course_id: input.course_id,
        duration_minutes: input.duration,
        pass_percent: input.pass_percent,
        negative_marking: input.negative_marking,
        negative_mark_percent: input.negative_mark_percent,
        status: input.status.map(|s| s.as_str().to_string()),
        questions: convert::new_questions(&input.questions),
    };
    let mut detail = AssessmentRepo::create(&state.pool, &create).await?;
    detail.questions.sort_by_key(|q| (q.sort_order, q.id));

    tracing::info!(
        assessment_id = detail.assessment.id,
        questions = detail.questions.len(),
        created_by = user.user_id,
        "Assessment created"
    );
    Ok((StatusCode::CREATED, Json(convert::assessment(detail, true)?)))
}

/// PUT /api/v1/assessments/{id}
pub async fn update(
    RequireAssessmentManager(_): RequireAssessmentManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssessmentRequest>,
) -> AppResult<Json<Assessment>> {
    input.validate()?;

    let changes = UpdateAssessment {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        course_id: input.course_id,
        duration_minutes: input.duration,
        pass_percent: input.pass_percent,
        negative_marking: input.negative_marking,
        negative_mark_percent: input.negative_mark_percent,
        status: input.status.map(|s| s.as_str().to_string()),
        questions: input.questions.as_deref().map(convert::new_questions),
    };
    let detail = AssessmentRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::not_found("Assessment", id))?;
    Ok(Json(convert::assessment(detail, true)?))
}

/// DELETE /api/v1/assessments/{id}
pub async fn delete(
    RequireAssessmentManager(_): RequireAssessmentManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AssessmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("Assessment", id))
    }
}

/// POST /api/v1/assessments/{id}/attempts
///
/// Grades the answers against the stored key and records the attempt.
pub async fn submit_attempt(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SubmitAttemptRequest>,
) -> AppResult<(StatusCode, Json<Attempt>)> {
    input.validate()?;

    let detail = visible_detail(&state, &user, id).await?;
    if detail.questions.is_empty() {
        return Err(CoreError::Validation("Assessment has no questions".into()).into());
    }
    if input.answers.len() > detail.questions.len() {
        return Err(CoreError::Validation(format!(
            "answers: expected at most {} entries, got {}",
            detail.questions.len(),
            input.answers.len()
        ))
        .into());
    }

    let key: Vec<i32> = detail.questions.iter().map(|q| q.correct_option).collect();
    let summary = grade_answers(&key, &input.answers);
    let assessment = &detail.assessment;
    let score = calculate_score(
        summary.correct,
        summary.total,
        assessment.negative_marking,
        assessment.negative_mark_percent,
    );
    let passed = is_passing(score, assessment.pass_percent);

    let attempt = AssessmentRepo::record_attempt(
        &state.pool,
        &CreateAttempt {
            assessment_id: id,
            user_id: user.user_id,
            answers: input.answers,
            correct_count: to_i32(summary.correct),
            wrong_count: to_i32(summary.wrong),
            unanswered_count: to_i32(summary.unanswered),
            total_questions: to_i32(summary.total),
            score,
            passed,
        },
    )
    .await?;

    tracing::info!(
        assessment_id = id,
        user_id = user.user_id,
        score,
        passed,
        "Attempt graded"
    );
    Ok((StatusCode::CREATED, Json(convert::attempt(attempt))))
}

/// GET /api/v1/assessments/{id}/attempts
pub async fn list_attempts(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Attempt>>> {
    visible_detail(&state, &user, id).await?;
    let only_user = (!user.role.can_manage_assessments()).then_some(user.user_id);
    let attempts = AssessmentRepo::list_attempts(&state.pool, id, only_user)
        .await?
        .into_iter()
        .map(convert::attempt)
        .collect();
    Ok(Json(attempts))
}
