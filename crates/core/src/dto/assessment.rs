use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::PublishStatus;
use crate::types::{DbId, Timestamp};

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: DbId,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`. Hidden from callers who cannot manage assessments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option: Option<i32>,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    /// Time limit in minutes; `None` means untimed.
    pub duration: Option<i32>,
    pub pass_percent: f64,
    pub negative_marking: bool,
    pub negative_mark_percent: f64,
    pub status: PublishStatus,
    pub question_count: usize,
    pub questions: Vec<Question>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A question as submitted when creating or editing an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "correct_option_in_range"))]
pub struct QuestionInput {
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,
    #[validate(length(min = 2, max = 10))]
    pub options: Vec<String>,
    pub correct_option: i32,
    pub order: Option<i32>,
}

fn correct_option_in_range(q: &QuestionInput) -> Result<(), ValidationError> {
    let in_range = usize::try_from(q.correct_option)
        .map(|idx| idx < q.options.len())
        .unwrap_or(false);
    if in_range {
        Ok(())
    } else {
        let mut err = ValidationError::new("correct_option");
        err.message = Some(Cow::Borrowed("correct_option must index one of the options"));
        Err(err)
    }
}

/// Body of `POST /assessments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub pass_percent: Option<f64>,
    pub negative_marking: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub negative_mark_percent: Option<f64>,
    pub status: Option<PublishStatus>,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionInput>,
}

/// Body of `PUT /assessments/{id}`. `questions`, when present, replaces the set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAssessmentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    #[validate(range(min = 1))]
    pub duration: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub pass_percent: Option<f64>,
    pub negative_marking: Option<bool>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub negative_mark_percent: Option<f64>,
    pub status: Option<PublishStatus>,
    #[validate(nested)]
    pub questions: Option<Vec<QuestionInput>>,
}

/// Body of `POST /assessments/{id}/attempts`.
///
/// `answers[i]` is the option chosen for the i-th question (by `order`), or
/// `null` when skipped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    #[validate(length(max = 500))]
    pub answers: Vec<Option<i32>>,
}

/// A graded attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: DbId,
    pub assessment_id: DbId,
    pub user_id: DbId,
    /// Display name of the test taker.
    pub user: Option<String>,
    pub answers: Vec<Option<i32>>,
    pub correct: i32,
    pub wrong: i32,
    pub unanswered: i32,
    pub total: i32,
    pub score: f64,
    pub passed: bool,
    pub submitted_at: Timestamp,
}

/// Query string of `GET /assessments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentListQuery {
    pub course_id: Option<DbId>,
    pub status: Option<PublishStatus>,
}
