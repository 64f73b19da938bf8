//! Assessment, question and attempt models (test-taking).

use lms_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `assessments` table.
#[derive(Debug, Clone, FromRow)]
pub struct Assessment {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    pub duration_minutes: Option<i32>,
    pub pass_percent: f64,
    pub negative_marking: bool,
    pub negative_mark_percent: f64,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from `assessment_questions`. `options` is a JSON array of strings.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: DbId,
    pub assessment_id: DbId,
    pub prompt: String,
    pub options: Json<Vec<String>>,
    pub correct_option: i32,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct AssessmentDetail {
    pub assessment: Assessment,
    /// Ordered by `sort_order`, then id.
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: i32,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CreateAssessment {
    pub title: String,
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    pub duration_minutes: Option<i32>,
    pub pass_percent: Option<f64>,
    pub negative_marking: Option<bool>,
    pub negative_mark_percent: Option<f64>,
    pub status: Option<String>,
    pub questions: Vec<NewQuestion>,
}

/// Partial update. `questions: Some(..)` replaces the question set.
#[derive(Debug, Clone, Default)]
pub struct UpdateAssessment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<DbId>,
    pub duration_minutes: Option<i32>,
    pub pass_percent: Option<f64>,
    pub negative_marking: Option<bool>,
    pub negative_mark_percent: Option<f64>,
    pub status: Option<String>,
    pub questions: Option<Vec<NewQuestion>>,
}

/// A row from `assessment_attempts` with the taker's name joined.
#[derive(Debug, Clone, FromRow)]
pub struct Attempt {
    pub id: DbId,
    pub assessment_id: DbId,
    pub user_id: DbId,
    pub user_name: Option<String>,
    pub answers: Json<Vec<Option<i32>>>,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub unanswered_count: i32,
    pub total_questions: i32,
    pub score: f64,
    pub passed: bool,
    pub submitted_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateAttempt {
    pub assessment_id: DbId,
    pub user_id: DbId,
    pub answers: Vec<Option<i32>>,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub unanswered_count: i32,
    pub total_questions: i32,
    pub score: f64,
    pub passed: bool,
}
