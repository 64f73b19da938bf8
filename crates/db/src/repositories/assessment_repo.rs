//! Repository for assessments, their questions and submitted attempts.

use lms_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};

use crate::models::assessment::{
    Assessment, AssessmentDetail, Attempt, CreateAssessment, CreateAttempt, NewQuestion,
    Question, UpdateAssessment,
};

const COLUMNS: &str = "id, title, description, course_id, duration_minutes, pass_percent, \
    negative_marking, negative_mark_percent, status, created_at, updated_at";

const QUESTION_COLUMNS: &str = "id, assessment_id, prompt, options, correct_option, \
    sort_order, created_at, updated_at";

const ATTEMPT_COLUMNS: &str = "a.id, a.assessment_id, a.user_id, u.full_name AS user_name, \
    a.answers, a.correct_count, a.wrong_count, a.unanswered_count, a.total_questions, \
    a.score, a.passed, a.submitted_at";

pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Insert an assessment with its questions in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssessment,
    ) -> Result<AssessmentDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO assessments \
                (title, description, course_id, duration_minutes, pass_percent, \
                 negative_marking, negative_mark_percent, status) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 50), COALESCE($6, false), \
                     COALESCE($7, 25), COALESCE($8, 'draft')) \
             RETURNING {COLUMNS}"
        );
        let assessment = sqlx::query_as::<_, Assessment>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.course_id)
            .bind(input.duration_minutes)
            .bind(input.pass_percent)
            .bind(input.negative_marking)
            .bind(input.negative_mark_percent)
            .bind(&input.status)
            .fetch_one(&mut *tx)
            .await?;

        let questions = Self::insert_questions(&mut tx, assessment.id, &input.questions).await?;
        tx.commit().await?;

        Ok(AssessmentDetail {
            assessment,
            questions,
        })
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AssessmentDetail>, sqlx::Error> {
        let Some(assessment) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let questions = Self::list_questions(pool, id).await?;
        Ok(Some(AssessmentDetail {
            assessment,
            questions,
        }))
    }

    pub async fn list_questions(
        pool: &PgPool,
        assessment_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM assessment_questions \
             WHERE assessment_id = $1 ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(assessment_id)
            .fetch_all(pool)
            .await
    }

    /// List assessments, optionally narrowed to a course and/or status.
    /// Question counts are loaded alongside so callers can summarize.
    pub async fn list(
        pool: &PgPool,
        course_id: Option<DbId>,
        status: Option<&str>,
    ) -> Result<Vec<(Assessment, i64)>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, \
                (SELECT COUNT(*) FROM assessment_questions q WHERE q.assessment_id = assessments.id) \
                    AS question_count \
             FROM assessments \
             WHERE ($1::BIGINT IS NULL OR course_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, AssessmentWithCount>(&query)
            .bind(course_id)
            .bind(status)
            .fetch_all(pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| (row.assessment, row.question_count))
            .collect())
    }

    /// Partial update; `questions: Some(..)` replaces the whole question set
    /// in the same transaction.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAssessment,
    ) -> Result<Option<AssessmentDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE assessments SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                course_id = COALESCE($4, course_id), \
                duration_minutes = COALESCE($5, duration_minutes), \
                pass_percent = COALESCE($6, pass_percent), \
                negative_marking = COALESCE($7, negative_marking), \
                negative_mark_percent = COALESCE($8, negative_mark_percent), \
                status = COALESCE($9, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let Some(assessment) = sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.course_id)
            .bind(input.duration_minutes)
            .bind(input.pass_percent)
            .bind(input.negative_marking)
            .bind(input.negative_mark_percent)
            .bind(&input.status)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(ref questions) = input.questions {
            sqlx::query("DELETE FROM assessment_questions WHERE assessment_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            Self::insert_questions(&mut tx, id, questions).await?;
        }
        tx.commit().await?;

        Self::find_detail(pool, assessment.id).await
    }

    /// Questions and attempts go with the assessment via `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn record_attempt(
        pool: &PgPool,
        input: &CreateAttempt,
    ) -> Result<Attempt, sqlx::Error> {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO assessment_attempts \
                (assessment_id, user_id, answers, correct_count, wrong_count, \
                 unanswered_count, total_questions, score, passed) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(input.assessment_id)
        .bind(input.user_id)
        .bind(Json(&input.answers))
        .bind(input.correct_count)
        .bind(input.wrong_count)
        .bind(input.unanswered_count)
        .bind(input.total_questions)
        .bind(input.score)
        .bind(input.passed)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {ATTEMPT_COLUMNS} FROM assessment_attempts a \
             LEFT JOIN users u ON u.id = a.user_id WHERE a.id = $1"
        );
        sqlx::query_as::<_, Attempt>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Attempts for an assessment, newest first. `user_id` narrows to one taker.
    pub async fn list_attempts(
        pool: &PgPool,
        assessment_id: DbId,
        user_id: Option<DbId>,
    ) -> Result<Vec<Attempt>, sqlx::Error> {
        let query = format!(
            "SELECT {ATTEMPT_COLUMNS} FROM assessment_attempts a \
             LEFT JOIN users u ON u.id = a.user_id \
             WHERE a.assessment_id = $1 AND ($2::BIGINT IS NULL OR a.user_id = $2) \
             ORDER BY a.submitted_at DESC, a.id DESC"
        );
        sqlx::query_as::<_, Attempt>(&query)
            .bind(assessment_id)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn insert_questions(
        conn: &mut PgConnection,
        assessment_id: DbId,
        questions: &[NewQuestion],
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "INSERT INTO assessment_questions \
                (assessment_id, prompt, options, correct_option, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {QUESTION_COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(questions.len());
        for question in questions {
            let row = sqlx::query_as::<_, Question>(&query)
                .bind(assessment_id)
                .bind(&question.prompt)
                .bind(Json(&question.options))
                .bind(question.correct_option)
                .bind(question.sort_order)
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        Ok(inserted)
    }
}

#[derive(sqlx::FromRow)]
struct AssessmentWithCount {
    #[sqlx(flatten)]
    assessment: Assessment,
    question_count: i64,
}
