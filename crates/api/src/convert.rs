//! Reshaping between storage rows and wire DTOs.
//!
//! Rows use storage names (`full_name`, `students_count`, `sort_order`);
//! the API speaks the client's names (`name`, `students`, `order`).

use lms_core::dto::assessment::{Assessment, Attempt, Question, QuestionInput};
use lms_core::dto::content::ContentItem;
use lms_core::dto::course::Course;
use lms_core::dto::user::User;
use lms_core::dto::youtube::{YoutubeLink, YoutubeLinkInput};
use lms_core::error::CoreError;
use lms_core::youtube::extract_video_id;
use lms_db::models::assessment::{self as assessment_row, AssessmentDetail, NewQuestion};
use lms_db::models::content::ContentDetail;
use lms_db::models::course::CourseDetail;
use lms_db::models::user as user_row;
use lms_db::models::youtube_link::{self as link_row, NewYoutubeLink};

use crate::error::AppResult;

/// Parse a text column that the schema constrains to an enum.
fn parse_column<T>(value: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| CoreError::Internal(format!("Unexpected stored value: {e}")).into())
}

pub fn user(row: user_row::User) -> AppResult<User> {
    Ok(User {
        id: row.id,
        name: row.full_name,
        email: row.email,
        role: parse_column(&row.role)?,
        level: row.level,
        status: parse_column(&row.status)?,
        phone: row.phone,
        avatar: row.avatar_url,
        bio: row.bio,
        last_active: row.last_login_at,
        join_date: row.created_at,
    })
}

pub fn youtube_link(row: link_row::YoutubeLink) -> YoutubeLink {
    YoutubeLink {
        id: row.id,
        title: row.title,
        url: row.url,
        video_id: row.video_id,
        description: row.description,
        order: row.sort_order,
    }
}

pub fn course(detail: CourseDetail) -> AppResult<Course> {
    let CourseDetail { course, links } = detail;
    Ok(Course {
        id: course.id,
        title: course.title,
        description: course.description,
        instructor: course.instructor_name,
        instructor_id: course.instructor_id,
        category: course.category,
        level: course.level,
        duration: course.duration_minutes,
        students: course.students_count,
        rating: course.rating,
        price: course.price,
        status: parse_column(&course.status)?,
        thumbnail: course.thumbnail_url,
        youtube_links: links.into_iter().map(youtube_link).collect(),
        created_at: course.created_at,
        updated_at: course.updated_at,
    })
}

pub fn content(detail: ContentDetail) -> AppResult<ContentItem> {
    let ContentDetail { item, links } = detail;
    Ok(ContentItem {
        id: item.id,
        title: item.title,
        description: item.description,
        content_type: parse_column(&item.content_type)?,
        course_id: item.course_id,
        course: item.course_title,
        author_id: item.author_id,
        author: item.author_name,
        url: item.url,
        body: item.body,
        size: item.file_size_bytes,
        duration: item.duration_minutes,
        views: item.views_count,
        status: parse_column(&item.status)?,
        youtube_links: links.into_iter().map(youtube_link).collect(),
        created_at: item.created_at,
        updated_at: item.updated_at,
    })
}

/// `include_key` controls whether `correct_option` is exposed.
pub fn assessment(detail: AssessmentDetail, include_key: bool) -> AppResult<Assessment> {
    let AssessmentDetail {
        assessment,
        questions,
    } = detail;
    let questions: Vec<Question> = questions
        .into_iter()
        .map(|q| Question {
            id: q.id,
            prompt: q.prompt,
            options: q.options.0,
            correct_option: include_key.then_some(q.correct_option),
            order: q.sort_order,
        })
        .collect();
    let question_count = questions.len();
    assessment_with(assessment, question_count, questions)
}

/// List view: counts only, no questions.
pub fn assessment_summary(
    row: assessment_row::Assessment,
    question_count: i64,
) -> AppResult<Assessment> {
    let count = usize::try_from(question_count).unwrap_or_default();
    assessment_with(row, count, Vec::new())
}

fn assessment_with(
    row: assessment_row::Assessment,
    question_count: usize,
    questions: Vec<Question>,
) -> AppResult<Assessment> {
    Ok(Assessment {
        id: row.id,
        title: row.title,
        description: row.description,
        course_id: row.course_id,
        duration: row.duration_minutes,
        pass_percent: row.pass_percent,
        negative_marking: row.negative_marking,
        negative_mark_percent: row.negative_mark_percent,
        status: parse_column(&row.status)?,
        question_count,
        questions,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub fn attempt(row: assessment_row::Attempt) -> Attempt {
    Attempt {
        id: row.id,
        assessment_id: row.assessment_id,
        user_id: row.user_id,
        user: row.user_name,
        answers: row.answers.0,
        correct: row.correct_count,
        wrong: row.wrong_count,
        unanswered: row.unanswered_count,
        total: row.total_questions,
        score: row.score,
        passed: row.passed,
        submitted_at: row.submitted_at,
    }
}

/// Extract each link's video id. Links without an explicit `order` keep
/// their position in the submitted list.
pub fn new_links(inputs: &[YoutubeLinkInput]) -> AppResult<Vec<NewYoutubeLink>> {
    inputs
        .iter()
        .zip(0i32..)
        .map(|(input, index)| {
            let video_id = extract_video_id(&input.url).ok_or_else(|| {
                CoreError::Validation(format!("Not a YouTube video URL: {}", input.url))
            })?;
            Ok(NewYoutubeLink {
                title: input.title.trim().to_string(),
                url: input.url.trim().to_string(),
                video_id,
                description: input.description.clone(),
                sort_order: input.order.unwrap_or(index),
            })
        })
        .collect()
}

pub fn new_questions(inputs: &[QuestionInput]) -> Vec<NewQuestion> {
    inputs
        .iter()
        .zip(0i32..)
        .map(|(input, index)| NewQuestion {
            prompt: input.prompt.clone(),
            options: input.options.clone(),
            correct_option: input.correct_option,
            sort_order: input.order.unwrap_or(index),
        })
        .collect()
}
