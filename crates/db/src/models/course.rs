//! Course entity model and DTOs.

use lms_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::youtube_link::{NewYoutubeLink, YoutubeLink};

/// A row from `courses` with the instructor's name joined from `users`.
#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Option<DbId>,
    pub instructor_name: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub duration_minutes: i32,
    pub students_count: i32,
    pub rating: f64,
    pub price: f64,
    pub status: String,
    pub thumbnail_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A course together with its ordered YouTube links.
#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub course: Course,
    pub links: Vec<YoutubeLink>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCourse {
    pub title: String,
    pub description: Option<String>,
    pub instructor_id: Option<DbId>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub duration_minutes: Option<i32>,
    pub students_count: Option<i32>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub thumbnail_url: Option<String>,
    pub links: Vec<NewYoutubeLink>,
}

/// Partial update. `links: Some(..)` replaces every link of the course.
#[derive(Debug, Clone, Default)]
pub struct UpdateCourse {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor_id: Option<DbId>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub duration_minutes: Option<i32>,
    pub students_count: Option<i32>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
    pub status: Option<String>,
    pub thumbnail_url: Option<String>,
    pub links: Option<Vec<NewYoutubeLink>>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub instructor_id: Option<DbId>,
    /// Case-insensitive substring of `title` or `description`.
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
