use serde::{Deserialize, Serialize};
use validator::Validate;

use super::youtube::{YoutubeLink, YoutubeLinkInput};
use super::PublishStatus;
use crate::types::{DbId, Timestamp};

/// A course with its instructor name resolved and its links attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Instructor's display name (joined from `users.full_name`).
    pub instructor: Option<String>,
    pub instructor_id: Option<DbId>,
    pub category: Option<String>,
    pub level: Option<String>,
    /// Length in minutes.
    pub duration: i32,
    pub students: i32,
    pub rating: f64,
    pub price: f64,
    pub status: PublishStatus,
    pub thumbnail: Option<String>,
    pub youtube_links: Vec<YoutubeLink>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /courses`.
///
/// The instructor may be given by id or by display name; a name is resolved
/// against `users.full_name`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub instructor: Option<String>,
    pub instructor_id: Option<DbId>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 60))]
    pub level: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[validate(range(min = 0))]
    pub students: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub status: Option<PublishStatus>,
    #[validate(url)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub youtube_links: Vec<YoutubeLinkInput>,
}

/// Body of `PUT /courses/{id}`.
///
/// Absent fields are left unchanged. When `youtube_links` is present the
/// course's links are replaced wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub instructor: Option<String>,
    pub instructor_id: Option<DbId>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    #[validate(length(max = 60))]
    pub level: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[validate(range(min = 0))]
    pub students: Option<i32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub status: Option<PublishStatus>,
    #[validate(url)]
    pub thumbnail: Option<String>,
    #[validate(nested)]
    pub youtube_links: Option<Vec<YoutubeLinkInput>>,
}

/// Query string of `GET /courses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseListQuery {
    pub status: Option<PublishStatus>,
    pub category: Option<String>,
    pub instructor_id: Option<DbId>,
    /// Case-insensitive substring match against title or description.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
