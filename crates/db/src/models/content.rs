//! Content library item model and DTOs.

use lms_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use super::youtube_link::{NewYoutubeLink, YoutubeLink};

/// A row from `content_items` with the author name and course title joined.
#[derive(Debug, Clone, FromRow)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub course_id: Option<DbId>,
    pub course_title: Option<String>,
    pub author_id: Option<DbId>,
    pub author_name: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub views_count: i32,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct ContentDetail {
    pub item: ContentItem,
    pub links: Vec<YoutubeLink>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateContent {
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub course_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub links: Vec<NewYoutubeLink>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateContent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub course_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub file_size_bytes: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub status: Option<String>,
    pub links: Option<Vec<NewYoutubeLink>>,
}

#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    pub content_type: Option<String>,
    pub course_id: Option<DbId>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
