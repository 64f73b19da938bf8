use serde::{Deserialize, Serialize};
use validator::Validate;

use super::youtube::{YoutubeLink, YoutubeLinkInput};
use super::{ContentType, PublishStatus};
use crate::types::{DbId, Timestamp};

/// A content library item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub course_id: Option<DbId>,
    /// Title of the owning course, when linked.
    pub course: Option<String>,
    pub author_id: Option<DbId>,
    /// Author's display name (joined from `users.full_name`).
    pub author: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
    /// File size in bytes.
    pub size: Option<i64>,
    /// Length in minutes.
    pub duration: Option<i32>,
    pub views: i32,
    pub status: PublishStatus,
    pub youtube_links: Vec<YoutubeLink>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /content`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub course_id: Option<DbId>,
    #[validate(length(min = 1, max = 120))]
    pub author: Option<String>,
    pub author_id: Option<DbId>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(max = 100000))]
    pub body: Option<String>,
    #[validate(range(min = 0))]
    pub size: Option<i64>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    pub status: Option<PublishStatus>,
    #[serde(default)]
    #[validate(nested)]
    pub youtube_links: Vec<YoutubeLinkInput>,
}

/// Body of `PUT /content/{id}`. Same replacement rules as courses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 10000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub course_id: Option<DbId>,
    #[validate(length(min = 1, max = 120))]
    pub author: Option<String>,
    pub author_id: Option<DbId>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(max = 100000))]
    pub body: Option<String>,
    #[validate(range(min = 0))]
    pub size: Option<i64>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    pub status: Option<PublishStatus>,
    #[validate(nested)]
    pub youtube_links: Option<Vec<YoutubeLinkInput>>,
}

/// Query string of `GET /content`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentListQuery {
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub course_id: Option<DbId>,
    pub status: Option<PublishStatus>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Response of `POST /content/{id}/view`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCount {
    pub id: DbId,
    pub views: i32,
}
