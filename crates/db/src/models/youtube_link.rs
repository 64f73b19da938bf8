//! YouTube link child rows shared by courses and content items.

use lms_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `youtube_links` table.
#[derive(Debug, Clone, FromRow)]
pub struct YoutubeLink {
    pub id: DbId,
    pub course_id: Option<DbId>,
    pub content_id: Option<DbId>,
    pub title: String,
    pub url: String,
    pub video_id: String,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A link to insert. `video_id` must already be extracted from `url`.
#[derive(Debug, Clone)]
pub struct NewYoutubeLink {
    pub title: String,
    pub url: String,
    pub video_id: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// The row that owns a set of links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkParent {
    Course(DbId),
    Content(DbId),
}

impl LinkParent {
    /// Foreign-key column on `youtube_links` that points at this parent.
    pub fn column(self) -> &'static str {
        match self {
            LinkParent::Course(_) => "course_id",
            LinkParent::Content(_) => "content_id",
        }
    }

    pub fn id(self) -> DbId {
        match self {
            LinkParent::Course(id) | LinkParent::Content(id) => id,
        }
    }
}
