use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// A YouTube link attached to a course or content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeLink {
    pub id: DbId,
    pub title: String,
    pub url: String,
    /// 11-character id extracted from `url` when the link was saved.
    pub video_id: String,
    pub description: Option<String>,
    pub order: i32,
}

/// A link as submitted inside a course or content payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct YoutubeLinkInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(custom(function = "crate::validation::youtube_url"))]
    pub url: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Position in the list. Defaults to the index in the submitted array.
    pub order: Option<i32>,
}
