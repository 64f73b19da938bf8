//! YouTube URL parsing.
//!
//! Accepts the URL shapes people paste into the link editor: `watch?v=`,
//! `youtu.be/`, `embed/`, `shorts/`, `v/`, `live/`, with or without scheme
//! and `www.`/`m.` prefixes, plus a bare 11-character video id.

use std::sync::LazyLock;

use regex::Regex;

/// Length of every YouTube video id.
pub const VIDEO_ID_LEN: usize = 11;

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:youtube(?:-nocookie)?\.com/(?:watch\?(?:[^#]*&)?v=|embed/|v/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[^A-Za-z0-9_-]|$)",
    )
    .expect("valid regex")
});

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));

/// Extract the 11-character video id from a YouTube URL or bare id.
///
/// ```
/// use lms_core::youtube::extract_video_id;
///
/// assert_eq!(
///     extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
///     Some("dQw4w9WgXcQ")
/// );
/// assert_eq!(extract_video_id("https://example.com/video"), None);
/// ```
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if BARE_ID_RE.is_match(input) {
        return Some(input.to_string());
    }
    URL_RE
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Whether the input resolves to a video id.
pub fn is_youtube_url(input: &str) -> bool {
    extract_video_id(input).is_some()
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}")
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// High-quality thumbnail served by YouTube's image CDN.
pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/hqdefault.jpg")
}
