//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assessment_repo;
pub mod content_repo;
pub mod course_repo;
pub mod session_repo;
pub mod user_repo;
pub mod youtube_link_repo;

pub use assessment_repo::AssessmentRepo;
pub use content_repo::ContentRepo;
pub use course_repo::CourseRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use youtube_link_repo::YoutubeLinkRepo;

/// Wrap a search term for `ILIKE`, escaping the pattern metacharacters.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ada"), "%ada%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
