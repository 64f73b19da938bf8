//! Small string helpers used for display fields.

/// Shorten `s` to at most `max_chars` characters, ending with `...` when cut.
///
/// ```
/// use lms_core::text::truncate;
///
/// assert_eq!(truncate("Introduction to Rust", 12), "Introduct...");
/// assert_eq!(truncate("Short", 12), "Short");
/// ```
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    if max_chars <= 3 {
        return s.chars().take(max_chars).collect();
    }
    let mut out: String = s.chars().take(max_chars - 3).collect();
    out.push_str("...");
    out
}

/// Up to two upper-case initials for an avatar placeholder.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Lower-case, hyphen-separated, ASCII-alphanumeric slug.
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    let mut pending_dash = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Upper-case the first character and replace underscores with spaces.
///
/// Turns enum-ish values like `committee_tester` into `Committee tester`.
pub fn capitalize(s: &str) -> String {
    let spaced = s.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate("abc", 3), "abc");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn truncate_tiny_limit_has_no_ellipsis() {
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn initials_from_names() {
        assert_eq!(initials("Ada Lovelace"), "AL");
        assert_eq!(initials("grace brewster murray hopper"), "GB");
        assert_eq!(initials("Plato"), "P");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Intro to  Rust: Part 1!"), "intro-to-rust-part-1");
        assert_eq!(slugify("--Already-Slugged--"), "already-slugged");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn capitalize_enum_values() {
        assert_eq!(capitalize("committee_tester"), "Committee tester");
        assert_eq!(capitalize("admin"), "Admin");
        assert_eq!(capitalize(""), "");
    }
}
