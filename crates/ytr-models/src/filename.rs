//! Filesystem-safe names derived from video titles.

/// Maximum characters kept from the title.
const MAX_TITLE_CHARS: usize = 50;

/// Build `{sanitized_title}_{video_id}`.
///
/// Keeps ASCII alphanumerics, `-`, `_` and whitespace, collapses whitespace
/// runs into a single `_`, and truncates the title part to 50 characters.
pub fn safe_filename(title: &str, video_id: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            sanitized.push(c);
            in_whitespace = false;
        }
        // Dropped characters do not end a whitespace run
    }

    let truncated: String = sanitized.chars().take(MAX_TITLE_CHARS).collect();
    format!("{}_{}", truncated, video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(
            safe_filename("Never Gonna Give You Up", "dQw4w9WgXcQ"),
            "Never_Gonna_Give_You_Up_dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(
            safe_filename("Rick Astley - Never Gonna (Official Video)!", "dQw4w9WgXcQ"),
            "Rick_Astley_-_Never_Gonna_Official_Video_dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_removed_char_between_spaces_collapses() {
        assert_eq!(safe_filename("a & b", "x"), "a_b_x");
    }

    #[test]
    fn test_truncates_title() {
        let title = "a".repeat(80);
        let name = safe_filename(&title, "dQw4w9WgXcQ");
        assert_eq!(name, format!("{}_dQw4w9WgXcQ", "a".repeat(50)));
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(safe_filename("", "dQw4w9WgXcQ"), "_dQw4w9WgXcQ");
    }
}
