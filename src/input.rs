//! Input parsing for user-supplied market identifiers
//!
//! Accepts a bare slug, a full Polymarket URL, or a numeric event id and
//! normalizes it into a typed [`Target`].

use url::Url;

/// A normalized lookup target. Exactly one of `slug`/`event_id` is populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Event slug, when the input was not purely numeric
    pub slug: Option<String>,
    /// Numeric event id, kept in string form
    pub event_id: Option<String>,
}

impl Target {
    /// Create a slug target
    pub fn slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            event_id: None,
        }
    }

    /// Create a numeric event id target
    pub fn event_id(id: impl Into<String>) -> Self {
        Self {
            slug: None,
            event_id: Some(id.into()),
        }
    }
}

/// Parse free-form user input into a [`Target`].
///
/// Empty or whitespace-only input yields `None`, as does a URL without a
/// usable path segment; the caller is expected to prompt for a slug, URL, or
/// event id. For absolute HTTP(S) URLs the last non-empty path segment is
/// taken as the candidate; an unparseable URL falls back to the trimmed
/// input. An all-digit candidate is classified as a numeric event id.
pub fn parse_input(raw: &str) -> Option<Target> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        match Url::parse(trimmed) {
            Ok(url) => url
                .path_segments()
                .and_then(|segments| {
                    segments
                        .filter(|segment| !segment.is_empty())
                        .last()
                        .map(str::to_string)
                })
                .unwrap_or_default(),
            Err(_) => trimmed.to_string(),
        }
    } else {
        trimmed.to_string()
    };

    if candidate.is_empty() {
        // A URL with no path segments carries nothing to look up
        return None;
    }

    if candidate.bytes().all(|b| b.is_ascii_digit()) {
        Some(Target::event_id(candidate))
    } else {
        Some(Target::slug(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("   \t\n"), None);
    }

    #[test]
    fn test_bare_slug() {
        let target = parse_input("will-x-happen").unwrap();
        assert_eq!(target, Target::slug("will-x-happen"));
    }

    #[test]
    fn test_numeric_id() {
        let target = parse_input("  903193 ").unwrap();
        assert_eq!(target, Target::event_id("903193"));
    }

    #[test]
    fn test_url_takes_last_path_segment() {
        let target = parse_input("https://polymarket.com/event/will-x-happen").unwrap();
        assert_eq!(target, Target::slug("will-x-happen"));
    }

    #[test]
    fn test_url_with_trailing_slash() {
        let target = parse_input("https://polymarket.com/event/will-x-happen/").unwrap();
        assert_eq!(target, Target::slug("will-x-happen"));
    }

    #[test]
    fn test_url_with_numeric_tail_is_event_id() {
        let target = parse_input("https://polymarket.com/event/903193").unwrap();
        assert_eq!(target, Target::event_id("903193"));
    }

    #[test]
    fn test_url_without_path_segments_is_rejected() {
        assert_eq!(parse_input("https://polymarket.com/"), None);
        assert_eq!(parse_input("https://polymarket.com"), None);
    }

    #[test]
    fn test_unparseable_url_falls_back_to_whole_input() {
        // Scheme prefix but not a valid URL
        let target = parse_input("http://").unwrap();
        assert_eq!(target, Target::slug("http://"));
    }

    #[test]
    fn test_mixed_candidate_stays_a_slug() {
        let target = parse_input("123abc").unwrap();
        assert_eq!(target, Target::slug("123abc"));
    }
}
