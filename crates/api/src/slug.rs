// Match identifier extraction from user input

use url::Url;

/// Turn user input into a match identifier.
///
/// Bare slugs and numeric ids are returned trimmed. For URLs the segment
/// following `matches` is used when present, otherwise the last non-empty
/// path segment. Query strings and fragments are ignored.
pub fn extract_slug(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let Ok(url) = Url::parse(input) else {
        return Some(input.trim_matches('/').to_string()).filter(|s| !s.is_empty() && !s.contains('/'));
    };

    let segments: Vec<&str> = url
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .collect();

    let after_matches = segments
        .iter()
        .position(|segment| *segment == "matches")
        .and_then(|i| segments.get(i + 1));

    after_matches
        .or_else(|| segments.last())
        .map(|segment| (*segment).to_string())
}
