//! Text-level helpers for pulling JSON fragments out of HTML.

/// Key under which the profile page nests the owner's posts.
pub(super) const TIMELINE_MEDIA_KEY: &str = "edge_owner_to_timeline_media";

/// Try to extract a balanced JSON object or array from the start of `s`.
///
/// Scans `s` character-by-character tracking bracket depth, respecting
/// string literals and escape sequences. Returns the shortest prefix of `s`
/// that closes the opening bracket, or `None` if it is unterminated or
/// closed by the wrong bracket kind.
pub(super) fn extract_balanced(s: &str) -> Option<&str> {
    let close = match s.chars().next()? {
        '{' => '}',
        '[' => ']',
        _ => return None,
    };

    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escape = false;
    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if in_string {
            match c {
                '\\' => escape = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    return (c == close).then(|| &s[..=i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Returns the text that follows `key`'s colon, with leading whitespace
/// trimmed. `s` must start right after the closing quote of the key.
pub(super) fn after_colon(s: &str) -> Option<&str> {
    s.trim_start().strip_prefix(':').map(str::trim_start)
}

/// Depth-first search for the first object that has `key`, returning the
/// value under it.
pub(super) fn find_key<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map
            .get(key)
            .or_else(|| map.values().find_map(|v| find_key(v, key))),
        serde_json::Value::Array(items) => items.iter().find_map(|v| find_key(v, key)),
        _ => None,
    }
}
