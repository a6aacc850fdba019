//! Best-effort recovery of a JSON object from an LLM text response.

const FENCE: &str = "```";

/// Narrows a noisy model response down to the JSON object it most likely contains.
///
/// Strips a leading ```` ``` ```` / ```` ```json ```` marker and a trailing ```` ``` ````,
/// then returns the span from the first `{` to the last `}`. When no such span exists
/// the trimmed text is returned as-is and the parse step reports the failure.
pub fn extract_json(text: &str) -> String {
    let trimmed = strip_code_fences(text.trim());

    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}

fn strip_code_fences(text: &str) -> &str {
    let mut t = text;

    if let Some(rest) = t.strip_prefix(FENCE) {
        let rest = match rest.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
            _ => rest,
        };
        t = rest.trim_start();
    }

    if let Some(rest) = t.strip_suffix(FENCE) {
        t = rest.trim_end();
    }

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_response_with_leading_prose() {
        let raw = "Here you go:\n```json\n{\"a\":1}\n```";
        assert_eq!(extract_json(raw), "{\"a\":1}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_json(""), "");
        assert_eq!(extract_json("   \n  "), "");
    }

    #[test]
    fn test_uppercase_fence_tag() {
        let raw = "```JSON\n{\"title\": \"Night Market\"}\n```";
        assert_eq!(extract_json(raw), "{\"title\": \"Night Market\"}");
    }

    #[test]
    fn test_untagged_fence() {
        let raw = "```\n{\"a\": {\"b\": 2}}\n```";
        assert_eq!(extract_json(raw), "{\"a\": {\"b\": 2}}");
    }

    #[test]
    fn test_trailing_prose_is_dropped() {
        let raw = "{\"a\": 1}\n\nLet me know if you need anything else!";
        assert_eq!(extract_json(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_no_object_returns_trimmed_text() {
        assert_eq!(extract_json("  sorry, I can't help  "), "sorry, I can't help");
        assert_eq!(extract_json("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_fence_only_response() {
        assert_eq!(extract_json("```json\n```"), "");
    }
}
