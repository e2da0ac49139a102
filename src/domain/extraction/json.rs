//! Locating a JSON object inside free-form completion text.

/// Returns the first balanced `{...}` substring of a completion.
///
/// Code fences are looked into first. Braces inside string literals are
/// ignored.
pub fn locate_json_object(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    let body = fenced_body(trimmed).unwrap_or(trimmed);
    let start = body.find('{')?;
    balanced_object(body, start)
}

fn fenced_body(s: &str) -> Option<&str> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let body_start = start + pattern.len();
            if let Some(end) = s[body_start..].find("```") {
                return Some(s[body_start..body_start + end].trim());
            }
        }
    }
    None
}

fn balanced_object(s: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&s[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object() {
        assert_eq!(locate_json_object(r#"{"budget": 5000}"#), Some(r#"{"budget": 5000}"#));
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let raw = "好的，這是結果：{\"location_pref\": \"school\"} 希望有幫助";
        assert_eq!(locate_json_object(raw), Some("{\"location_pref\": \"school\"}"));
    }

    #[test]
    fn fenced_block() {
        let raw = "```json\n{\"budget\": 6000}\n```";
        assert_eq!(locate_json_object(raw), Some("{\"budget\": 6000}"));
    }

    #[test]
    fn nested_objects_and_braces_in_strings() {
        let raw = r#"note {"a": {"b": "}"}, "c": 1} tail"#;
        assert_eq!(locate_json_object(raw), Some(r#"{"a": {"b": "}"}, "c": 1}"#));
    }

    #[test]
    fn multibyte_text_before_object() {
        let raw = "使用者想要套房 {\"type_pref\": \"套房\"}";
        assert_eq!(locate_json_object(raw), Some("{\"type_pref\": \"套房\"}"));
    }

    #[test]
    fn unbalanced_or_missing_object() {
        assert_eq!(locate_json_object("{\"budget\": 5000"), None);
        assert_eq!(locate_json_object("I am not sure"), None);
        assert_eq!(locate_json_object(""), None);
    }
}
