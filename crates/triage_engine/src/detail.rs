use serde_json::Value;

/// Pull a human-readable message out of an error response body.
///
/// Looks at `detail` first (a string, or a list of validation entries whose
/// `msg` fields are joined), then at a top-level `error` string.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let detail = match value.get("detail") {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Array(entries)) => {
            let messages: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    };
    detail
        .or_else(|| value.get("error").and_then(Value::as_str).map(ToOwned::to_owned))
        .filter(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_used_verbatim() {
        assert_eq!(
            extract_detail(br#"{"detail":"file too large"}"#),
            Some("file too large".to_string())
        );
    }

    #[test]
    fn validation_entries_are_joined() {
        let body = br#"{"detail":[{"loc":["body","file"],"msg":"field required"},{"msg":"bad type"}]}"#;
        assert_eq!(
            extract_detail(body),
            Some("field required; bad type".to_string())
        );
    }

    #[test]
    fn error_field_is_a_fallback() {
        assert_eq!(
            extract_detail(br#"{"status":"error","error":"boom"}"#),
            Some("boom".to_string())
        );
    }

    #[test]
    fn missing_or_unparsable_detail_yields_none() {
        assert_eq!(extract_detail(b""), None);
        assert_eq!(extract_detail(b"<html>502</html>"), None);
        assert_eq!(extract_detail(br#"{"detail":""}"#), None);
        assert_eq!(extract_detail(br#"{"detail":42}"#), None);
    }
}
