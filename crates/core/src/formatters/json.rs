use crate::Result;
use crate::convert::ConversionResult;

/// Serialize a conversion result as `{ "markdown": ..., "title": ... }`.
pub fn to_json(result: &ConversionResult, pretty: bool) -> Result<String> {
    let json = if pretty { serde_json::to_string_pretty(result)? } else { serde_json::to_string(result)? };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConversionResult {
        ConversionResult { markdown: "# Ch 1\n\nText\n".to_string(), title: "Ch 1".to_string() }
    }

    #[test]
    fn test_compact_json() {
        let json = to_json(&sample(), false).unwrap();
        assert_eq!(json, r##"{"markdown":"# Ch 1\n\nText\n","title":"Ch 1"}"##);
    }

    #[test]
    fn test_pretty_json_roundtrips_fields() {
        let json = to_json(&sample(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Ch 1");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_empty_result() {
        let json = to_json(&ConversionResult::default(), false).unwrap();
        assert_eq!(json, r#"{"markdown":"","title":""}"#);
    }
}
