//! Input normalization: turn raw export blobs into email records.
//!
//! Accepts a JSON array, a single JSON object, a JSON string element
//! wrapping a record, or a concatenated text blob with `Value #<n>:`
//! marker lines between JSON fragments.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::NormalizeError;
use crate::models::{OnError, RawEmail};
use crate::receipt::rules::patterns::VALUE_MARKER;

/// Normalize a raw input blob into email records.
///
/// Fragments that fail to decode are dropped under [`OnError::Skip`] or
/// abort the call under [`OnError::Fail`]. Errors only when nothing in
/// the input can be interpreted as a record at all.
pub fn normalize(input: &str, on_error: OnError) -> Result<Vec<RawEmail>, NormalizeError> {
    // Whole-blob JSON first.
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(items)) => {
            let mut emails = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                match email_from_value(item) {
                    Ok(email) => emails.push(email),
                    Err(reason) => {
                        if on_error == OnError::Fail {
                            return Err(NormalizeError::BadFragment { index, reason });
                        }
                        warn!(index, %reason, "dropping undecodable array element");
                    }
                }
            }
            Ok(emails)
        }
        Ok(value) => email_from_value(value)
            .map(|email| vec![email])
            .map_err(|reason| NormalizeError::BadFragment { index: 0, reason }),
        Err(json_err) => split_marker_blob(input, on_error, &json_err.to_string()),
    }
}

/// Decode one JSON value into a record. String values are treated as a
/// serialized record and decoded a second time.
fn email_from_value(value: Value) -> Result<RawEmail, String> {
    match value {
        Value::String(s) => serde_json::from_str(&s).map_err(|e| e.to_string()),
        other => serde_json::from_value(other).map_err(|e| e.to_string()),
    }
}

/// Fall back to splitting on `Value #<n>:` marker lines, decoding the
/// brace-delimited substring of each segment.
fn split_marker_blob(
    input: &str,
    on_error: OnError,
    json_failure: &str,
) -> Result<Vec<RawEmail>, NormalizeError> {
    let mut emails = Vec::new();

    for (index, part) in VALUE_MARKER.split(input).enumerate() {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let fragment = if part.starts_with('{') && part.ends_with('}') {
            part
        } else if let Some(start) = part.find('{') {
            let candidate = &part[start..];
            if !candidate.ends_with('}') {
                continue;
            }
            candidate
        } else {
            continue;
        };

        match serde_json::from_str::<RawEmail>(fragment) {
            Ok(email) => emails.push(email),
            Err(e) => {
                if on_error == OnError::Fail {
                    return Err(NormalizeError::BadFragment {
                        index,
                        reason: e.to_string(),
                    });
                }
                warn!(index, error = %e, "dropping undecodable fragment");
            }
        }
    }

    if emails.is_empty() {
        return Err(NormalizeError::Unparsable(json_failure.to_string()));
    }

    debug!(count = emails.len(), "recovered records from marker-delimited blob");
    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_array() {
        let input = r#"[{"id": "1", "body": "Totalt 10,00 kr"}, {"body": "x"}]"#;
        let emails = normalize(input, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].id.as_deref(), Some("1"));
        assert_eq!(emails[0].body, "Totalt 10,00 kr");
    }

    #[test]
    fn test_single_json_object() {
        let emails = normalize(r#"{"body": "Totalt 10,00 kr"}"#, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_array_of_json_strings() {
        let input = r#"["{\"body\": \"Totalt 10,00 kr\"}"]"#;
        let emails = normalize(input, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].body, "Totalt 10,00 kr");
    }

    #[test]
    fn test_marker_delimited_blob() {
        let input = "Value #1:\n\n{\"body\": \"first\"}\n\nValue #2:\n\n{\"body\": \"second\"}";
        let emails = normalize(input, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].body, "first");
        assert_eq!(emails[1].body, "second");
    }

    #[test]
    fn test_segment_with_leading_prose() {
        let input = "Export den 5 juli\n{\"body\": \"first\"}";
        let emails = normalize(input, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_broken_fragment_dropped_silently() {
        let input =
            "{\"body\": \"first\"}\n\nValue #2:\n\n{\"body\": \"second\" truncated";
        let emails = normalize(input, OnError::Skip).unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].body, "first");
    }

    #[test]
    fn test_broken_fragment_fails_when_configured() {
        let input = "{\"body\": \"first\"}\n\nValue #2:\n\n{\"body\": }";
        let err = normalize(input, OnError::Fail).unwrap_err();
        assert!(matches!(err, NormalizeError::BadFragment { index: 1, .. }));
    }

    #[test]
    fn test_malformed_input_names_parse_failure() {
        let err = normalize("no json here at all", OnError::Skip).unwrap_err();
        assert!(matches!(err, NormalizeError::Unparsable(_)));
        assert!(err.to_string().contains("failed to parse email data"));
    }
}
