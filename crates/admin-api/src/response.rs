//! Update Response Classification
//!
//! Maps a finished update request onto the mutation outcome the engines
//! consume. Kept free of I/O so every branch is testable.

use optimistic_sync::MutationError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Optional body of a successful status update
#[derive(Debug, Deserialize)]
struct StatusUpdateBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Error bodies often carry a human-readable reason
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Sequence updates: only the status matters, the body is never read.
pub fn classify_sequence_response(status: StatusCode, body: &[u8]) -> Result<(), MutationError> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(MutationError::Unauthorized);
    }
    if !status.is_success() {
        return Err(MutationError::request_failed(describe_failure(status, body)));
    }
    Ok(())
}

/// Status updates: a 2xx JSON body may still report `success: false`.
pub fn classify_status_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<(), MutationError> {
    classify_sequence_response(status, body)?;

    let is_json = content_type.map(is_json_content_type).unwrap_or(false);
    if !is_json || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }

    let parsed: StatusUpdateBody = serde_json::from_slice(body)
        .map_err(|error| MutationError::invalid_shape(error.to_string()))?;
    match parsed.success {
        Some(false) => Err(MutationError::request_failed(
            parsed
                .message
                .unwrap_or_else(|| "update was rejected".to_string()),
        )),
        _ => Ok(()),
    }
}

pub(crate) fn is_json_content_type(value: &str) -> bool {
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
}

pub(crate) fn describe_failure(status: StatusCode, body: &[u8]) -> String {
    match failure_reason(body) {
        Some(reason) => format!("HTTP {status}: {reason}"),
        None => format!("HTTP {status}"),
    }
}

/// `message`/`error` from a JSON error body, else the trimmed text
pub(crate) fn failure_reason(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            (!text.is_empty()).then_some(text)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json; charset=utf-8");

    #[test]
    fn test_sequence_success_ignores_body() {
        assert_eq!(classify_sequence_response(StatusCode::OK, b"<html>ok</html>"), Ok(()));
        assert_eq!(classify_sequence_response(StatusCode::NO_CONTENT, b""), Ok(()));
    }

    #[test]
    fn test_401_is_unauthorized() {
        assert_eq!(
            classify_sequence_response(StatusCode::UNAUTHORIZED, b"{}"),
            Err(MutationError::Unauthorized)
        );
        assert_eq!(
            classify_status_response(StatusCode::UNAUTHORIZED, JSON, b"{}"),
            Err(MutationError::Unauthorized)
        );
    }

    #[test]
    fn test_server_error_uses_body_message() {
        let result = classify_sequence_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"message":"sequence out of range"}"#,
        );
        assert_eq!(
            result,
            Err(MutationError::request_failed(
                "HTTP 500 Internal Server Error: sequence out of range"
            ))
        );
    }

    #[test]
    fn test_error_without_body() {
        assert_eq!(
            describe_failure(StatusCode::FORBIDDEN, b"  "),
            "HTTP 403 Forbidden".to_string()
        );
    }

    #[test]
    fn test_explicit_success_false_fails() {
        let result = classify_status_response(
            StatusCode::OK,
            JSON,
            br#"{"success":false,"message":"schedule already sent"}"#,
        );
        assert_eq!(result, Err(MutationError::request_failed("schedule already sent")));
    }

    #[test]
    fn test_success_true_or_missing_is_ok() {
        assert_eq!(classify_status_response(StatusCode::OK, JSON, br#"{"success":true}"#), Ok(()));
        assert_eq!(classify_status_response(StatusCode::OK, JSON, br#"{"id":4}"#), Ok(()));
        assert_eq!(classify_status_response(StatusCode::OK, JSON, b""), Ok(()));
    }

    #[test]
    fn test_unparseable_json_is_invalid_shape() {
        let result = classify_status_response(StatusCode::OK, JSON, b"<html>oops</html>");
        assert!(matches!(result, Err(MutationError::InvalidResponseShape { .. })));
    }

    #[test]
    fn test_non_json_body_is_not_parsed() {
        assert_eq!(
            classify_status_response(StatusCode::OK, Some("text/plain"), b"done"),
            Ok(())
        );
        assert_eq!(classify_status_response(StatusCode::OK, None, b"done"), Ok(()));
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("Application/JSON; charset=utf-8"));
        assert!(is_json_content_type("application/problem+json"));
        assert!(!is_json_content_type("text/html"));
    }
}
