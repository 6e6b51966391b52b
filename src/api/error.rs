use crate::queue::QueueCleared;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication required")]
    AuthenticationRequired,
    #[error("{0}")]
    Validation(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Cleared(#[from] QueueCleared),
}

impl ApiError {
    /// True when the request was dropped because the session ended
    pub fn is_cleared(&self) -> bool {
        matches!(self, ApiError::Cleared(_))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Build the error for a non-2xx, non-401 response
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let parsed = serde_json::from_str::<ErrorBody>(body).unwrap_or_else(|_| ErrorBody {
        detail: Some(Value::String("Network error".to_string())),
        message: None,
    });

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        match &parsed.detail {
            Some(Value::Array(items)) => {
                let messages: Vec<String> = items.iter().map(describe_validation_item).collect();
                return ApiError::Validation(format!("Validation error: {}", messages.join(", ")));
            }
            Some(Value::String(detail)) if !detail.is_empty() => {
                return ApiError::Validation(detail.clone());
            }
            _ => {}
        }
    }

    let message = match parsed.detail {
        Some(Value::String(detail)) if !detail.is_empty() => detail,
        Some(detail) if !detail.is_null() => detail.to_string(),
        _ => parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    };

    ApiError::Http {
        status: status.as_u16(),
        message,
    }
}

/// `{"loc": ["body", "email"], "msg": "field required"}` -> `body.email - field required`
fn describe_validation_item(item: &Value) -> String {
    let msg = item.get("msg").and_then(Value::as_str).unwrap_or("invalid value");
    let loc = item.get("loc").and_then(Value::as_array).map(|parts| {
        parts
            .iter()
            .map(|part| match part {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    });

    match loc {
        Some(loc) => format!("{} - {}", loc, msg),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_list() {
        let body = r#"{"detail":[{"loc":["body","email"],"msg":"field required"},{"loc":["query","days_back",0],"msg":"not an int"}]}"#;
        let err = error_from_response(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(
            err.to_string(),
            "Validation error: body.email - field required, query.days_back.0 - not an int"
        );
    }

    #[test]
    fn test_validation_string_detail() {
        let err = error_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail":"Project already verified"}"#,
        );
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Project already verified"));
    }

    #[test]
    fn test_detail_then_message_then_status() {
        let err = error_from_response(StatusCode::BAD_REQUEST, r#"{"detail":"Insufficient credits"}"#);
        assert_eq!(err.to_string(), "Insufficient credits");

        let err = error_from_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"database down"}"#);
        assert!(matches!(err, ApiError::Http { status: 500, ref message } if message == "database down"));

        let err = error_from_response(StatusCode::NOT_FOUND, "{}");
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn test_unparsable_body() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(matches!(err, ApiError::Http { status: 502, ref message } if message == "Network error"));
    }

    #[test]
    fn test_cleared_is_distinguishable() {
        let err = ApiError::from(QueueCleared);
        assert!(err.is_cleared());
        assert_eq!(err.to_string(), "Request queue cleared");
        assert!(!ApiError::AuthenticationRequired.is_cleared());
    }
}
