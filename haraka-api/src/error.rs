use serde::Deserialize;
use tower_api_client::{Error as ApiError, StatusCode};

/// Longest raw response body quoted back in an error message.
const MAX_RAW_MESSAGE_LEN: usize = 200;

#[derive(Debug)]
pub enum HarakaApiError {
    /// No row matched a single-row lookup.
    NotFound(String),
    /// Row-level security or missing credentials.
    PermissionDenied(String),
    /// The backend refused the values that were sent.
    Validation(String),
    /// The payments API refused the request.
    Rejected { status: Option<u16>, message: String },
    /// Any other backend failure.
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The response body could not be decoded.
    Decode(String),
    Http(reqwest::Error),
    Internal(ApiError),
}

impl HarakaApiError {
    /// Classify a failed REST response by its PostgREST/Postgres error code,
    /// falling back to the HTTP status.
    pub(crate) fn from_rest_failure(status: u16, body: &str) -> Self {
        let detail: RestErrorDetail = serde_json::from_str(body).unwrap_or_else(|_| {
            RestErrorDetail {
                message: non_empty(body).map(truncate_raw),
                ..Default::default()
            }
        });

        let message = detail
            .message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP {}", status));

        match detail.code.as_deref() {
            Some("PGRST116") => Self::NotFound(message),
            Some("42501") => Self::PermissionDenied(message),
            Some(code) if code.starts_with("22") || code.starts_with("23") => {
                Self::Validation(message)
            }
            _ => match status {
                401 | 403 => Self::PermissionDenied(message),
                400 | 409 | 422 => Self::Validation(message),
                _ => Self::Backend {
                    status,
                    code: detail.code,
                    message,
                },
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied(_))
    }

    /// Short message suitable for an alert, without the error category prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(m)
            | Self::PermissionDenied(m)
            | Self::Validation(m)
            | Self::Decode(m) => m.clone(),
            Self::Rejected { message, .. } | Self::Backend { message, .. } => message.clone(),
            Self::Http(e) => e.to_string(),
            Self::Internal(e) => e.to_string(),
        }
    }
}

impl From<ApiError> for HarakaApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                HarakaApiError::Rejected {
                    status: Some(status.as_u16()),
                    message: payment_failure_message(status, &detail),
                }
            }
            e => HarakaApiError::Internal(e),
        }
    }
}

impl From<reqwest::Error> for HarakaApiError {
    fn from(value: reqwest::Error) -> Self {
        HarakaApiError::Http(value)
    }
}

impl std::fmt::Display for HarakaApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(m) => write!(f, "Not found: {}", m),
            Self::PermissionDenied(m) => write!(f, "Permission denied: {}", m),
            Self::Validation(m) => write!(f, "Validation failed: {}", m),
            Self::Rejected {
                status: Some(status),
                message,
            } => write!(f, "Payment rejected ({}): {}", status, message),
            Self::Rejected {
                status: None,
                message,
            } => write!(f, "Payment rejected: {}", message),
            Self::Backend {
                status,
                code: Some(code),
                message,
            } => write!(f, "({}) {}: {}", status, code, message),
            Self::Backend {
                status, message, ..
            } => write!(f, "({}) {}", status, message),
            Self::Decode(m) => write!(f, "Unexpected response: {}", m),
            Self::Http(e) => write!(f, "Network error: {}", e),
            Self::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for HarakaApiError {}

/// Error body returned by PostgREST.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RestErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

/// Error body returned by the payments API. Either field may carry the text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

pub(crate) fn payment_failure_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<PaymentErrorBody>(body) {
        if let Some(message) = server_message(parsed.error, parsed.message) {
            return message;
        }
    }

    // Proxies in front of the API sometimes answer with HTML or plain text
    if let Some(raw) = non_empty(body) {
        if !raw.starts_with('<') && !raw.starts_with('{') {
            return truncate_raw(raw);
        }
    }

    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// The first non-blank of the `error` and `message` fields of a payments reply.
pub(crate) fn server_message(
    error: Option<String>,
    message: Option<String>,
) -> Option<String> {
    let usable = |m: &String| !m.trim().is_empty();
    error.filter(usable).or_else(|| message.filter(usable))
}

fn non_empty(body: &str) -> Option<&str> {
    let trimmed = body.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn truncate_raw(raw: &str) -> String {
    if raw.chars().count() <= MAX_RAW_MESSAGE_LEN {
        raw.to_string()
    } else {
        let mut cut: String = raw.chars().take(MAX_RAW_MESSAGE_LEN).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_no_rows_as_not_found() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let err = HarakaApiError::from_rest_failure(406, body);
        assert!(err.is_not_found());
    }

    #[test]
    fn classifies_rls_violation_as_permission_denied() {
        let body = r#"{"code":"42501","message":"new row violates row-level security policy for table \"parent_students\""}"#;
        let err = HarakaApiError::from_rest_failure(403, body);
        assert!(err.is_permission_denied());
        assert!(err.user_message().contains("row-level security"));
    }

    #[test]
    fn classifies_constraint_errors_as_validation() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;
        let err = HarakaApiError::from_rest_failure(409, body);
        assert!(matches!(err, HarakaApiError::Validation(_)));
    }

    #[test]
    fn falls_back_to_status_when_body_is_not_json() {
        let err = HarakaApiError::from_rest_failure(401, "");
        match err {
            HarakaApiError::PermissionDenied(message) => assert_eq!(message, "HTTP 401"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = HarakaApiError::from_rest_failure(502, "Bad gateway");
        match err {
            HarakaApiError::Backend { status, message, .. } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad gateway");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn payment_failure_prefers_error_then_message() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            payment_failure_message(status, r#"{"error":"Insufficient balance"}"#),
            "Insufficient balance"
        );
        assert_eq!(
            payment_failure_message(status, r#"{"message":"Invalid phone number"}"#),
            "Invalid phone number"
        );
        assert_eq!(
            payment_failure_message(status, r#"{"error":"","message":"Try later"}"#),
            "Try later"
        );
    }

    #[test]
    fn payment_failure_without_usable_body_uses_status_reason() {
        assert_eq!(
            payment_failure_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Bad Gateway"
        );
        assert_eq!(
            payment_failure_message(StatusCode::SERVICE_UNAVAILABLE, "maintenance"),
            "maintenance"
        );
    }
}
