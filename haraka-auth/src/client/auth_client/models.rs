use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::{SessionUser, StoredSession};

#[derive(Debug, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RefreshGrant<'a> {
    pub refresh_token: &'a str,
}

/// Session returned by the GoTrue token endpoint.
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl SessionResponse {
    pub fn into_stored(self, now: DateTime<Utc>) -> StoredSession {
        let expires_at = self
            .expires_at
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| self.expires_in.map(|secs| now + Duration::seconds(secs)))
            .unwrap_or(now);

        StoredSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// The auth server reports failures under several field names depending on
/// the endpoint and version.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    pub error_description: Option<String>,
    pub msg: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.is_empty())
    }
}

#[derive(Error, Debug)]
pub enum AuthClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Auth server error ({status}): {message}")]
    Server { status: u16, message: String },
}

pub(super) fn failure_from(status: u16, body: &str) -> AuthClientError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(ErrorResponse::message)
        .unwrap_or_else(|| format!("HTTP {}", status));

    match status {
        400 | 401 | 422 => AuthClientError::InvalidCredentials(message),
        _ => AuthClientError::Server { status, message },
    }
}
