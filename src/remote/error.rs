//! Shared error handling for Jira API calls.
//!
//! Converts HTTP-level failures into `SecurityIssueError`, keeping the status
//! code around long enough to pick the right variant.

use std::fmt;

use serde::Deserialize;

use crate::error::SecurityIssueError;

/// API error carrying the HTTP status, if one was received.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if available
    pub status: Option<reqwest::StatusCode>,
    /// Human-readable error message
    pub message: String,
    /// Whether the request hit its timeout
    pub timed_out: bool,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            timed_out: false,
        }
    }

    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
            timed_out: false,
        }
    }

    /// Build an error from a non-success response body.
    ///
    /// Jira reports failures as `{"errorMessages": [...], "errors": {...}}`;
    /// anything else falls back to the raw body or the status line.
    pub fn from_response_body(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<JiraErrorBody>(body)
            .ok()
            .map(|b| b.summary())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });

        let message = match detail {
            Some(detail) => format!("HTTP {}: {}", status, detail),
            None => format!("HTTP {}", status),
        };
        Self::with_status(message, status)
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status.map(|s| s.as_u16()), Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status(),
            timed_out: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for SecurityIssueError {
    fn from(error: ApiError) -> Self {
        if error.timed_out {
            return SecurityIssueError::Timeout(error.message);
        }
        if error.is_auth_failure() {
            return SecurityIssueError::Auth(format!("Jira rejected credentials: {}", error.message));
        }
        SecurityIssueError::Api(format!("Jira API error: {}", error.message))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JiraErrorBody {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

impl JiraErrorBody {
    fn summary(&self) -> String {
        let mut parts = self.error_messages.clone();
        parts.extend(self.errors.iter().map(|(field, msg)| format!("{field}: {msg}")));
        parts.join("; ")
    }
}
