//! Error kinds surfaced by the front-end orchestration layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The backend could not be reached (no response).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("{}", describe_http(.status, .message))]
    Http { status: u16, message: Option<String> },

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed session token: {0}")]
    MalformedSession(String),

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    /// Client-side pre-submit check failed.
    #[error("{0}")]
    Validation(String),
}

fn describe_http(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Request failed with status {}", status),
    }
}

impl ClientError {
    /// True when the page should send the user back to the entry page.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::MalformedSession(_)
                | ClientError::SessionExpired
                | ClientError::NotLoggedIn
                | ClientError::Http { status: 401, .. }
        )
    }

    /// Message extracted from the backend's error body, if it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_backend_message() {
        let err = ClientError::Http {
            status: 413,
            message: Some("Exceeding total storage limit".into()),
        };
        assert_eq!(err.to_string(), "Exceeding total storage limit");

        let err = ClientError::Http {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Request failed with status 500");
    }

    #[test]
    fn session_errors_require_login() {
        assert!(ClientError::SessionExpired.requires_login());
        assert!(ClientError::MalformedSession("bad".into()).requires_login());
        assert!(ClientError::Http { status: 401, message: None }.requires_login());
        assert!(!ClientError::Network("connection refused".into()).requires_login());
    }
}
