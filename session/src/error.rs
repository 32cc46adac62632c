//! Error types for remote API calls and the auth gateway boundary.
//!
//! ERROR HANDLING
//! ==============
//! Transports report what happened on the wire as [`ApiError`]. The gateway
//! folds that into [`AuthFailure`], the only error callers of `login`,
//! `logout` and `register` ever see. Pages turn either into a message or a
//! redirect; neither is allowed to panic past a component.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::storage::StorageError;

/// Coarse taxonomy shared by every failure surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request could not be sent or completed.
    Network,
    /// 401/403, or no token to send.
    Auth,
    /// 5xx or a body that does not match the schema.
    Server,
    /// Rejected by client-side form validation before any request.
    Validation,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network-error",
            Self::Auth => "auth-error",
            Self::Server => "server-error",
            Self::Validation => "validation-error",
        }
    }
}

/// Outcome of a failed remote API call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("request failed: {0}")]
    Network(String),

    /// No response arrived within the configured request timeout.
    #[error("request timed out")]
    Timeout,

    /// An authenticated call was attempted without an access token.
    #[error("no access token available")]
    MissingToken,

    /// 401 or 403.
    #[error("unauthorized: status {status}")]
    Unauthorized { status: u16, message: Option<String> },

    /// Any other 4xx.
    #[error("request rejected: status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// 5xx, or a non-success status outside the ranges above.
    #[error("server error: status {status}")]
    Server { status: u16, message: Option<String> },

    /// The response body did not match the expected schema.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify a non-success HTTP status with the optional `message` field
    /// from the response body.
    #[must_use]
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => Self::Unauthorized { status, message },
            400..=499 => Self::Rejected { status, message },
            _ => Self::Server { status, message },
        }
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Timeout => ErrorKind::Network,
            Self::MissingToken | Self::Unauthorized { .. } => ErrorKind::Auth,
            Self::Rejected { .. } | Self::Server { .. } | Self::Decode(_) => ErrorKind::Server,
        }
    }

    /// Authorization failures end the session.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout | Self::Server { status: 500..=599, .. })
    }

    /// Server-provided `message`, if the response carried one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::Rejected { message, .. } | Self::Server { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

/// Failure returned by the auth gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFailure {
    /// Credentials (or registration data) were refused by the API.
    #[error("invalid credentials")]
    InvalidCredentials { message: Option<String> },

    /// The API could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The API failed or answered with something unreadable.
    #[error("server error: {0}")]
    Server(String),

    /// Tokens were issued but could not be persisted.
    #[error("could not store session: {0}")]
    Storage(#[from] StorageError),
}

impl AuthFailure {
    /// Stable machine-readable reason.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "invalid-credentials",
            Self::Network(_) => "network-error",
            Self::Server(_) => "server-error",
            Self::Storage(_) => "storage-error",
        }
    }

    /// Text suitable for a notification.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCredentials { message: Some(message) } => message.clone(),
            Self::InvalidCredentials { message: None } => "Invalid credentials.".to_owned(),
            Self::Network(_) => "Could not reach the server. Check your connection and try again.".to_owned(),
            Self::Server(_) => "The server could not complete the request. Please try again later.".to_owned(),
            Self::Storage(_) => "Your session could not be saved in this browser.".to_owned(),
        }
    }
}

impl From<ApiError> for AuthFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(e) => Self::Network(e),
            ApiError::Timeout => Self::Network("request timed out".to_owned()),
            ApiError::Unauthorized { message, .. } | ApiError::Rejected { message, .. } => {
                Self::InvalidCredentials { message }
            }
            ApiError::MissingToken => Self::InvalidCredentials { message: None },
            err @ (ApiError::Server { .. } | ApiError::Decode(_)) => Self::Server(err.to_string()),
        }
    }
}
