//! Bearer token pair issued by the remote API on login.
//!
//! DESIGN
//! ======
//! The access and refresh tokens only ever travel together. A pair can be
//! built from two non-empty strings and nothing else, so "one token set,
//! the other missing" is unrepresentable and every reader that meets such
//! a state (a half-written cookie jar, a truncated file) sees no session.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque access + refresh bearer credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTokens")]
pub struct SessionTokens {
    access_token: String,
    refresh_token: String,
}

/// Reason a token pair could not be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("access token is empty")]
    EmptyAccess,
    #[error("refresh token is empty")]
    EmptyRefresh,
}

impl SessionTokens {
    /// Build a pair from two non-empty tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError`] when either token is empty.
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Result<Self, TokenError> {
        let access_token = access_token.into();
        let refresh_token = refresh_token.into();
        if access_token.is_empty() {
            return Err(TokenError::EmptyAccess);
        }
        if refresh_token.is_empty() {
            return Err(TokenError::EmptyRefresh);
        }
        Ok(Self { access_token, refresh_token })
    }

    /// Combine two independently stored values. Anything short of two
    /// non-empty tokens is treated as no session.
    #[must_use]
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Option<Self> {
        Self::new(access_token?, refresh_token?).ok()
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// `Authorization` header value for the access token.
    #[must_use]
    pub fn bearer(&self) -> String {
        bearer(&self.access_token)
    }
}

/// Format an `Authorization: Bearer` header value.
#[must_use]
pub fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokens {
    access_token: String,
    refresh_token: String,
}

impl TryFrom<RawTokens> for SessionTokens {
    type Error = TokenError;

    fn try_from(raw: RawTokens) -> Result<Self, Self::Error> {
        Self::new(raw.access_token, raw.refresh_token)
    }
}
