//! Durable token storage contract and cookie encoding.
//!
//! SYSTEM CONTEXT
//! ==============
//! Storage is the source of truth for tokens across reloads. The browser
//! keeps them in two cookies so the edge server can see them on navigation;
//! the CLI keeps them in a file. Both go through [`TokenStore`], which only
//! exposes whole-pair writes.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::sync::{Arc, Mutex, PoisonError};

use cookie::{Cookie, SameSite};

use crate::tokens::SessionTokens;

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Failure to persist or remove the token pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store is not reachable (no `document`, unwritable file, ...).
    #[error("token storage unavailable: {0}")]
    Unavailable(String),
    /// The backing store rejected the write.
    #[error("token storage write failed: {0}")]
    Write(String),
}

/// Whole-pair token persistence.
pub trait TokenStore {
    /// Currently stored pair, or `None` when either token is missing.
    fn load(&self) -> Option<SessionTokens>;

    /// Persist both tokens.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn save(&self, tokens: &SessionTokens) -> Result<(), StorageError>;

    /// Remove both tokens.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// In-process store. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<SessionTokens>>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tokens(tokens: SessionTokens) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(tokens))) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<SessionTokens> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn save(&self, tokens: &SessionTokens) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// COOKIES
// =============================================================================

/// Attributes applied to both token cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieAttributes {
    /// Send only over HTTPS.
    pub secure: bool,
}

impl Default for CookieAttributes {
    fn default() -> Self {
        Self { secure: true }
    }
}

fn token_cookie(name: &'static str, value: String, attrs: CookieAttributes) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .secure(attrs.secure)
        .same_site(SameSite::Strict)
        .build()
}

/// Cookie strings that store both tokens (session-scoped, no expiry).
#[must_use]
pub fn set_cookie_strings(tokens: &SessionTokens, attrs: CookieAttributes) -> [String; 2] {
    [
        token_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token().to_owned(), attrs).to_string(),
        token_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token().to_owned(), attrs).to_string(),
    ]
}

/// Cookie strings that expire both tokens.
#[must_use]
pub fn clear_cookie_strings(attrs: CookieAttributes) -> [String; 2] {
    [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE].map(|name| {
        let mut cookie = token_cookie(name, String::new(), attrs);
        cookie.make_removal();
        cookie.to_string()
    })
}

/// Read the token pair from a `Cookie` header (or `document.cookie`).
/// Malformed pairs are skipped; both tokens must be present and non-empty.
#[must_use]
pub fn tokens_from_cookie_header(header: &str) -> Option<SessionTokens> {
    let mut access = None;
    let mut refresh = None;
    for cookie in Cookie::split_parse(header).filter_map(Result::ok) {
        match cookie.name() {
            ACCESS_TOKEN_COOKIE => access = Some(cookie.value().to_owned()),
            REFRESH_TOKEN_COOKIE => refresh = Some(cookie.value().to_owned()),
            _ => {}
        }
    }
    SessionTokens::from_parts(access, refresh)
}
