//! Token storage in `document.cookie`.
//!
//! The pair is written as two first-party cookies (`accessToken`,
//! `refreshToken`) so the edge server can apply the route guard on a full
//! page load. `Secure` follows the page protocol so plain-HTTP local
//! development still works.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use session::storage::{CookieAttributes, StorageError, TokenStore};
use session::SessionTokens;

#[derive(Debug, Clone, Copy, Default)]
pub struct CookieTokenStore;

/// Cookie attributes for a page served over `protocol` (`"https:"`, `"http:"`).
#[must_use]
pub fn attributes_for_protocol(protocol: &str) -> CookieAttributes {
    CookieAttributes { secure: protocol != "http:" }
}

#[cfg(feature = "hydrate")]
fn document() -> Result<web_sys::HtmlDocument, StorageError> {
    use wasm_bindgen::JsCast;

    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StorageError::Unavailable("no document".to_owned()))
}

#[cfg(feature = "hydrate")]
fn page_attributes() -> CookieAttributes {
    let protocol = web_sys::window().and_then(|window| window.location().protocol().ok()).unwrap_or_default();
    attributes_for_protocol(&protocol)
}

#[cfg(feature = "hydrate")]
fn write_all(cookies: [String; 2]) -> Result<(), StorageError> {
    let document = document()?;
    for cookie in cookies {
        document.set_cookie(&cookie).map_err(|e| StorageError::Write(format!("{e:?}")))?;
    }
    Ok(())
}

impl TokenStore for CookieTokenStore {
    fn load(&self) -> Option<SessionTokens> {
        #[cfg(feature = "hydrate")]
        {
            let header = document().ok()?.cookie().ok()?;
            session::storage::tokens_from_cookie_header(&header)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn save(&self, tokens: &SessionTokens) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            write_all(session::storage::set_cookie_strings(tokens, page_attributes()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = tokens;
            Err(StorageError::Unavailable("no document on server".to_owned()))
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            write_all(session::storage::clear_cookie_strings(page_attributes()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable("no document on server".to_owned()))
        }
    }
}
