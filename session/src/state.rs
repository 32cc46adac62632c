//! Observable in-memory session.
//!
//! DESIGN
//! ======
//! `Session` is an explicit handle passed to whoever needs it (pages, the
//! gateway, the hydrator) instead of a process-wide store. It is rebuilt
//! from [`TokenStore`] on startup and only mutated from inside this crate,
//! so every token write is funnelled through the auth gateway.
//!
//! Each mutation is a single `send_modify` on a tokio `watch` channel, so
//! subscribers never observe a half-applied change.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::UserProfile;
use crate::storage::TokenStore;
use crate::tokens::SessionTokens;

/// Point-in-time view of the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    tokens: Option<SessionTokens>,
    current_user: Option<UserProfile>,
}

impl SessionState {
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(SessionTokens::access_token)
    }

    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens.as_ref().map(SessionTokens::refresh_token)
    }

    #[must_use]
    pub fn tokens(&self) -> Option<&SessionTokens> {
        self.tokens.as_ref()
    }

    /// True iff both tokens are present. Computed on every read.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current_user.as_ref()
    }
}

/// Shared handle to the running application's session.
///
/// Clones refer to the same session.
#[derive(Clone, Debug)]
pub struct Session {
    tx: Arc<watch::Sender<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::empty()
    }
}

impl Session {
    /// Unauthenticated session.
    #[must_use]
    pub fn empty() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Session rebuilt from durable storage at startup.
    pub fn restore(store: &impl TokenStore) -> Self {
        let session = Self::empty();
        if let Some(tokens) = store.load() {
            tracing::debug!("session restored from storage");
            session.tx.send_modify(|state| state.tokens = Some(tokens));
        }
        session
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated()
    }

    /// Receiver notified after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Install a fresh token pair. Any profile belongs to the previous
    /// session and is dropped.
    pub(crate) fn sign_in(&self, tokens: SessionTokens) {
        self.tx.send_modify(|state| {
            state.tokens = Some(tokens);
            state.current_user = None;
        });
    }

    /// Attach the hydrated profile. Ignored when the session has ended.
    pub(crate) fn set_user(&self, user: UserProfile) -> bool {
        self.tx.send_if_modified(|state| {
            if state.tokens.is_none() {
                return false;
            }
            state.current_user = Some(user);
            true
        })
    }

    pub(crate) fn reset(&self) {
        self.tx.send_modify(|state| *state = SessionState::default());
    }
}
