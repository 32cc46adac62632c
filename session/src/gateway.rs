//! Auth gateway: the single writer of session tokens.
//!
//! ARCHITECTURE
//! ============
//! Login, logout, registration and session expiry all pass through
//! [`AuthGateway`]. It talks to the remote API through a [`SessionApi`]
//! transport, persists tokens through a [`TokenStore`], and then updates the
//! shared [`Session`]. Storage is written before the in-memory session so a
//! reload never observes a session that was not durably recorded.
//!
//! ERROR HANDLING
//! ==============
//! Public operations return `Result<_, AuthFailure>`; nothing here panics
//! and a failed login leaves storage and session untouched.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::future::Future;

use crate::api::{Credentials, IdentifierKind, Registration, SessionApi, Video, VideoApi, VideoDetail, VideoQuery, ViewUpdate};
use crate::error::{ApiError, AuthFailure};
use crate::state::Session;
use crate::storage::{StorageError, TokenStore};

/// What `logout` does locally when the remote call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogoutPolicy {
    /// Keep the local session so the user can retry once the API is back.
    #[default]
    KeepLocalOnFailure,
    /// Always end the local session on an explicit logout.
    AlwaysClearLocal,
}

pub struct AuthGateway<A, S> {
    api: A,
    store: S,
    session: Session,
    logout_policy: LogoutPolicy,
}

impl<A, S> AuthGateway<A, S>
where
    A: SessionApi,
    S: TokenStore,
{
    /// Build a gateway whose session is restored from `store`.
    pub fn new(api: A, store: S) -> Self {
        let session = Session::restore(&store);
        Self { api, store, session, logout_policy: LogoutPolicy::default() }
    }

    #[must_use]
    pub fn with_logout_policy(mut self, policy: LogoutPolicy) -> Self {
        self.logout_policy = policy;
        self
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn logout_policy(&self) -> LogoutPolicy {
        self.logout_policy
    }

    /// Exchange credentials for a token pair and start a session.
    ///
    /// # Errors
    ///
    /// [`AuthFailure::InvalidCredentials`] for 4xx, [`AuthFailure::Network`]
    /// when the API is unreachable, [`AuthFailure::Server`] for 5xx or an
    /// unreadable body, [`AuthFailure::Storage`] when the tokens cannot be
    /// persisted. Storage and session are unchanged on every error.
    pub async fn login(&self, identifier: &str, password: &str, kind: IdentifierKind) -> Result<(), AuthFailure> {
        let credentials =
            Credentials { kind, identifier: identifier.to_owned(), password: password.to_owned() };
        let tokens = match self.api.login(&credentials).await {
            Ok(tokens) => tokens,
            Err(err) => {
                let failure = AuthFailure::from(err);
                tracing::warn!(reason = failure.reason(), error = %failure, "login failed");
                return Err(failure);
            }
        };
        if let Err(err) = self.store.save(&tokens) {
            tracing::error!(error = %err, "login succeeded but tokens could not be stored");
            return Err(err.into());
        }
        self.session.sign_in(tokens);
        tracing::info!(kind = kind.field(), "login succeeded");
        Ok(())
    }

    /// End the session on the API, then locally.
    ///
    /// A 401/403 from the API means the session is already dead there, so it
    /// is cleared locally regardless of policy. Other failures follow
    /// [`LogoutPolicy`]. Without a session only local storage is cleared.
    ///
    /// # Errors
    ///
    /// The remote failure (after any local clearing the policy calls for),
    /// or [`AuthFailure::Storage`] if clearing storage fails.
    pub async fn logout(&self) -> Result<(), AuthFailure> {
        let tokens = self.session.snapshot().tokens().cloned().or_else(|| self.store.load());
        let Some(tokens) = tokens else {
            self.clear_local()?;
            return Ok(());
        };

        match self.api.logout(tokens.access_token()).await {
            Ok(()) => {
                self.clear_local()?;
                tracing::info!("logged out");
                Ok(())
            }
            Err(err) if err.is_unauthorized() => {
                tracing::info!(error = %err, "remote session already ended; clearing local session");
                self.clear_local()?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, policy = ?self.logout_policy, "remote logout failed");
                if self.logout_policy == LogoutPolicy::AlwaysClearLocal {
                    self.clear_local()?;
                }
                Err(err.into())
            }
        }
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// Same classification as [`AuthGateway::login`].
    pub async fn register(&self, registration: &Registration) -> Result<(), AuthFailure> {
        self.api.register(registration).await.map_err(|err| {
            let failure = AuthFailure::from(err);
            tracing::warn!(reason = failure.reason(), error = %failure, "registration failed");
            failure
        })?;
        tracing::info!(username = %registration.username, "account registered");
        Ok(())
    }

    /// Drop the session after an authorization failure.
    pub fn expire(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not clear stored tokens");
        }
        self.session.reset();
        tracing::info!("session expired");
    }

    /// Run an authenticated request with the current access token.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingToken`] without a session (no request is sent),
    /// otherwise whatever `request` returns. An authorization failure also
    /// expires the session.
    pub async fn authorized<T, F, Fut>(&self, request: F) -> Result<T, ApiError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let Some(token) = self.session.snapshot().access_token().map(str::to_owned) else {
            return Err(ApiError::MissingToken);
        };
        let result = request(token).await;
        if let Err(err) = &result {
            if err.is_unauthorized() {
                self.expire();
            }
        }
        result
    }

    fn clear_local(&self) -> Result<(), StorageError> {
        let cleared = self.store.clear();
        self.session.reset();
        cleared
    }
}

impl<A, S> AuthGateway<A, S>
where
    A: SessionApi + VideoApi,
    S: TokenStore,
{
    /// # Errors
    ///
    /// See [`AuthGateway::authorized`].
    pub async fn list_videos(&self, query: &VideoQuery) -> Result<Vec<Video>, ApiError> {
        self.authorized(|token| async move { self.api.list_videos(&token, query).await }).await
    }

    /// # Errors
    ///
    /// See [`AuthGateway::authorized`].
    pub async fn video(&self, video_id: &str) -> Result<VideoDetail, ApiError> {
        self.authorized(|token| async move { self.api.video(&token, video_id).await }).await
    }

    /// Count a view for the signed-in user. Returns `false` without a
    /// request when no profile has been hydrated yet.
    ///
    /// # Errors
    ///
    /// See [`AuthGateway::authorized`].
    pub async fn record_view(&self, video_id: &str) -> Result<bool, ApiError> {
        let Some(user_id) = self.session.snapshot().current_user().map(|user| user.id.clone()) else {
            tracing::debug!(video_id, "skipping view count without a profile");
            return Ok(false);
        };
        let update = ViewUpdate { video_id: video_id.to_owned(), user_id };
        self.authorized(|token| async move { self.api.record_view(&token, &update).await })
            .await
            .map(|()| true)
    }
}
