//! Profile hydration for protected views.
//!
//! ARCHITECTURE
//! ============
//! A protected view owns one [`SessionHydrator`]. On mount it calls
//! [`SessionHydrator::run`], which moves through
//!
//! ```text
//! Uninitialized -> Loading -> Ready
//!                          -> Redirecting   (terminal, redirect emitted once)
//!                          -> TimedOut      (retry() -> Uninitialized)
//! ```
//!
//! A profile already in the session short-circuits to `Ready`; a missing
//! session short-circuits to `Redirecting` without a request. While a fetch
//! is in flight further calls are no-ops, so at most one `current-user`
//! request is outstanding per hydrator.
//!
//! ERROR HANDLING
//! ==============
//! Any failure other than a timeout expires the session and yields a single
//! redirect to login. A timeout keeps the session so the view can offer a
//! retry. A response that arrives after the view unmounted, or after the
//! session changed underneath it, is dropped.

#[cfg(test)]
#[path = "hydrator_test.rs"]
mod hydrator_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::SessionApi;
use crate::error::ApiError;
use crate::gateway::AuthGateway;
use crate::guard::LOGIN_PATH;
use crate::state::SessionState;
use crate::storage::TokenStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    Uninitialized,
    Loading,
    Ready,
    Redirecting,
    TimedOut,
}

/// What the view should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationStep {
    /// Fetch the profile with this token, then report back.
    Fetch { access_token: String },
    /// Profile is present; render.
    Ready,
    /// Navigate away. Emitted once per hydrator.
    Redirect(&'static str),
    /// The profile request timed out; the session is intact.
    TimedOut,
    /// Nothing to do: a fetch is already in flight or a redirect was issued.
    Wait,
    /// The response arrived for a view or session that no longer exists.
    Discarded,
}

/// Clones share the same readiness.
#[derive(Debug, Clone, Default)]
pub struct SessionHydrator {
    readiness: Arc<Mutex<Readiness>>,
}

impl SessionHydrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn readiness(&self) -> Readiness {
        *self.lock()
    }

    fn lock(&self) -> MutexGuard<'_, Readiness> {
        self.readiness.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set(&self, readiness: Readiness) {
        *self.lock() = readiness;
    }

    /// Decide the first step for `state`.
    pub fn begin(&self, state: &SessionState) -> HydrationStep {
        let mut readiness = self.lock();
        match *readiness {
            Readiness::Loading | Readiness::Redirecting | Readiness::TimedOut => return HydrationStep::Wait,
            Readiness::Uninitialized | Readiness::Ready => {}
        }
        if state.current_user().is_some() {
            *readiness = Readiness::Ready;
            return HydrationStep::Ready;
        }
        match state.access_token() {
            Some(token) => {
                *readiness = Readiness::Loading;
                HydrationStep::Fetch { access_token: token.to_owned() }
            }
            None => {
                *readiness = Readiness::Redirecting;
                HydrationStep::Redirect(LOGIN_PATH)
            }
        }
    }

    /// Leave `TimedOut` so the next `run` fetches again.
    pub fn retry(&self) {
        let mut readiness = self.lock();
        if *readiness == Readiness::TimedOut {
            *readiness = Readiness::Uninitialized;
        }
    }

    /// Drive one hydration against `gateway`'s session.
    ///
    /// `is_mounted` is checked once the response arrives; when it returns
    /// `false` the response is discarded and nothing is written.
    pub async fn run<A, S>(&self, gateway: &AuthGateway<A, S>, is_mounted: impl Fn() -> bool) -> HydrationStep
    where
        A: SessionApi,
        S: TokenStore,
    {
        let access_token = match self.begin(&gateway.session().snapshot()) {
            HydrationStep::Fetch { access_token } => access_token,
            step => return step,
        };

        let result = gateway.api().current_user(&access_token).await;

        if !is_mounted() {
            tracing::debug!("view unmounted during hydration; discarding profile response");
            self.set(Readiness::Uninitialized);
            return HydrationStep::Discarded;
        }
        if gateway.session().snapshot().access_token() != Some(access_token.as_str()) {
            tracing::debug!("session changed during hydration; discarding profile response");
            self.set(Readiness::Uninitialized);
            return HydrationStep::Discarded;
        }

        match result {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session hydrated");
                gateway.session().set_user(user);
                self.set(Readiness::Ready);
                HydrationStep::Ready
            }
            Err(ApiError::Timeout) => {
                tracing::warn!("profile request timed out");
                self.set(Readiness::TimedOut);
                HydrationStep::TimedOut
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile request failed; ending session");
                gateway.expire();
                self.set(Readiness::Redirecting);
                HydrationStep::Redirect(LOGIN_PATH)
            }
        }
    }
}
