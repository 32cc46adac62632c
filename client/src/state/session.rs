//! Session context for the browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`SessionContext`] is built in `App` and provided to every route. It
//! pairs the auth gateway (the only writer of tokens) with a signal that
//! mirrors the gateway's session so views re-render on login, logout and
//! profile hydration.
//!
//! The mirror is fed from the session's `watch` channel; views never write
//! it directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::config::{API_BASE_URL_VAR, LOGOUT_POLICY_VAR, REQUEST_TIMEOUT_VAR};
use session::{ApiConfig, AuthGateway, SessionState};

use crate::net::api::BrowserApi;
use crate::net::cookies::CookieTokenStore;

pub type ClientGateway = AuthGateway<BrowserApi, CookieTokenStore>;

/// Build-time overrides (`VIDSYNC_*` set when compiling the WASM bundle).
fn build_time_var(key: &str) -> Option<String> {
    let value = match key {
        API_BASE_URL_VAR => option_env!("VIDSYNC_API_BASE_URL"),
        REQUEST_TIMEOUT_VAR => option_env!("VIDSYNC_REQUEST_TIMEOUT_SECS"),
        LOGOUT_POLICY_VAR => option_env!("VIDSYNC_LOGOUT_POLICY"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// API configuration baked into the frontend bundle.
pub fn browser_config() -> ApiConfig {
    ApiConfig::from_lookup(build_time_var).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid build-time API configuration; using defaults");
        ApiConfig::default()
    })
}

#[derive(Clone)]
pub struct SessionContext {
    gateway: Arc<ClientGateway>,
    state: RwSignal<SessionState>,
}

impl SessionContext {
    /// Restore the session from cookies and start mirroring it.
    pub fn from_browser() -> Self {
        let config = browser_config();
        let gateway = AuthGateway::new(BrowserApi::new(&config), CookieTokenStore)
            .with_logout_policy(config.logout_policy);
        Self::with_gateway(gateway)
    }

    fn with_gateway(gateway: ClientGateway) -> Self {
        let state = RwSignal::new(gateway.session().snapshot());

        #[cfg(feature = "hydrate")]
        {
            let mut changes = gateway.session().subscribe();
            leptos::task::spawn_local(async move {
                while changes.changed().await.is_ok() {
                    let next = changes.borrow_and_update().clone();
                    if state.try_set(next).is_some() {
                        break;
                    }
                }
            });
        }

        Self { gateway: Arc::new(gateway), state }
    }

    pub fn provide(self) {
        provide_context(self);
    }

    pub fn gateway(&self) -> Arc<ClientGateway> {
        Arc::clone(&self.gateway)
    }

    /// Reactive view of the session.
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }
}

/// The session provided by `App`.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
