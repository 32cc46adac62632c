//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public-only pages install the route guard; protected pages run profile
//! hydration. Both redirect through the router so the edge server's guard
//! and the client agree on every path.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::guard::{self, GuardDecision};
use session::{ApiError, ErrorKind, Readiness, SessionHydrator, SessionState};

/// Where the guard sends a visitor of `path`, if anywhere.
pub fn guard_redirect(path: &str, state: &SessionState) -> Option<&'static str> {
    match guard::decide(path, state.is_authenticated()) {
        GuardDecision::Redirect(target) => Some(target),
        GuardDecision::Allow => None,
    }
}

/// Placeholder text while a protected view is not ready.
pub fn readiness_message(readiness: Readiness) -> &'static str {
    match readiness {
        Readiness::Uninitialized | Readiness::Loading | Readiness::Ready => "Loading...",
        Readiness::Redirecting => "Redirecting to login...",
        Readiness::TimedOut => "The server is taking too long to respond.",
    }
}

/// Message for a failed authenticated request on a protected page.
pub fn request_error_message(err: &ApiError) -> &'static str {
    match err.kind() {
        ErrorKind::Network => "Could not reach the server. Check your connection and try again.",
        ErrorKind::Auth => "Your session has ended. Please log in again.",
        ErrorKind::Server | ErrorKind::Validation => "The server could not load this page. Please try again later.",
    }
}

/// Redirect away from the current page whenever the guard disagrees with
/// the session, e.g. `/login` right after a successful login.
pub fn install_route_guard<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = leptos_router::hooks::use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        let state = session.get();
        if let Some(target) = guard_redirect(&path, &state) {
            navigate(target, NavigateOptions::default());
        }
    });
}

/// Hydrate the signed-in user's profile for a protected page.
///
/// Returns the page's readiness and a retry action for the timed-out state.
/// The in-flight request is discarded if the page unmounts first.
pub fn use_session_hydration() -> (ReadSignal<Readiness>, Callback<()>) {
    let readiness = RwSignal::new(Readiness::Uninitialized);
    let hydrator = SessionHydrator::new();
    let attempt = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        use leptos_router::hooks::use_navigate;
        use session::HydrationStep;

        use crate::state::session::use_session;

        let ctx = use_session();
        let navigate = use_navigate();
        let alive = Arc::new(AtomicBool::new(true));
        let alive_effect = alive.clone();
        let hydrator = hydrator.clone();
        Effect::new(move || {
            attempt.track();
            readiness.set(Readiness::Loading);
            let gateway = ctx.gateway();
            let hydrator = hydrator.clone();
            let alive = alive_effect.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let step = hydrator.run(&gateway, || alive.load(Ordering::Relaxed)).await;
                if !alive.load(Ordering::Relaxed) {
                    return;
                }
                readiness.set(hydrator.readiness());
                if let HydrationStep::Redirect(target) = step {
                    navigate(target, NavigateOptions::default());
                }
            });
        });
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    let retry = Callback::new(move |()| {
        hydrator.retry();
        attempt.update(|n| *n += 1);
    });
    (readiness.read_only(), retry)
}
