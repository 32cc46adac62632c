//! Edge route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation passes through this layer before the SSR renderer sees
//! it. Presence of both token cookies counts as a session; validity is left
//! to the client-side hydrator, which calls the API.
//!
//! DESIGN
//! ======
//! The decision itself lives in `session::guard` so the browser and the edge
//! agree on route classes. This layer only reads cookies, issues a 307, and
//! drops a half-written token pair so the next request starts clean.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session::guard::{GuardDecision, decide};
use session::storage::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use session::tokens::SessionTokens;

#[derive(Clone, Copy, Debug)]
pub struct GuardSettings {
    pub cookie_secure: bool,
}

fn cookie_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name).map(Cookie::value).filter(|v| !v.is_empty()).map(str::to_owned)
}

fn removal(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build((name, "")).path("/").secure(secure).same_site(SameSite::Strict).build();
    cookie.make_removal();
    cookie
}

/// Expire both token cookies, whichever of them the request carried.
fn clear_pair(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(removal(ACCESS_TOKEN_COOKIE, secure)).add(removal(REFRESH_TOKEN_COOKIE, secure))
}

pub async fn route_guard(
    State(settings): State<GuardSettings>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let access = cookie_value(&jar, ACCESS_TOKEN_COOKIE);
    let refresh = cookie_value(&jar, REFRESH_TOKEN_COOKIE);
    let partial = access.is_some() != refresh.is_some();
    let has_session = SessionTokens::from_parts(access, refresh).is_some();

    let path = request.uri().path().to_owned();
    let response = match decide(&path, has_session) {
        GuardDecision::Allow => next.run(request).await,
        GuardDecision::Redirect(target) => {
            tracing::debug!(%path, target, has_session, "route guard redirect");
            Redirect::temporary(target).into_response()
        }
    };
    if partial {
        tracing::debug!(%path, "clearing partial token pair");
        (clear_pair(jar, settings.cookie_secure), response).into_response()
    } else {
        response
    }
}

/// Wrap `router` so every request goes through [`route_guard`].
pub fn guarded(router: Router, cookie_secure: bool) -> Router {
    router.layer(middleware::from_fn_with_state(GuardSettings { cookie_secure }, route_guard))
}
