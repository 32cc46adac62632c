//! Navigation guard.
//!
//! DESIGN
//! ======
//! Routes are protected unless they appear on the public-only allow-list.
//! Public-only pages (landing, login, signup) bounce a signed-in visitor to
//! the explore feed; every other page bounces an anonymous visitor to
//! login. Static assets and the health probe are never redirected.
//!
//! The same pure decision runs at the edge (before a page renders) and in
//! the browser after hydration, so both agree on every path.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const HOME_PATH: &str = "/explore";

const PUBLIC_ONLY: &[&str] = &["/", LOGIN_PATH, SIGNUP_PATH];
const ASSET_PREFIXES: &[&str] = &["/pkg/", "/assets/"];
const ASSET_PATHS: &[&str] = &["/favicon.ico", "/healthz"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Only for visitors without a session.
    PublicOnly,
    /// Requires a session.
    Protected,
    /// Served regardless of session.
    Asset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(&'static str),
}

/// Strip query, fragment and trailing slashes. The root stays `/`.
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[must_use]
pub fn classify(path: &str) -> RouteClass {
    let raw = path.split(['?', '#']).next().unwrap_or_default();
    if ASSET_PREFIXES.iter().any(|prefix| raw.starts_with(prefix)) {
        return RouteClass::Asset;
    }
    let path = normalize(path);
    if ASSET_PATHS.contains(&path) {
        RouteClass::Asset
    } else if PUBLIC_ONLY.contains(&path) {
        RouteClass::PublicOnly
    } else {
        RouteClass::Protected
    }
}

/// Decide whether a navigation to `path` may proceed.
///
/// `has_session` must only be true when both tokens are present.
#[must_use]
pub fn decide(path: &str, has_session: bool) -> GuardDecision {
    match (classify(path), has_session) {
        (RouteClass::PublicOnly, true) => GuardDecision::Redirect(HOME_PATH),
        (RouteClass::Protected, false) => GuardDecision::Redirect(LOGIN_PATH),
        _ => GuardDecision::Allow,
    }
}
