use super::*;

#[test]
fn signed_in_visitor_leaves_public_only_pages() {
    for path in ["/", "/login", "/signup", "/login/", "/signup?next=x"] {
        assert_eq!(decide(path, true), GuardDecision::Redirect(HOME_PATH), "{path}");
    }
}

#[test]
fn anonymous_visitor_may_use_public_only_pages() {
    for path in ["/", "/login", "/signup"] {
        assert_eq!(decide(path, false), GuardDecision::Allow, "{path}");
    }
}

#[test]
fn anonymous_visitor_is_sent_to_login() {
    for path in ["/explore", "/profile", "/video/abc123", "/explore/", "/anything/else"] {
        assert_eq!(decide(path, false), GuardDecision::Redirect(LOGIN_PATH), "{path}");
    }
}

#[test]
fn signed_in_visitor_reaches_protected_pages() {
    for path in ["/explore", "/profile", "/video/abc123"] {
        assert_eq!(decide(path, true), GuardDecision::Allow, "{path}");
    }
}

#[test]
fn assets_are_never_redirected() {
    for path in ["/pkg/vidsync.wasm", "/pkg/vidsync.js", "/assets/logo.svg", "/favicon.ico", "/healthz"] {
        assert_eq!(classify(path), RouteClass::Asset, "{path}");
        assert_eq!(decide(path, false), GuardDecision::Allow, "{path}");
        assert_eq!(decide(path, true), GuardDecision::Allow, "{path}");
    }
}

#[test]
fn lookalike_paths_are_protected() {
    assert_eq!(classify("/login-help"), RouteClass::Protected);
    assert_eq!(classify("/pkgs"), RouteClass::Protected);
    assert_eq!(classify("//"), RouteClass::PublicOnly);
}
