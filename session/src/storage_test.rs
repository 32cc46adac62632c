use super::*;

fn pair() -> SessionTokens {
    SessionTokens::new("T1", "R1").unwrap()
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

#[test]
fn memory_store_starts_empty() {
    assert!(MemoryTokenStore::new().load().is_none());
}

#[test]
fn memory_store_round_trips_exact_tokens() {
    let store = MemoryTokenStore::new();
    let tokens = SessionTokens::new("eyJhbGciOi.abc-_", "r/+=").unwrap();
    store.save(&tokens).unwrap();
    assert_eq!(store.load(), Some(tokens));
}

#[test]
fn memory_store_clear_removes_both() {
    let store = MemoryTokenStore::with_tokens(pair());
    store.clear().unwrap();
    assert!(store.load().is_none());
}

#[test]
fn memory_store_clones_share_slot() {
    let store = MemoryTokenStore::new();
    let other = store.clone();
    store.save(&pair()).unwrap();
    assert_eq!(other.load(), Some(pair()));
}

// =============================================================================
// cookie strings
// =============================================================================

#[test]
fn set_cookie_strings_carry_strict_secure_attributes() {
    let [access, refresh] = set_cookie_strings(&pair(), CookieAttributes::default());
    assert!(access.starts_with("accessToken=T1"));
    assert!(refresh.starts_with("refreshToken=R1"));
    for cookie in [&access, &refresh] {
        assert!(cookie.contains("SameSite=Strict"), "{cookie}");
        assert!(cookie.contains("Secure"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
        assert!(!cookie.contains("Expires"), "{cookie}");
        assert!(!cookie.contains("Max-Age"), "{cookie}");
    }
}

#[test]
fn set_cookie_strings_can_drop_secure_for_plain_http() {
    let [access, _] = set_cookie_strings(&pair(), CookieAttributes { secure: false });
    assert!(!access.contains("Secure"));
}

#[test]
fn clear_cookie_strings_expire_both() {
    let [access, refresh] = clear_cookie_strings(CookieAttributes::default());
    assert!(access.starts_with("accessToken=;"));
    assert!(refresh.starts_with("refreshToken=;"));
    assert!(access.contains("Max-Age=0"));
    assert!(refresh.contains("Max-Age=0"));
}

// =============================================================================
// tokens_from_cookie_header
// =============================================================================

#[test]
fn header_with_both_cookies_yields_pair() {
    let tokens = tokens_from_cookie_header("theme=dark; accessToken=T1; refreshToken=R1").unwrap();
    assert_eq!(tokens, pair());
}

#[test]
fn header_with_only_access_is_no_session() {
    assert!(tokens_from_cookie_header("accessToken=T1").is_none());
}

#[test]
fn header_with_only_refresh_is_no_session() {
    assert!(tokens_from_cookie_header("refreshToken=R1").is_none());
}

#[test]
fn header_with_empty_value_is_no_session() {
    assert!(tokens_from_cookie_header("accessToken=; refreshToken=R1").is_none());
}

#[test]
fn empty_header_is_no_session() {
    assert!(tokens_from_cookie_header("").is_none());
}

#[test]
fn written_cookies_parse_back_bit_identical() {
    let tokens = SessionTokens::new("a.b.c", "d.e.f").unwrap();
    let header = set_cookie_strings(&tokens, CookieAttributes::default())
        .iter()
        .map(|c| c.split(';').next().unwrap_or_default().to_owned())
        .collect::<Vec<_>>()
        .join("; ");
    assert_eq!(tokens_from_cookie_header(&header), Some(tokens));
}
