use super::*;

#[test]
fn new_accepts_two_non_empty_tokens() {
    let tokens = SessionTokens::new("T1", "R1").unwrap();
    assert_eq!(tokens.access_token(), "T1");
    assert_eq!(tokens.refresh_token(), "R1");
}

#[test]
fn new_rejects_empty_access() {
    assert_eq!(SessionTokens::new("", "R1"), Err(TokenError::EmptyAccess));
}

#[test]
fn new_rejects_empty_refresh() {
    assert_eq!(SessionTokens::new("T1", ""), Err(TokenError::EmptyRefresh));
}

#[test]
fn from_parts_requires_both() {
    assert!(SessionTokens::from_parts(Some("T1".into()), Some("R1".into())).is_some());
    assert!(SessionTokens::from_parts(Some("T1".into()), None).is_none());
    assert!(SessionTokens::from_parts(None, Some("R1".into())).is_none());
    assert!(SessionTokens::from_parts(None, None).is_none());
}

#[test]
fn from_parts_treats_empty_as_absent() {
    assert!(SessionTokens::from_parts(Some(String::new()), Some("R1".into())).is_none());
}

#[test]
fn bearer_prefixes_access_token() {
    let tokens = SessionTokens::new("abc", "def").unwrap();
    assert_eq!(tokens.bearer(), "Bearer abc");
}

#[test]
fn debug_redacts_values() {
    let tokens = SessionTokens::new("secret-access", "secret-refresh").unwrap();
    let rendered = format!("{tokens:?}");
    assert!(!rendered.contains("secret"));
    assert!(rendered.contains("redacted"));
}

#[test]
fn deserialize_uses_camel_case_and_validates() {
    let tokens: SessionTokens = serde_json::from_str(r#"{"accessToken":"T1","refreshToken":"R1"}"#).unwrap();
    assert_eq!(tokens.access_token(), "T1");

    let err = serde_json::from_str::<SessionTokens>(r#"{"accessToken":"","refreshToken":"R1"}"#);
    assert!(err.is_err());
}

#[test]
fn serialize_uses_camel_case() {
    let tokens = SessionTokens::new("T1", "R1").unwrap();
    let json = serde_json::to_value(&tokens).unwrap();
    assert_eq!(json, serde_json::json!({ "accessToken": "T1", "refreshToken": "R1" }));
}
