use serde_json::json;

use super::*;
use crate::storage::MemoryTokenStore;
use crate::test_helpers::{MockApi, profile, video};
use crate::tokens::SessionTokens;

fn pair() -> SessionTokens {
    SessionTokens::new("T1", "R1").unwrap()
}

fn signed_in(api: MockApi) -> (AuthGateway<MockApi, MemoryTokenStore>, MemoryTokenStore) {
    let store = MemoryTokenStore::with_tokens(pair());
    (AuthGateway::new(api, store.clone()), store)
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_success_writes_storage_and_session() {
    let api = MockApi::default()
        .login_response(200, &json!({ "success": true, "data": { "accessToken": "T1", "refreshToken": "R1" } }));
    let store = MemoryTokenStore::new();
    let gateway = AuthGateway::new(api, store.clone());

    gateway.login("a@b.com", "secret1", IdentifierKind::Email).await.unwrap();

    let state = gateway.session().snapshot();
    assert_eq!(state.access_token(), Some("T1"));
    assert_eq!(state.refresh_token(), Some("R1"));
    assert!(state.is_authenticated());
    assert_eq!(store.load(), Some(pair()));
    assert_eq!(gateway.api().calls(), vec!["login:email=a@b.com".to_owned()]);
}

#[tokio::test]
async fn login_sends_username_field_when_selected() {
    let api = MockApi::default().login_result(Ok(pair()));
    let gateway = AuthGateway::new(api, MemoryTokenStore::new());
    gateway.login("alice", "secret1", IdentifierKind::Username).await.unwrap();
    assert_eq!(gateway.api().calls(), vec!["login:username=alice".to_owned()]);
}

#[tokio::test]
async fn login_401_leaves_everything_untouched() {
    let api = MockApi::default().login_response(401, &json!({ "success": false, "message": "Invalid user credentials" }));
    let store = MemoryTokenStore::new();
    let gateway = AuthGateway::new(api, store.clone());

    let failure = gateway.login("a@b.com", "wrong-pass", IdentifierKind::Email).await.unwrap_err();

    assert_eq!(failure.reason(), "invalid-credentials");
    assert_eq!(failure.user_message(), "Invalid user credentials");
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn login_network_failure_reports_network_error() {
    let api = MockApi::default().login_result(Err(ApiError::Network("connection refused".into())));
    let gateway = AuthGateway::new(api, MemoryTokenStore::new());
    let failure = gateway.login("a@b.com", "secret1", IdentifierKind::Email).await.unwrap_err();
    assert_eq!(failure.reason(), "network-error");
    assert!(!gateway.session().is_authenticated());
}

#[tokio::test]
async fn login_5xx_reports_server_error() {
    let api = MockApi::default().login_response(500, &json!({ "message": "boom" }));
    let gateway = AuthGateway::new(api, MemoryTokenStore::new());
    let failure = gateway.login("a@b.com", "secret1", IdentifierKind::Email).await.unwrap_err();
    assert_eq!(failure.reason(), "server-error");
}

#[tokio::test]
async fn failed_login_keeps_an_existing_session() {
    let api = MockApi::default().login_result(Err(ApiError::from_status(401, None)));
    let (gateway, store) = signed_in(api);
    assert!(gateway.login("bob", "secret1", IdentifierKind::Username).await.is_err());
    assert_eq!(gateway.session().snapshot().access_token(), Some("T1"));
    assert_eq!(store.load(), Some(pair()));
}

#[tokio::test]
async fn tokens_written_on_login_are_restored_on_next_start() {
    let api = MockApi::default().login_result(Ok(SessionTokens::new("eyJ.a-b_c", "eyJ.d+e/f").unwrap()));
    let store = MemoryTokenStore::new();
    AuthGateway::new(api, store.clone()).login("a@b.com", "secret1", IdentifierKind::Email).await.unwrap();

    let restarted = AuthGateway::new(MockApi::default(), store);
    let state = restarted.session().snapshot();
    assert_eq!(state.access_token(), Some("eyJ.a-b_c"));
    assert_eq!(state.refresh_token(), Some("eyJ.d+e/f"));
    assert!(state.is_authenticated());
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_success_clears_storage_and_session() {
    let (gateway, store) = signed_in(MockApi::default().logout_result(Ok(())));
    gateway.logout().await.unwrap();
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
    assert_eq!(gateway.api().calls(), vec!["logout:T1".to_owned()]);
}

#[tokio::test]
async fn logout_remote_failure_keeps_local_session_by_default() {
    let (gateway, store) = signed_in(MockApi::default().logout_result(Err(ApiError::from_status(500, None))));
    let failure = gateway.logout().await.unwrap_err();
    assert_eq!(failure.reason(), "server-error");
    assert!(gateway.session().is_authenticated());
    assert_eq!(store.load(), Some(pair()));
}

#[tokio::test]
async fn logout_remote_failure_clears_local_with_always_clear_policy() {
    let (gateway, store) = signed_in(MockApi::default().logout_result(Err(ApiError::Network("offline".into()))));
    let gateway = gateway.with_logout_policy(LogoutPolicy::AlwaysClearLocal);
    let failure = gateway.logout().await.unwrap_err();
    assert_eq!(failure.reason(), "network-error");
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn logout_unauthorized_clears_local_regardless_of_policy() {
    let (gateway, store) = signed_in(MockApi::default().logout_result(Err(ApiError::from_status(401, None))));
    gateway.logout().await.unwrap();
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn logout_without_session_skips_remote_call() {
    let gateway = AuthGateway::new(MockApi::default(), MemoryTokenStore::new());
    gateway.logout().await.unwrap();
    assert!(gateway.api().calls().is_empty());
}

// =============================================================================
// register
// =============================================================================

#[tokio::test]
async fn register_does_not_sign_in() {
    let api = MockApi::default().register_result(Ok(()));
    let gateway = AuthGateway::new(api, MemoryTokenStore::new());
    let registration = Registration {
        username: "alice".into(),
        email: "a@b.com".into(),
        password: "secret1".into(),
        full_name: "Alice A".into(),
    };
    gateway.register(&registration).await.unwrap();
    assert!(!gateway.session().is_authenticated());
    assert_eq!(gateway.api().calls(), vec!["register:alice".to_owned()]);
}

#[tokio::test]
async fn register_conflict_is_invalid_credentials_with_message() {
    let api = MockApi::default()
        .register_result(Err(ApiError::from_status(409, Some("User with email or username already exists".into()))));
    let gateway = AuthGateway::new(api, MemoryTokenStore::new());
    let registration = Registration {
        username: "alice".into(),
        email: "a@b.com".into(),
        password: "secret1".into(),
        full_name: "Alice A".into(),
    };
    let failure = gateway.register(&registration).await.unwrap_err();
    assert_eq!(failure.user_message(), "User with email or username already exists");
}

// =============================================================================
// authorized requests
// =============================================================================

#[tokio::test]
async fn authorized_without_session_sends_nothing() {
    let gateway = AuthGateway::new(MockApi::default(), MemoryTokenStore::new());
    let err = gateway.list_videos(&VideoQuery::newest_for("u1")).await.unwrap_err();
    assert_eq!(err, ApiError::MissingToken);
    assert!(gateway.api().calls().is_empty());
}

#[tokio::test]
async fn list_videos_uses_access_token() {
    let (gateway, _store) = signed_in(MockApi::default().videos_result(Ok(vec![video("v1")])));
    let videos = gateway.list_videos(&VideoQuery::newest_for("u1")).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(
        gateway.api().calls(),
        vec!["list_videos:T1:/videos/?sortType=desc&sortBy=createdAt&userId=u1".to_owned()]
    );
}

#[tokio::test]
async fn unauthorized_response_expires_session() {
    let (gateway, store) = signed_in(MockApi::default().videos_result(Err(ApiError::from_status(401, None))));
    let err = gateway.list_videos(&VideoQuery::newest_for("u1")).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
}

#[tokio::test]
async fn server_error_keeps_session() {
    let (gateway, _store) = signed_in(MockApi::default().videos_result(Err(ApiError::from_status(503, None))));
    assert!(gateway.list_videos(&VideoQuery::newest_for("u1")).await.is_err());
    assert!(gateway.session().is_authenticated());
}

#[tokio::test]
async fn record_view_needs_a_profile() {
    let (gateway, _store) = signed_in(MockApi::default().record_view_result(Ok(())));
    assert!(!gateway.record_view("v1").await.unwrap());
    assert_eq!(gateway.api().count("record_view"), 0);

    gateway.session().set_user(profile("u1"));
    assert!(gateway.record_view("v1").await.unwrap());
    assert_eq!(gateway.api().calls(), vec!["record_view:T1:v1:u1".to_owned()]);
}

#[tokio::test]
async fn expire_clears_storage_and_session() {
    let (gateway, store) = signed_in(MockApi::default());
    gateway.expire();
    assert!(!gateway.session().is_authenticated());
    assert!(store.load().is_none());
}
