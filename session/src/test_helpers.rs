//! Shared fixtures for unit tests.

use std::sync::Mutex;

use crate::api::{
    self, Credentials, Registration, SessionApi, UserProfile, Video, VideoApi, VideoDetail, VideoQuery, ViewUpdate,
};
use crate::error::ApiError;
use crate::tokens::SessionTokens;

pub(crate) fn profile(id: &str) -> UserProfile {
    UserProfile {
        id: id.to_owned(),
        username: "alice".to_owned(),
        email: "a@b.com".to_owned(),
        full_name: "Alice A".to_owned(),
        avatar_url: "https://img.test/a.png".to_owned(),
        cover_image_url: None,
        watch_history: vec!["v1".to_owned()],
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        updated_at: "2024-01-01T00:00:00Z".to_owned(),
    }
}

pub(crate) fn video(id: &str) -> Video {
    Video {
        id: id.to_owned(),
        video_file: format!("https://cdn.test/{id}.mp4"),
        thumbnail: format!("https://cdn.test/{id}.png"),
        title: format!("Video {id}"),
        description: String::new(),
        duration: 60.0,
        views: 42,
        is_published: true,
        owner: "u1".to_owned(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

fn unconfigured<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("mock response not configured".to_owned()))
}

/// Scripted API. Every call is appended to `calls`; responses repeat.
#[derive(Default)]
pub(crate) struct MockApi {
    login: Mutex<Option<Result<SessionTokens, ApiError>>>,
    logout: Mutex<Option<Result<(), ApiError>>>,
    current_user: Mutex<Option<Result<UserProfile, ApiError>>>,
    register: Mutex<Option<Result<(), ApiError>>>,
    videos: Mutex<Option<Result<Vec<Video>, ApiError>>>,
    video: Mutex<Option<Result<VideoDetail, ApiError>>>,
    record_view: Mutex<Option<Result<(), ApiError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockApi {
    /// Login answered with a raw HTTP status and JSON body.
    pub(crate) fn login_response(self, status: u16, body: &serde_json::Value) -> Self {
        *self.login.lock().unwrap() = Some(api::parse_login(status, &body.to_string()));
        self
    }

    pub(crate) fn login_result(self, result: Result<SessionTokens, ApiError>) -> Self {
        *self.login.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn logout_result(self, result: Result<(), ApiError>) -> Self {
        *self.logout.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn current_user_result(self, result: Result<UserProfile, ApiError>) -> Self {
        *self.current_user.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn register_result(self, result: Result<(), ApiError>) -> Self {
        *self.register.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn videos_result(self, result: Result<Vec<Video>, ApiError>) -> Self {
        *self.videos.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn record_view_result(self, result: Result<(), ApiError>) -> Self {
        *self.record_view.lock().unwrap() = Some(result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|call| call.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn scripted<T: Clone>(slot: &Mutex<Option<Result<T, ApiError>>>) -> Result<T, ApiError> {
    slot.lock().unwrap().clone().unwrap_or_else(unconfigured)
}

#[async_trait::async_trait(?Send)]
impl SessionApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionTokens, ApiError> {
        self.record(format!("login:{}={}", credentials.kind.field(), credentials.identifier));
        scripted(&self.login)
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        self.record(format!("logout:{access_token}"));
        scripted(&self.logout)
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        self.record(format!("current_user:{access_token}"));
        scripted(&self.current_user)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.record(format!("register:{}", registration.username));
        scripted(&self.register)
    }
}

#[async_trait::async_trait(?Send)]
impl VideoApi for MockApi {
    async fn list_videos(&self, access_token: &str, query: &VideoQuery) -> Result<Vec<Video>, ApiError> {
        self.record(format!("list_videos:{access_token}:{}", query.path()));
        scripted(&self.videos)
    }

    async fn video(&self, access_token: &str, video_id: &str) -> Result<VideoDetail, ApiError> {
        self.record(format!("video:{access_token}:{video_id}"));
        scripted(&self.video)
    }

    async fn record_view(&self, access_token: &str, update: &ViewUpdate) -> Result<(), ApiError> {
        self.record(format!("record_view:{access_token}:{}:{}", update.video_id, update.user_id));
        scripted(&self.record_view)
    }
}
