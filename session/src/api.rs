//! Remote API contract: endpoints, wire schema and response parsing.
//!
//! DESIGN
//! ======
//! Transports (`gloo-net` in the browser, `reqwest` in the CLI) only move
//! bytes. Everything about what a response means lives here as pure
//! functions over `(status, body)` so both transports agree and the rules
//! are testable without a network.
//!
//! Every response body is the envelope `{ success, data, message }`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ApiError;
use crate::tokens::SessionTokens;

// =============================================================================
// ENDPOINTS
// =============================================================================

pub const LOGIN_PATH: &str = "/users/login";
pub const LOGOUT_PATH: &str = "/users/logout";
pub const REGISTER_PATH: &str = "/users/register";
pub const CURRENT_USER_PATH: &str = "/users/current-user";
pub const VIDEOS_PATH: &str = "/videos/";
pub const VIEW_COUNT_PATH: &str = "/videos/update/views";

/// Join the configured base URL with an endpoint path.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

/// `GET /videos/:id`
#[must_use]
pub fn video_path(video_id: &str) -> String {
    format!("/videos/{video_id}")
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Which field the login identifier is sent as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierKind {
    #[default]
    Email,
    Username,
}

impl IdentifierKind {
    /// JSON field name in the login body.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Username => "username",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Username => "Username",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Email => Self::Username,
            Self::Username => Self::Email,
        }
    }
}

/// Login body. Serializes as `{ "<email|username>": identifier, "password": ... }`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub kind: IdentifierKind,
    pub identifier: String,
    pub password: String,
}

impl Serialize for Credentials {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(self.kind.field(), &self.identifier)?;
        map.serialize_entry("password", &self.password)?;
        map.end()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("kind", &self.kind)
            .field("identifier", &self.identifier)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Signup body for `POST /users/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

/// Sort direction for the video list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortType {
    Asc,
    #[default]
    Desc,
}

impl SortType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query for `GET /videos/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoQuery {
    pub sort_type: SortType,
    pub sort_by: String,
    pub user_id: String,
}

impl VideoQuery {
    /// Newest-first uploads of one user, as the explore feed requests them.
    #[must_use]
    pub fn newest_for(user_id: impl Into<String>) -> Self {
        Self { sort_type: SortType::Desc, sort_by: "createdAt".to_owned(), user_id: user_id.into() }
    }

    #[must_use]
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [("sortType", self.sort_type.as_str()), ("sortBy", &self.sort_by), ("userId", &self.user_id)]
    }

    /// `GET /videos/?sortType=..&sortBy=..&userId=..` path with query.
    #[must_use]
    pub fn path(&self) -> String {
        let query = self
            .pairs()
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{VIDEOS_PATH}?{query}")
    }
}

/// Body for `PATCH /videos/update/views`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewUpdate {
    pub video_id: String,
    pub user_id: String,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Profile of the signed-in user from `GET /users/current-user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(rename = "avatar", default)]
    pub avatar_url: String,
    #[serde(rename = "coverImage", default)]
    pub cover_image_url: Option<String>,
    /// Watched video ids, most recent last.
    #[serde(default)]
    pub watch_history: Vec<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// A video in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub video_file: String,
    #[serde(default)]
    pub thumbnail: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Playable detail from `GET /videos/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub video_file: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub thumbnail: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    result: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct VideoDetailData {
    #[serde(rename = "videoUrl")]
    video: VideoDetail,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn error_from_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message);
    ApiError::from_status(status, message)
}

/// Parse an enveloped response and return its `data`.
///
/// # Errors
///
/// Non-2xx statuses are classified with [`ApiError::from_status`]; a 2xx
/// with `success: false` is [`ApiError::Rejected`]; a body that does not
/// parse or lacks `data` is [`ApiError::Decode`].
pub fn parse_data<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if !is_success(status) {
        return Err(error_from_body(status, body));
    }
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected { status, message: envelope.message });
    }
    envelope.data.ok_or_else(|| ApiError::Decode("response has no data".to_owned()))
}

/// Check a response whose body is not needed.
///
/// # Errors
///
/// Non-2xx statuses are classified with [`ApiError::from_status`].
pub fn parse_empty(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) { Ok(()) } else { Err(error_from_body(status, body)) }
}

/// Token pair from a `POST /users/login` response.
///
/// # Errors
///
/// See [`parse_data`]; empty tokens are [`ApiError::Decode`].
pub fn parse_login(status: u16, body: &str) -> Result<SessionTokens, ApiError> {
    parse_data::<SessionTokens>(status, body)
}

/// Video list from `GET /videos/`.
///
/// # Errors
///
/// See [`parse_data`].
pub fn parse_video_page(status: u16, body: &str) -> Result<Vec<Video>, ApiError> {
    parse_data::<VideoPage>(status, body).map(|page| page.result)
}

/// Video detail from `GET /videos/:id`.
///
/// # Errors
///
/// See [`parse_data`].
pub fn parse_video_detail(status: u16, body: &str) -> Result<VideoDetail, ApiError> {
    parse_data::<VideoDetailData>(status, body).map(|data| data.video)
}

// =============================================================================
// TRANSPORT TRAITS
// =============================================================================

/// Account and session endpoints.
///
/// Futures are not `Send`: the browser transport runs on the single JS
/// thread.
#[async_trait::async_trait(?Send)]
pub trait SessionApi {
    /// `POST /users/login`
    async fn login(&self, credentials: &Credentials) -> Result<SessionTokens, ApiError>;

    /// `POST /users/logout`
    async fn logout(&self, access_token: &str) -> Result<(), ApiError>;

    /// `GET /users/current-user`
    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError>;

    /// `POST /users/register`
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

/// Video feed endpoints. All require an access token.
#[async_trait::async_trait(?Send)]
pub trait VideoApi {
    /// `GET /videos/?sortType&sortBy&userId`
    async fn list_videos(&self, access_token: &str, query: &VideoQuery) -> Result<Vec<Video>, ApiError>;

    /// `GET /videos/:id`
    async fn video(&self, access_token: &str, video_id: &str) -> Result<VideoDetail, ApiError>;

    /// `PATCH /videos/update/views`
    async fn record_view(&self, access_token: &str, update: &ViewUpdate) -> Result<(), ApiError>;
}
