//! `reqwest` transport for the session and video endpoints.
//!
//! Only moves bytes: every `(status, body)` pair is handed to the parsers in
//! `session::api`, so a response means the same thing here as in the browser.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::header::AUTHORIZATION;
use session::api::{self, Credentials, Registration, SessionApi, VideoApi, VideoQuery, ViewUpdate};
use session::tokens::bearer;
use session::{ApiConfig, ApiError, SessionTokens, UserProfile, Video, VideoDetail};

#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, base_url: config.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        api::endpoint(&self.base_url, path)
    }

    async fn exchange(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        tracing::debug!(status, bytes = body.len(), "api response");
        Ok((status, body))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() { ApiError::Timeout } else { ApiError::Network(err.to_string()) }
}

#[async_trait::async_trait(?Send)]
impl SessionApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionTokens, ApiError> {
        let request = self.client.post(self.url(api::LOGIN_PATH)).json(credentials);
        let (status, body) = self.exchange(request).await?;
        api::parse_login(status, &body)
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        let request = self.client.post(self.url(api::LOGOUT_PATH)).header(AUTHORIZATION, bearer(access_token));
        let (status, body) = self.exchange(request).await?;
        api::parse_empty(status, &body)
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        let request = self.client.get(self.url(api::CURRENT_USER_PATH)).header(AUTHORIZATION, bearer(access_token));
        let (status, body) = self.exchange(request).await?;
        api::parse_data(status, &body)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = self.client.post(self.url(api::REGISTER_PATH)).json(registration);
        let (status, body) = self.exchange(request).await?;
        api::parse_empty(status, &body)
    }
}

#[async_trait::async_trait(?Send)]
impl VideoApi for HttpApi {
    async fn list_videos(&self, access_token: &str, query: &VideoQuery) -> Result<Vec<Video>, ApiError> {
        let request = self.client.get(self.url(&query.path())).header(AUTHORIZATION, bearer(access_token));
        let (status, body) = self.exchange(request).await?;
        api::parse_video_page(status, &body)
    }

    async fn video(&self, access_token: &str, video_id: &str) -> Result<VideoDetail, ApiError> {
        let request = self.client.get(self.url(&api::video_path(video_id))).header(AUTHORIZATION, bearer(access_token));
        let (status, body) = self.exchange(request).await?;
        api::parse_video_detail(status, &body)
    }

    async fn record_view(&self, access_token: &str, update: &ViewUpdate) -> Result<(), ApiError> {
        let request = self
            .client
            .patch(self.url(api::VIEW_COUNT_PATH))
            .header(AUTHORIZATION, bearer(access_token))
            .json(update);
        let (status, body) = self.exchange(request).await?;
        api::parse_empty(status, &body)
    }
}
