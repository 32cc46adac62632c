//! Remote API transport for the browser.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, each raced against
//! a `gloo-timers` sleep of the configured request timeout.
//! Server-side (SSR): stubs returning [`ApiError::Network`] since the remote
//! API is only called from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Responses are reduced to `(status, body)` and interpreted by the parsers
//! in `session::api`, so classification matches the CLI transport exactly.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::time::Duration;

#[cfg(any(test, feature = "hydrate"))]
use session::api;
use session::api::{Credentials, Registration, SessionApi, VideoApi, VideoQuery, ViewUpdate};
use session::{ApiConfig, ApiError, SessionTokens, UserProfile, Video, VideoDetail};

/// `SessionApi` + `VideoApi` over `fetch`.
#[derive(Debug, Clone)]
pub struct BrowserApi {
    #[cfg_attr(not(any(test, feature = "hydrate")), allow(dead_code))]
    base_url: String,
    timeout: Duration,
}

impl BrowserApi {
    #[must_use]
    pub fn new(config: &ApiConfig) -> Self {
        Self { base_url: config.base_url.clone(), timeout: config.request_timeout }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg(any(test, feature = "hydrate"))]
    fn url(&self, path: &str) -> String {
        api::endpoint(&self.base_url, path)
    }
}

#[cfg(not(feature = "hydrate"))]
fn unavailable<T>() -> Result<T, ApiError> {
    Err(ApiError::Network("not available on server".to_owned()))
}

/// Send `request`, giving up after `timeout`.
#[cfg(feature = "hydrate")]
async fn exchange(request: gloo_net::http::Request, timeout: Duration) -> Result<(u16, String), ApiError> {
    use futures::future::{Either, select};

    let send = Box::pin(async move {
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        Ok((status, body))
    });
    let timer = Box::pin(gloo_timers::future::sleep(timeout));
    match select(send, timer).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

#[cfg(feature = "hydrate")]
fn build_error(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

#[async_trait::async_trait(?Send)]
impl SessionApi for BrowserApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionTokens, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&self.url(api::LOGIN_PATH))
                .json(credentials)
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_login(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            unavailable()
        }
    }

    async fn logout(&self, access_token: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&self.url(api::LOGOUT_PATH))
                .header("Authorization", &session::tokens::bearer(access_token))
                .build()
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_empty(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            unavailable()
        }
    }

    async fn current_user(&self, access_token: &str) -> Result<UserProfile, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&self.url(api::CURRENT_USER_PATH))
                .header("Authorization", &session::tokens::bearer(access_token))
                .build()
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_data(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = access_token;
            unavailable()
        }
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::post(&self.url(api::REGISTER_PATH))
                .json(registration)
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_empty(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = registration;
            unavailable()
        }
    }
}

#[async_trait::async_trait(?Send)]
impl VideoApi for BrowserApi {
    async fn list_videos(&self, access_token: &str, query: &VideoQuery) -> Result<Vec<Video>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&self.url(&query.path()))
                .header("Authorization", &session::tokens::bearer(access_token))
                .build()
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_video_page(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, query);
            unavailable()
        }
    }

    async fn video(&self, access_token: &str, video_id: &str) -> Result<VideoDetail, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::get(&self.url(&api::video_path(video_id)))
                .header("Authorization", &session::tokens::bearer(access_token))
                .build()
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_video_detail(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, video_id);
            unavailable()
        }
    }

    async fn record_view(&self, access_token: &str, update: &ViewUpdate) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let request = gloo_net::http::Request::patch(&self.url(api::VIEW_COUNT_PATH))
                .header("Authorization", &session::tokens::bearer(access_token))
                .json(update)
                .map_err(build_error)?;
            let (status, body) = exchange(request, self.timeout).await?;
            api::parse_empty(status, &body)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (access_token, update);
            unavailable()
        }
    }
}
