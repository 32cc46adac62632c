//! Client-side session core for VidSync.
//!
//! This crate owns the authentication state machine shared by the browser
//! frontend, the edge server and the CLI: the token pair, its durable
//! storage contract, the observable in-memory session, the gateway that
//! performs login/logout against the remote API, the navigation guard and
//! the profile hydrator. It is target-agnostic; transports and storage
//! backends live in the packages that use it.

pub mod api;
pub mod config;
pub mod error;
pub mod forms;
pub mod gateway;
pub mod guard;
pub mod hydrator;
pub mod state;
pub mod storage;
pub mod tokens;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use api::{Credentials, IdentifierKind, Registration, SessionApi, UserProfile, Video, VideoApi, VideoDetail, VideoQuery};
pub use config::ApiConfig;
pub use error::{ApiError, AuthFailure, ErrorKind};
pub use forms::{Field, FieldError, LoginForm, SignupForm, ValidationError};
pub use gateway::{AuthGateway, LogoutPolicy};
pub use guard::{GuardDecision, RouteClass};
pub use hydrator::{HydrationStep, Readiness, SessionHydrator};
pub use state::{Session, SessionState};
pub use storage::{MemoryTokenStore, StorageError, TokenStore};
pub use tokens::SessionTokens;
