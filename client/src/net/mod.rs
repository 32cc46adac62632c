//! Browser networking and storage backends for the session core.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` moves requests to the remote API with `gloo-net`; `cookies` keeps
//! the token pair in `document.cookie` so the edge server sees it too.

pub mod api;
pub mod cookies;
