//! # client
//!
//! Leptos frontend for VidSync. Server-rendered by the edge server and
//! hydrated in the browser, where it owns the session: tokens live in
//! cookies, profile hydration runs on protected pages, and every network
//! call goes through the `session` crate's gateway.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
