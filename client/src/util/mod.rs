//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules keep routing and formatting decisions out of page and
//! component code so they can be tested without a browser.

pub mod auth;
pub mod format;
