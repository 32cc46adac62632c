//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render page chrome and feed items while reading the session
//! from Leptos context.

pub mod readiness_gate;
pub mod sidebar;
pub mod video_card;
