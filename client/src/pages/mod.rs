//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Public-only pages (`home`, `login`, `signup`) install the route guard;
//! protected pages (`explore`, `profile`, `video`) hydrate the session
//! first and render through `ReadinessGate`.

pub mod explore;
pub mod home;
pub mod login;
pub mod profile;
pub mod signup;
pub mod video;
