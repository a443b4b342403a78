//! HTTP middleware stack for the web client.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. Session layer (tower-sessions with in-memory store)
//! 3. Session expiry (convert upstream 401s into clear + redirect)

pub mod auth;
pub mod expiry;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use expiry::{ExpiryGuard, session_expiry};
pub use session::create_session_layer;
