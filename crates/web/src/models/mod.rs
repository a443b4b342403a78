//! Domain models for the web client.

pub mod session;

pub use session::CurrentUser;
pub use session::keys as session_keys;
