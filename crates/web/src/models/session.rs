//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored user identity and credential.
///
/// The bearer token lives only in the server-side session record; the
/// browser holds nothing but the session cookie. At most one `CurrentUser`
/// exists per session, and every write is visible to the next guard or
/// request-decoration read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Email the user logged in with.
    pub email: String,
    /// Bearer token issued by the résumé backend.
    pub access_token: String,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
