//! Session-expiry handling for upstream 401 responses.
//!
//! When the backend rejects the stored bearer token, the session must be
//! cleared and the user sent to the login page. Several requests from the
//! same session can be in flight when the token expires, and each of them
//! will come back 401; [`ExpiryGuard`] makes the clear-and-redirect
//! transition happen exactly once per session.
//!
//! The guard is an explicit one-shot state transition per session:
//! absent = normal, present = expiring. `begin` performs
//! normal → expiring and tells the caller whether it won the transition;
//! `release` re-arms the session once the navigation has settled (the
//! login page GET), so a later, independent expiry is handled afresh.

use std::collections::HashSet;
use std::sync::Mutex;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::auth::clear_current_user;
use crate::state::AppState;

/// Paths that never participate in expiry handling.
///
/// Login and registration talk to the token endpoints themselves; a 401
/// there means bad credentials, not an expired session.
const EXEMPT_PREFIXES: &[&str] = &["/login", "/register", "/static", "/health"];

/// One-shot expiry transitions, keyed by session ID.
#[derive(Debug, Default)]
pub struct ExpiryGuard {
    expiring: Mutex<HashSet<String>>,
}

impl ExpiryGuard {
    /// Attempt the normal → expiring transition for a session.
    ///
    /// Returns `true` for exactly one caller per armed session; concurrent
    /// and subsequent callers get `false` until [`release`](Self::release).
    pub fn begin(&self, session_id: &str) -> bool {
        match self.expiring.lock() {
            Ok(mut expiring) => expiring.insert(session_id.to_owned()),
            // A poisoned lock means a panic mid-transition; treat the
            // session as already expiring rather than risk a second clear.
            Err(_) => false,
        }
    }

    /// Re-arm a session (expiring → normal) after the redirect has settled.
    pub fn release(&self, session_id: &str) {
        if let Ok(mut expiring) = self.expiring.lock() {
            expiring.remove(session_id);
        }
    }

    /// Whether a session is currently in the expiring state.
    #[must_use]
    pub fn is_expiring(&self, session_id: &str) -> bool {
        self.expiring
            .lock()
            .map(|expiring| expiring.contains(session_id))
            .unwrap_or(true)
    }
}

/// Response middleware that converts upstream-401 responses into the
/// session-expiry path.
///
/// Handlers surface `ApiError::Unauthorized` as a plain 401; this layer
/// clears the stored user (once, via the guard) and redirects to the login
/// view. Exempt paths pass through untouched.
pub async fn session_expiry(
    State(state): State<AppState>,
    session: Session,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if response.status() != StatusCode::UNAUTHORIZED || is_exempt(&path) {
        return response;
    }

    if let Some(id) = session.id() {
        let session_id = id.to_string();
        if state.expiry().begin(&session_id) {
            tracing::info!(path = %path, "bearer token rejected, clearing session");
            if let Err(e) = clear_current_user(&session).await {
                tracing::error!("failed to clear expired session: {e}");
            }
        }
    }

    Redirect::to("/login?error=session_expired").into_response()
}

fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_begin_wins_once_then_release_rearms() {
        let guard = ExpiryGuard::default();
        assert!(guard.begin("s1"));
        assert!(!guard.begin("s1"));
        assert!(guard.is_expiring("s1"));

        guard.release("s1");
        assert!(!guard.is_expiring("s1"));
        assert!(guard.begin("s1"));
    }

    #[test]
    fn test_sessions_are_independent() {
        let guard = ExpiryGuard::default();
        assert!(guard.begin("s1"));
        assert!(guard.begin("s2"));
    }

    #[test]
    fn test_concurrent_begin_exactly_one_winner() {
        let guard = Arc::new(ExpiryGuard::default());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let guard = Arc::clone(&guard);
                std::thread::spawn(move || guard.begin("shared-session"))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn test_exempt_paths() {
        assert!(is_exempt("/login"));
        assert!(is_exempt("/register"));
        assert!(is_exempt("/static/main.css"));
        assert!(!is_exempt("/resumes"));
        assert!(!is_exempt("/resumes/3/pdf"));
    }
}
