//! Authentication route handlers.
//!
//! Login exchanges credentials for a bearer token at the backend's `/token`
//! endpoint and stores it in the server-side session. Registration creates
//! the account and sends the user to the login page; it never logs them in.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::ApiError;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

/// Map an error code from the redirect query to display text.
fn error_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid email or password.",
        "session_expired" => "Your session has expired. Please log in again.",
        "session" => "Could not start a session. Please try again.",
        "email_taken" => "That email address is already registered.",
        "password_mismatch" => "The passwords do not match.",
        "password_too_short" => "The password must be at least 8 characters.",
        "unavailable" => "The resume service is currently unavailable. Please try again.",
        _ => "Something went wrong. Please try again.",
    }
}

fn success_message(code: &str) -> &'static str {
    match code {
        "registered" => "Account created. You can log in now.",
        _ => "Done.",
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
///
/// Landing here settles any in-flight expiry handling for this session:
/// the one-shot expiry transition is released so a later, independent
/// token expiry gets handled afresh. Users who are already logged in are
/// sent straight to their résumé list.
pub async fn login_page(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Response {
    if let Some(id) = session.id() {
        state.expiry().release(&id.to_string());
    }

    if user.is_some() {
        return Redirect::to("/resumes").into_response();
    }

    LoginTemplate {
        error: query.error.as_deref().map(error_message),
        success: query.success.as_deref().map(success_message),
    }
    .into_response()
}

/// Handle login form submission.
///
/// Exchanges the credentials for a bearer token via the backend's
/// password-grant endpoint and stores it in the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.api().login(&form.email, &form.password).await {
        Ok(token) => {
            let user = CurrentUser {
                email: form.email,
                access_token: token.access_token,
            };

            if let Err(e) = set_current_user(&session, &user).await {
                tracing::error!("Failed to set session: {}", e);
                return Redirect::to("/login?error=session").into_response();
            }

            Redirect::to("/resumes").into_response()
        }
        Err(ApiError::Unauthorized) => {
            tracing::debug!("Login rejected for {}", form.email);
            Redirect::to("/login?error=credentials").into_response()
        }
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            Redirect::to("/login?error=unavailable").into_response()
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query.error.as_deref().map(error_message),
    }
}

/// Handle registration form submission.
///
/// On success the user is sent to the login page; registration never
/// establishes a session by itself.
pub async fn register(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    if form.password != form.password_confirm {
        return Redirect::to("/register?error=password_mismatch").into_response();
    }

    if form.password.len() < 8 {
        return Redirect::to("/register?error=password_too_short").into_response();
    }

    match state.api().register(&form.email, &form.password).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account registered");
            Redirect::to("/login?success=registered").into_response()
        }
        Err(ApiError::Rejected(_)) => {
            Redirect::to("/register?error=email_taken").into_response()
        }
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            Redirect::to("/register?error=failed").into_response()
        }
    }
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Drops the stored user and destroys the whole session record; the bearer
/// token is gone with it. The backend token itself simply ages out.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }

    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {}", e);
    }

    Redirect::to("/login").into_response()
}
