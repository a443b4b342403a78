//! HTTP route handlers for the web client.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the resume list
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! POST /logout                 - Logout action
//!
//! # Resumes (requires auth)
//! GET  /resumes                - Resume list
//! GET  /resumes/new            - Editor with a blank resume
//! POST /resumes/new            - Create / add entry / remove entry
//! GET  /resumes/{id}/edit      - Editor with an existing resume
//! POST /resumes/{id}/edit      - Update / add entry / remove entry
//! GET  /resumes/{id}/delete    - Delete confirmation page
//! POST /resumes/{id}/delete    - Delete action
//! GET  /resumes/{id}/download  - Theme picker for PDF export
//! GET  /resumes/{id}/pdf       - PDF proxy (?theme=<id>)
//! ```

pub mod auth;
pub mod form;
pub mod resumes;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the résumé routes router.
pub fn resume_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(resumes::index))
        .route("/new", get(resumes::new_page).post(resumes::create))
        .route("/{id}/edit", get(resumes::edit_page).post(resumes::update))
        .route(
            "/{id}/delete",
            get(resumes::delete_page).post(resumes::delete),
        )
        .route("/{id}/download", get(resumes::themes))
        .route("/{id}/pdf", get(resumes::pdf))
}

/// Create all routes for the web client.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .merge(auth_routes())
        .nest("/resumes", resume_routes())
}

/// The landing page is the résumé list; the auth guard bounces
/// unauthenticated visitors to the login page from there.
async fn home() -> Redirect {
    Redirect::to("/resumes")
}
