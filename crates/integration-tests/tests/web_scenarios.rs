//! End-to-end scenarios for the web client.
//!
//! Each test spins up the in-memory backend stub and drives the real
//! router through the full middleware stack, cookies included.

use vitae_integration_tests::{StubBackend, TestClient};

const EMAIL: &str = "ada@example.com";
const PASSWORD: &str = "correct-horse-battery";

async fn setup() -> (StubBackend, TestClient) {
    let stub = StubBackend::default();
    let url = stub.spawn().await;
    (stub, TestClient::new(url))
}

/// Register an account and log in, asserting both round-trips.
async fn log_in(client: &mut TestClient, email: &str) {
    let resp = client
        .post_form(
            "/register",
            &[
                ("email", email),
                ("password", PASSWORD),
                ("password_confirm", PASSWORD),
            ],
        )
        .await;
    assert!(resp.redirects_to("/login?success=registered"));

    let resp = client
        .post_form("/login", &[("email", email), ("password", PASSWORD)])
        .await;
    assert!(resp.redirects_to("/resumes"));
}

/// Create a minimal valid résumé through the editor form.
async fn create_resume(client: &mut TestClient, title: &str) {
    let resp = client
        .post_form(
            "/resumes/new",
            &[
                ("action", "save"),
                ("title", title),
                ("full_name", "Ada Lovelace"),
                ("email", EMAIL),
                ("phone", "+44 20 1234 5678"),
                ("city", "London"),
                ("summary", "Analytical engines, mostly."),
                ("skill", "Mathematics"),
            ],
        )
        .await;
    assert!(resp.redirects_to("/resumes"));
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let (_stub, mut client) = setup().await;

    for path in ["/resumes", "/resumes/new", "/resumes/1/edit", "/resumes/1/pdf"] {
        let resp = client.get(path).await;
        assert!(resp.redirects_to("/login"), "{path} should be guarded");
    }
}

#[tokio::test]
async fn test_register_login_and_empty_list() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    let resp = client.get("/resumes").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("no resumes yet"));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    client.clear_cookies();

    let resp = client
        .post_form("/login", &[("email", EMAIL), ("password", "wrong")])
        .await;
    assert!(resp.redirects_to("/login?error=credentials"));

    // Still logged out
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login"));
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    let resp = client
        .post_form(
            "/register",
            &[
                ("email", EMAIL),
                ("password", PASSWORD),
                ("password_confirm", PASSWORD),
            ],
        )
        .await;
    assert!(resp.redirects_to("/register?error=email_taken"));
}

#[tokio::test]
async fn test_register_validates_passwords_locally() {
    let (_stub, mut client) = setup().await;

    let resp = client
        .post_form(
            "/register",
            &[
                ("email", EMAIL),
                ("password", PASSWORD),
                ("password_confirm", "something-else"),
            ],
        )
        .await;
    assert!(resp.redirects_to("/register?error=password_mismatch"));

    let resp = client
        .post_form(
            "/register",
            &[
                ("email", EMAIL),
                ("password", "short"),
                ("password_confirm", "short"),
            ],
        )
        .await;
    assert!(resp.redirects_to("/register?error=password_too_short"));
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    let resp = client.post_form("/logout", &[]).await;
    assert!(resp.redirects_to("/login"));

    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login"));
}

// ============================================================================
// Resume CRUD
// ============================================================================

#[tokio::test]
async fn test_created_resume_appears_in_list() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    create_resume(&mut client, "Backend Engineer CV").await;
    assert_eq!(stub.resume_count(), 1);

    let resp = client.get("/resumes").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("Backend Engineer CV"));
}

#[tokio::test]
async fn test_validation_errors_rerender_without_saving() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    let resp = client
        .post_form(
            "/resumes/new",
            &[
                ("action", "save"),
                ("title", ""),
                ("full_name", "Ada Lovelace"),
                ("email", "not-an-email"),
            ],
        )
        .await;

    assert_eq!(resp.status, 200);
    let body = resp.text();
    assert!(body.contains("A resume title is required."));
    assert!(body.contains("Email address:"));
    // Typed values survive the re-render
    assert!(body.contains("Ada Lovelace"));
    assert_eq!(stub.resume_count(), 0);
}

#[tokio::test]
async fn test_add_and_remove_entries_rerender_without_saving() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    // One experience row in, two rows out
    let resp = client
        .post_form(
            "/resumes/new",
            &[
                ("action", "add:experience"),
                ("title", "Draft"),
                ("exp_title", "Engineer"),
                ("exp_company", "Acme"),
            ],
        )
        .await;
    assert_eq!(resp.status, 200);
    let body = resp.text();
    assert_eq!(body.matches("name=\"exp_title\"").count(), 2);
    assert!(body.contains("Engineer"));

    // Removing the only row is a no-op
    let resp = client
        .post_form(
            "/resumes/new",
            &[("action", "remove:skills:0"), ("skill", "Rust")],
        )
        .await;
    let body = resp.text();
    assert_eq!(body.matches("name=\"skill\"").count(), 1);
    assert!(body.contains("Rust"));

    assert_eq!(stub.resume_count(), 0);
}

#[tokio::test]
async fn test_edit_roundtrip() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "First title").await;

    let resp = client.get("/resumes/1/edit").await;
    assert_eq!(resp.status, 200);
    let body = resp.text();
    assert!(body.contains("First title"));
    assert!(body.contains("Mathematics"));

    let resp = client
        .post_form(
            "/resumes/1/edit",
            &[
                ("action", "save"),
                ("title", "Second title"),
                ("full_name", "Ada Lovelace"),
                ("email", EMAIL),
                ("skill", "Mathematics"),
            ],
        )
        .await;
    assert!(resp.redirects_to("/resumes"));

    let resp = client.get("/resumes").await;
    let body = resp.text();
    assert!(body.contains("Second title"));
    assert!(!body.contains("First title"));
}

#[tokio::test]
async fn test_delete_flow() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "Disposable").await;

    // Confirmation page first
    let resp = client.get("/resumes/1/delete").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("Disposable"));
    assert_eq!(stub.resume_count(), 1);

    let resp = client.post_form("/resumes/1/delete", &[]).await;
    assert!(resp.redirects_to("/resumes"));
    assert_eq!(stub.resume_count(), 0);

    let resp = client.get("/resumes").await;
    assert!(resp.text().contains("no resumes yet"));
}

#[tokio::test]
async fn test_resumes_are_isolated_per_user() {
    let (_stub, mut ada) = setup().await;
    log_in(&mut ada, EMAIL).await;
    create_resume(&mut ada, "Ada's CV").await;

    ada.clear_cookies();
    log_in(&mut ada, "grace@example.com").await;

    let resp = ada.get("/resumes").await;
    assert!(!resp.text().contains("Ada"));

    let resp = ada.get("/resumes/1/edit").await;
    assert_eq!(resp.status, 404);
}

// ============================================================================
// PDF Export
// ============================================================================

#[tokio::test]
async fn test_theme_picker_lists_the_catalog() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "Themed").await;

    let resp = client.get("/resumes/1/download").await;
    assert_eq!(resp.status, 200);
    let body = resp.text();
    for theme in &vitae_core::theme::THEMES {
        assert!(body.contains(theme.name), "{} missing from picker", theme.name);
        assert!(
            body.contains(&format!("/resumes/1/pdf?theme={}", theme.id)),
            "{} link missing from picker",
            theme.id
        );
    }
}

#[tokio::test]
async fn test_pdf_proxy_passes_theme_and_sets_headers() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "Themed").await;

    let resp = client.get("/resumes/1/pdf?theme=elegant-dark").await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type(), "application/pdf");
    assert!(resp.text().contains("theme=elegant-dark"));

    let disposition = resp
        .headers
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains(".pdf"));
}

#[tokio::test]
async fn test_unknown_theme_falls_back_to_default() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "Themed").await;

    let resp = client.get("/resumes/1/pdf?theme=does-not-exist").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("theme=modern-blue"));

    let resp = client.get("/resumes/1/pdf").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("theme=modern-blue"));
}

// ============================================================================
// Session Expiry
// ============================================================================

#[tokio::test]
async fn test_expired_token_clears_session_and_redirects() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    create_resume(&mut client, "Still here").await;

    stub.expire_tokens();

    // First rejected request takes the expiry path
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login?error=session_expired"));

    // The stored user is gone, so the guard now handles it
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login"));
}

#[tokio::test]
async fn test_login_page_shows_expiry_message_and_recovers() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    stub.expire_tokens();
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login?error=session_expired"));

    // Following the redirect renders the message and re-arms the session
    let resp = client.get("/login?error=session_expired").await;
    assert_eq!(resp.status, 200);
    assert!(resp.text().contains("session has expired"));

    // A fresh login works again
    let resp = client
        .post_form("/login", &[("email", EMAIL), ("password", PASSWORD)])
        .await;
    assert!(resp.redirects_to("/resumes"));

    let resp = client.get("/resumes").await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_second_expiry_is_handled_after_recovery() {
    let (stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;

    stub.expire_tokens();
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login?error=session_expired"));

    client.get("/login?error=session_expired").await;
    let resp = client
        .post_form("/login", &[("email", EMAIL), ("password", PASSWORD)])
        .await;
    assert!(resp.redirects_to("/resumes"));

    // The one-shot guard was released, so a later expiry is handled afresh
    stub.expire_tokens();
    let resp = client.get("/resumes").await;
    assert!(resp.redirects_to("/login?error=session_expired"));
}

#[tokio::test]
async fn test_login_failure_is_not_treated_as_expiry() {
    let (_stub, mut client) = setup().await;
    log_in(&mut client, EMAIL).await;
    client.post_form("/logout", &[]).await;

    // A 401 from the token endpoint is bad credentials, not expiry
    let resp = client
        .post_form("/login", &[("email", EMAIL), ("password", "wrong")])
        .await;
    assert!(resp.redirects_to("/login?error=credentials"));
}
