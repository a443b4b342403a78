//! In-process test client for the web-client router.
//!
//! Drives the full router (session layer, expiry middleware, handlers)
//! without opening a socket, and carries cookies between requests the way
//! a browser would.

use std::collections::HashMap;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use tower::ServiceExt;
use url::Url;

use vitae_web::config::VitaeConfig;
use vitae_web::state::AppState;

/// High-entropy signing secret for test sessions.
const TEST_SESSION_SECRET: &str = "kR8vQ2mX9pL4wN7jT3bF6hD1sG5yU0cA2eW4rI8oZ6xV3nM9";

/// A browser-like client over the in-process router.
pub struct TestClient {
    app: Router,
    cookies: HashMap<String, String>,
}

impl TestClient {
    /// Build a client whose web app talks to the given backend URL.
    #[must_use]
    pub fn new(resume_api_url: Url) -> Self {
        let config = VitaeConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0,
            base_url: "http://localhost:3000".to_owned(),
            resume_api_url,
            session_secret: SecretString::from(TEST_SESSION_SECRET),
            sentry_dsn: None,
            sentry_environment: None,
        };

        Self {
            app: vitae_web::app(AppState::new(config)),
            cookies: HashMap::new(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None).await
    }

    /// Send a POST request with URL-encoded form fields.
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        self.request(Method::POST, path, Some(body)).await
    }

    /// Forget all cookies, like closing the browser with session cookies.
    pub fn clear_cookies(&mut self) {
        self.cookies.clear();
    }

    async fn request(&mut self, method: Method, path: &str, form_body: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);

        if !self.cookies.is_empty() {
            let cookie_header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let request = match form_body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .expect("failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        for value in response.headers().get_all(header::SET_COOKIE) {
            if let Ok(cookie) = value.to_str() {
                self.store_cookie(cookie);
            }
        }

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body")
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    fn store_cookie(&mut self, raw: &str) {
        let Some(pair) = raw.split(';').next() else {
            return;
        };
        let Some((name, value)) = pair.split_once('=') else {
            return;
        };

        // An empty value is a removal
        if value.is_empty() {
            self.cookies.remove(name);
        } else {
            self.cookies.insert(name.to_owned(), value.to_owned());
        }
    }
}

/// A buffered response with assertion helpers.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Response body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// Whether this is a redirect to the given path.
    #[must_use]
    pub fn redirects_to(&self, path: &str) -> bool {
        self.status.is_redirection() && self.location() == Some(path)
    }

    /// The `Content-Type` header, or empty.
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
    }
}
