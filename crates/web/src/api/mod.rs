//! Client for the résumé backend REST API.
//!
//! Every data operation the web client performs goes through [`ApiClient`].
//! The client owns the fixed base URL and is the single place where the
//! bearer credential is attached: all résumé operations carry
//! `Authorization: Bearer <token>`, while `/token` and `/register` are
//! exempt so authentication never depends on itself.
//!
//! A 401 from any protected call maps to [`ApiError::Unauthorized`]; the
//! session-expiry middleware turns that into the clear-session-and-redirect
//! path.

pub mod types;

pub use types::{RegisteredUser, ResumeDoc, TokenResponse};

use std::sync::Arc;

use reqwest::StatusCode;
use url::Url;

use vitae_core::{Resume, ResumeId};

use crate::config::VitaeConfig;
use types::ApiErrorBody;

/// Errors that can occur when talking to the résumé backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, bad TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the bearer credential (401).
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the input (400/409), e.g. a duplicate email.
    #[error("rejected by backend: {0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("backend error ({status}): {message}")]
    Upstream { status: u16, message: String },
}

/// Client for the résumé backend API.
///
/// Cheaply cloneable; the reqwest client and base URL live behind an `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &VitaeConfig) -> Self {
        Self::with_base_url(config.resume_api_url.clone())
    }

    /// Create a client pointed at an explicit base URL.
    #[must_use]
    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        format!("{base}{path}")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Auth (no bearer header)
    // ─────────────────────────────────────────────────────────────────────

    /// Exchange credentials for an access token via `POST /token`.
    ///
    /// The backend expects OAuth2 password-grant form fields: the email
    /// goes in `username`.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` for bad credentials; transport and other
    /// upstream failures otherwise.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let params = [("username", email), ("password", password)];

        let response = self
            .inner
            .client
            .post(self.endpoint("/token"))
            .form(&params)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Create a new account via `POST /register`.
    ///
    /// # Errors
    ///
    /// `ApiError::Rejected` when the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<RegisteredUser, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });

        let response = self
            .inner
            .client
            .post(self.endpoint("/register"))
            .json(&body)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Résumé operations (bearer credential required)
    // ─────────────────────────────────────────────────────────────────────

    /// List the authenticated user's résumés.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn list_resumes(&self, token: &str) -> Result<Vec<Resume>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/resumes"))
            .bearer_auth(token)
            .send()
            .await?;

        let response = check_status(response).await?;
        let docs: Vec<ResumeDoc> = response.json().await?;
        Ok(docs.into_iter().map(Resume::from).collect())
    }

    /// Fetch a single résumé.
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` if the résumé does not exist or belongs to
    /// another user.
    pub async fn get_resume(&self, token: &str, id: ResumeId) -> Result<Resume, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/resumes/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        let response = check_status(response).await?;
        let doc: ResumeDoc = response.json().await?;
        Ok(doc.into())
    }

    /// Create a résumé via `POST /resumes`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn create_resume(&self, token: &str, resume: &Resume) -> Result<Resume, ApiError> {
        let doc = ResumeDoc::from(resume);

        let response = self
            .inner
            .client
            .post(self.endpoint("/resumes"))
            .bearer_auth(token)
            .json(&doc)
            .send()
            .await?;

        let response = check_status(response).await?;
        let doc: ResumeDoc = response.json().await?;
        Ok(doc.into())
    }

    /// Update a résumé via `PUT /resumes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn update_resume(
        &self,
        token: &str,
        id: ResumeId,
        resume: &Resume,
    ) -> Result<Resume, ApiError> {
        let doc = ResumeDoc::from(resume);

        let response = self
            .inner
            .client
            .put(self.endpoint(&format!("/resumes/{id}")))
            .bearer_auth(token)
            .json(&doc)
            .send()
            .await?;

        let response = check_status(response).await?;
        let doc: ResumeDoc = response.json().await?;
        Ok(doc.into())
    }

    /// Delete a résumé via `DELETE /resumes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn delete_resume(&self, token: &str, id: ResumeId) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .delete(self.endpoint(&format!("/resumes/{id}")))
            .bearer_auth(token)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Fetch the server-rendered PDF for a résumé with the given theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the token is rejected.
    pub async fn download_pdf(
        &self,
        token: &str,
        id: ResumeId,
        theme_id: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint(&format!("/resumes/{id}/pdf")))
            .query(&[("theme", theme_id)])
            .header(reqwest::header::ACCEPT, "application/pdf")
            .bearer_auth(token)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Map a non-success status to the matching `ApiError`.
///
/// The backend reports problems as `{"detail": "..."}`; the detail is
/// carried into the error where it is safe to show (validation rejections),
/// and logged otherwise.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response
        .json::<ApiErrorBody>()
        .await
        .map(|body| body.detail)
        .unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(detail)),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT => Err(ApiError::Rejected(detail)),
        _ => Err(ApiError::Upstream {
            status: status.as_u16(),
            message: detail,
        }),
    }
}
