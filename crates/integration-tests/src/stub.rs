//! In-memory stand-in for the résumé backend.
//!
//! Implements just enough of the backend REST contract for the web client:
//! `/register`, `/token` (OAuth2 password-grant form), résumé CRUD under
//! `/resumes`, and the PDF endpoint. Résumé documents are stored as raw
//! JSON, so whatever the client sends comes back byte-for-byte plus the
//! server-assigned fields.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

/// Shared, cloneable stub backend.
#[derive(Clone, Default)]
pub struct StubBackend {
    inner: Arc<Mutex<StubInner>>,
}

#[derive(Default)]
struct StubInner {
    /// email -> (user id, password)
    users: HashMap<String, (i32, String)>,
    /// bearer token -> user id
    tokens: HashMap<String, i32>,
    /// resume id -> document
    resumes: HashMap<i32, Value>,
    next_user_id: i32,
    next_resume_id: i32,
    next_token: i32,
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct TokenForm {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct PdfQuery {
    theme: Option<String>,
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl StubBackend {
    /// Invalidate every issued bearer token.
    ///
    /// Subsequent authenticated calls get a 401, which is exactly what an
    /// expired token looks like to the client.
    pub fn expire_tokens(&self) {
        self.lock().tokens.clear();
    }

    /// Number of stored résumés, across all users.
    #[must_use]
    pub fn resume_count(&self) -> usize {
        self.lock().resumes.len()
    }

    fn lock(&self) -> MutexGuard<'_, StubInner> {
        self.inner.lock().expect("stub backend lock poisoned")
    }

    fn authenticate(&self, headers: &HeaderMap) -> Option<i32> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?;
        self.lock().tokens.get(token).copied()
    }

    /// Bind the stub on an ephemeral port and serve it in the background.
    ///
    /// Returns the base URL to hand to the web client.
    pub async fn spawn(&self) -> Url {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub backend");
        let addr = listener.local_addr().expect("stub backend has no address");
        let router = self.router();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("stub backend crashed");
        });

        format!("http://{addr}")
            .parse()
            .expect("stub backend address is a valid URL")
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/register", post(register))
            .route("/token", post(token))
            .route("/resumes", get(list_resumes).post(create_resume))
            .route(
                "/resumes/{id}",
                get(get_resume).put(update_resume).delete(delete_resume),
            )
            .route("/resumes/{id}/pdf", get(render_pdf))
            .with_state(self.clone())
    }
}

async fn register(State(stub): State<StubBackend>, Json(body): Json<RegisterBody>) -> Response {
    let mut inner = stub.lock();
    if inner.users.contains_key(&body.email) {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }

    inner.next_user_id += 1;
    let id = inner.next_user_id;
    inner.users.insert(body.email.clone(), (id, body.password));

    Json(json!({ "id": id, "email": body.email })).into_response()
}

async fn token(
    State(stub): State<StubBackend>,
    axum::Form(form): axum::Form<TokenForm>,
) -> Response {
    let mut inner = stub.lock();
    let Some((id, password)) = inner.users.get(&form.username).cloned() else {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    };
    if password != form.password {
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }

    inner.next_token += 1;
    let access_token = format!("tok-{id}-{}", inner.next_token);
    inner.tokens.insert(access_token.clone(), id);

    Json(json!({ "access_token": access_token, "token_type": "bearer" })).into_response()
}

async fn list_resumes(State(stub): State<StubBackend>, headers: HeaderMap) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let inner = stub.lock();
    let mut resumes: Vec<&Value> = inner
        .resumes
        .values()
        .filter(|doc| doc.get("user_id").and_then(Value::as_i64) == Some(i64::from(user_id)))
        .collect();
    resumes.sort_by_key(|doc| doc.get("id").and_then(Value::as_i64));

    Json(resumes).into_response()
}

async fn create_resume(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Json(mut doc): Json<Value>,
) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let mut inner = stub.lock();
    inner.next_resume_id += 1;
    let id = inner.next_resume_id;

    doc["id"] = json!(id);
    doc["user_id"] = json!(user_id);
    doc["updated_at"] = json!(chrono::Utc::now().to_rfc3339());
    inner.resumes.insert(id, doc.clone());

    Json(doc).into_response()
}

async fn get_resume(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let inner = stub.lock();
    match inner.resumes.get(&id) {
        Some(doc) if doc.get("user_id").and_then(Value::as_i64) == Some(i64::from(user_id)) => {
            Json(doc.clone()).into_response()
        }
        _ => detail(StatusCode::NOT_FOUND, "Resume not found"),
    }
}

async fn update_resume(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(mut doc): Json<Value>,
) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let mut inner = stub.lock();
    let owned = inner
        .resumes
        .get(&id)
        .is_some_and(|existing| {
            existing.get("user_id").and_then(Value::as_i64) == Some(i64::from(user_id))
        });
    if !owned {
        return detail(StatusCode::NOT_FOUND, "Resume not found");
    }

    doc["id"] = json!(id);
    doc["user_id"] = json!(user_id);
    doc["updated_at"] = json!(chrono::Utc::now().to_rfc3339());
    inner.resumes.insert(id, doc.clone());

    Json(doc).into_response()
}

async fn delete_resume(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let mut inner = stub.lock();
    let owned = inner
        .resumes
        .get(&id)
        .is_some_and(|existing| {
            existing.get("user_id").and_then(Value::as_i64) == Some(i64::from(user_id))
        });
    if !owned {
        return detail(StatusCode::NOT_FOUND, "Resume not found");
    }

    inner.resumes.remove(&id);
    Json(json!({ "detail": "Resume deleted" })).into_response()
}

async fn render_pdf(
    State(stub): State<StubBackend>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Query(query): Query<PdfQuery>,
) -> Response {
    let Some(user_id) = stub.authenticate(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    };

    let inner = stub.lock();
    let owned = inner
        .resumes
        .get(&id)
        .is_some_and(|existing| {
            existing.get("user_id").and_then(Value::as_i64) == Some(i64::from(user_id))
        });
    if !owned {
        return detail(StatusCode::NOT_FOUND, "Resume not found");
    }

    let theme = query.theme.unwrap_or_else(|| "modern-blue".to_owned());
    let body = format!("%PDF-1.4 stub theme={theme}");

    ([(header::CONTENT_TYPE, "application/pdf")], body).into_response()
}
