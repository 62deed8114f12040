//! In-process mock of the Student Service backend.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use student_service_core::auth::{MemorySessionStore, SessionData, SessionStore};
use student_service_core::{ApiClient, ClientConfig};

/// What the refresh endpoint does when called.
#[derive(Debug, Clone)]
pub enum RefreshMode {
    Issue(String),
    /// Issue a token along with the signed-in user's fields
    IssueWithUser(String),
    /// Issue a token after a pause
    Delayed(String, Duration),
    Fail(StatusCode),
    NoToken,
}

pub struct Mock {
    pub valid_token: String,
    pub refresh: RefreshMode,
    /// Reject even valid tokens with 403
    pub forbid: bool,
    pub refresh_calls: AtomicUsize,
    pub protected_calls: AtomicUsize,
    pub refresh_saw_auth: AtomicBool,
    pub refresh_bodies: Mutex<Vec<Value>>,
    pub student_bodies: Mutex<Vec<Value>>,
}

impl Mock {
    pub fn new(valid_token: &str, refresh: RefreshMode) -> Arc<Self> {
        Self::build(valid_token, refresh, false)
    }

    pub fn forbidding(valid_token: &str, refresh: RefreshMode) -> Arc<Self> {
        Self::build(valid_token, refresh, true)
    }

    fn build(valid_token: &str, refresh: RefreshMode, forbid: bool) -> Arc<Self> {
        Arc::new(Self {
            valid_token: valid_token.to_string(),
            refresh,
            forbid,
            refresh_calls: AtomicUsize::new(0),
            protected_calls: AtomicUsize::new(0),
            refresh_saw_auth: AtomicBool::new(false),
            refresh_bodies: Mutex::new(Vec::new()),
            student_bodies: Mutex::new(Vec::new()),
        })
    }

    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn protected_count(&self) -> usize {
        self.protected_calls.load(Ordering::SeqCst)
    }

    fn guard(&self, headers: &HeaderMap) -> Option<Response> {
        self.protected_calls.fetch_add(1, Ordering::SeqCst);
        if bearer(headers).as_deref() != Some(self.valid_token.as_str()) {
            return Some(
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"success": false, "message": "Token expired"})),
                )
                    .into_response(),
            );
        }
        if self.forbid {
            return Some(
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"success": false, "message": "Access denied"})),
                )
                    .into_response(),
            );
        }
        None
    }
}

pub fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn refresh(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.refresh_calls.fetch_add(1, Ordering::SeqCst);
    if headers.contains_key(header::AUTHORIZATION) {
        mock.refresh_saw_auth.store(true, Ordering::SeqCst);
    }
    mock.refresh_bodies.lock().unwrap().push(body);

    match &mock.refresh {
        RefreshMode::Issue(token) => {
            Json(json!({"success": true, "data": {"token": token}})).into_response()
        }
        RefreshMode::IssueWithUser(token) => Json(json!({
            "success": true,
            "data": {
                "token": token,
                "userId": 5,
                "email": "ava@example.com",
                "firstName": "Ava",
                "lastName": "Vale",
                "role": "Admin"
            }
        }))
        .into_response(),
        RefreshMode::Delayed(token, pause) => {
            tokio::time::sleep(*pause).await;
            Json(json!({"success": true, "data": {"token": token}})).into_response()
        }
        RefreshMode::Fail(status) => (*status, "refresh unavailable").into_response(),
        RefreshMode::NoToken => Json(json!({"success": true, "data": {}})).into_response(),
    }
}

async fn list_students(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if let Some(denied) = mock.guard(&headers) {
        return denied;
    }
    Json(json!({
        "success": true,
        "data": {
            "content": [{"studentId": 1, "user": {"firstName": "Ava", "lastName": "Vale", "email": "ava@example.com"}}],
            "totalElements": 1,
            "totalPages": 1,
            "number": 0,
            "size": 20
        }
    }))
    .into_response()
}

async fn create_student(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(denied) = mock.guard(&headers) {
        return denied;
    }
    mock.student_bodies.lock().unwrap().push(body.clone());
    let mut data = body;
    data["studentId"] = json!(42);
    if let Some(obj) = data.as_object_mut() {
        obj.remove("password");
    }
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "message": "Student created", "data": data})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    match body["password"].as_str() {
        Some("Passw0rd!1") => Json(json!({
            "success": true,
            "data": {"token": "access-1", "refreshToken": "refresh-1"}
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid email or password"})),
        )
            .into_response(),
    }
}

async fn me(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if let Some(denied) = mock.guard(&headers) {
        return denied;
    }
    Json(json!({
        "success": true,
        "data": {"userId": 5, "email": "ava@example.com", "firstName": "Ava", "lastName": "Vale", "role": "Admin"}
    }))
    .into_response()
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({ "authorization": bearer(&headers) }))
}

/// The backend routes used across the integration tests.
pub fn router(mock: Arc<Mock>) -> Router {
    Router::new()
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/students", get(list_students).post(create_student))
        .route("/echo-auth", get(echo_auth))
        .route("/json", get(|| async { Json(json!({"data": {"id": 1}})) }))
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route("/text", get(|| async { "OK" }))
        .route(
            "/unprocessable",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"success": false, "message": "Email already exists"})),
                )
            }),
        )
        .route(
            "/error-field",
            get(|| async { (StatusCode::BAD_REQUEST, Json(json!({"error": "Bad paging"}))) }),
        )
        .route(
            "/crash",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>") }),
        )
        .with_state(mock)
}

/// Serve `app` on an ephemeral port and return its base URL.
pub async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the mock and build a client whose store holds `session`.
pub async fn setup(
    mock: Arc<Mock>,
    session: Option<SessionData>,
) -> (ApiClient, Arc<MemorySessionStore>) {
    let base_url = spawn(router(mock)).await;
    let store = Arc::new(match session {
        Some(s) => MemorySessionStore::with_session(s),
        None => MemorySessionStore::new(),
    });
    let shared: Arc<dyn SessionStore> = store.clone();
    let client = ApiClient::new(&ClientConfig::new(base_url), shared).unwrap();
    (client, store)
}

pub fn session(token: &str, refresh_token: Option<&str>) -> SessionData {
    let mut session = SessionData::new(token);
    session.refresh_token = refresh_token.map(str::to_string);
    session
}
