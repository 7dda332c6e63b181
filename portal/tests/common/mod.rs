//! # Test Backend
//!
//! In-process stand-in for the gateway and its three services. Every request
//! is recorded (method, path, headers, body) before it is answered.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use parking_lot::Mutex;
use serde_json::{json, Value};

use portal::app::App;
use portal::config::PortalConfig;
use portal::storage::{CredentialStore, MemoryStore, StorageKey};

pub const VALID_TOKEN: &str = "abc";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn authorization(&self) -> Option<&str> {
        self.header("authorization")
    }
}

struct VerifyStep {
    delay: Duration,
    status: u16,
    // Raw body; `None` answers with the service's usual payload
    body: Option<String>,
}

#[derive(Default)]
struct BackendState {
    requests: Vec<RecordedRequest>,
    valid_tokens: Vec<String>,
    // Answers for /auth/verify, consumed in order
    verify_script: VecDeque<VerifyStep>,
    // Forced status per path
    forced: HashMap<String, u16>,
}

/// Handle to the fake backend; cheap to clone.
#[derive(Clone, Default)]
pub struct Backend {
    state: Arc<Mutex<BackendState>>,
}

impl Backend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.accept_token(VALID_TOKEN);
        backend
    }

    pub fn accept_token(&self, token: &str) {
        self.state.lock().valid_tokens.push(token.to_string());
    }

    /// Answer the next `/auth/verify` with `status` after `delay`.
    pub fn script_verify(&self, delay: Duration, status: u16) {
        self.state.lock().verify_script.push_back(VerifyStep {
            delay,
            status,
            body: None,
        });
    }

    /// Answer the next `/auth/verify` with `status` and a raw `body`.
    pub fn script_verify_body(&self, status: u16, body: &str) {
        self.state.lock().verify_script.push_back(VerifyStep {
            delay: Duration::ZERO,
            status,
            body: Some(body.to_string()),
        });
    }

    /// Answer every request to `path` with `status`.
    pub fn force_status(&self, path: &str, status: u16) {
        self.state.lock().forced.insert(path.to_string(), status);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().requests.clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.lock().requests.last().cloned()
    }

    /// Bind to an ephemeral port and serve in the background; returns the
    /// base URL.
    pub async fn spawn(&self) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = axum::Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/", addr)
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn status_code(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn parse_form(body: &str) -> HashMap<String, String> {
    body.split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn users() -> Value {
    json!([
        {"id": 1, "username": "johndoe", "email": "johndoe@example.com", "name": "John Doe"},
        {"id": 2, "username": "janedoe", "email": "janedoe@example.com", "name": "Jane Doe"}
    ])
}

fn products() -> Value {
    json!([
        {"id": 1, "name": "Laptop", "price": 999.99, "user_id": 1},
        {"id": 2, "name": "Phone", "price": 699.99, "user_id": 1},
        {"id": 3, "name": "Tablet", "price": 399.99, "user_id": 2}
    ])
}

fn find_by_id(list: Value, id: &str, what: &str) -> Response {
    let found = list
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"].to_string() == id).cloned());
    match found {
        Some(item) => Json(item).into_response(),
        None => detail(StatusCode::NOT_FOUND, &format!("{} not found", what)),
    }
}

async fn handle(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    let (forced, verify_step, token_valid) = {
        let mut state = backend.state.lock();
        state.requests.push(RecordedRequest {
            method: method.to_string(),
            path: path.clone(),
            headers: headers.clone(),
            body: body.clone(),
        });

        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(shared::parse_bearer)
            .map(str::to_string);
        let token_valid = token.map_or(false, |t| state.valid_tokens.contains(&t));
        let verify_step = if path == "/auth/verify" {
            state.verify_script.pop_front()
        } else {
            None
        };
        (state.forced.get(&path).copied(), verify_step, token_valid)
    };

    if let Some(step) = verify_step {
        tokio::time::sleep(step.delay).await;
        let status = status_code(step.status);
        return match (status.is_success(), step.body) {
            (true, Some(body)) => (status, body).into_response(),
            (true, None) => Json(json!({"X-User-ID": "johndoe", "X-User-Role": "user"})).into_response(),
            (false, _) => detail(status, "scripted verification failure"),
        };
    }

    if let Some(status) = forced {
        return detail(status_code(status), "forced failure");
    }

    if method == Method::POST && path == "/auth/token" {
        let form = parse_form(&body);
        if form.get("username").map(String::as_str) == Some("johndoe")
            && form.get("password").map(String::as_str) == Some("secret")
        {
            return Json(json!({"access_token": VALID_TOKEN, "token_type": "bearer"})).into_response();
        }
        return detail(StatusCode::UNAUTHORIZED, "Incorrect username or password");
    }

    if !token_valid {
        return detail(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("GET", ["auth", "verify"]) => {
            Json(json!({"X-User-ID": "johndoe", "X-User-Role": "user"})).into_response()
        }
        ("GET", ["auth", "users", "me"]) => Json(json!({
            "username": "johndoe",
            "email": "johndoe@example.com",
            "full_name": "John Doe",
            "disabled": false,
            "role": "user"
        }))
        .into_response(),
        ("GET", ["users"]) => Json(users()).into_response(),
        ("GET", ["users", id]) => find_by_id(users(), id, "User"),
        ("GET", ["users", id, "products"]) => {
            let owned: Vec<Value> = products()
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter(|p| p["user_id"].to_string() == *id)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            Json(Value::Array(owned)).into_response()
        }
        ("POST", ["users"]) => {
            let mut user: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            user["id"] = json!(3);
            (StatusCode::CREATED, Json(user)).into_response()
        }
        ("GET", ["products"]) => Json(products()).into_response(),
        ("GET", ["products", id]) => find_by_id(products(), id, "Product"),
        ("POST", ["products"]) => {
            let mut product: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            product["id"] = json!(4);
            (StatusCode::CREATED, Json(product)).into_response()
        }
        _ => detail(StatusCode::NOT_FOUND, "Not Found"),
    }
}

/// A wired [`App`] talking to a fresh [`Backend`].
pub struct TestContext {
    pub app: App,
    pub backend: Backend,
    pub store: Arc<MemoryStore>,
}

impl TestContext {
    /// Start a backend and an app whose store holds `token` (and a cached
    /// profile) when given.
    pub async fn new(token: Option<&str>) -> Self {
        let backend = Backend::new();
        let base_url = backend.spawn().await;

        let store = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(StorageKey::Token, token.to_string());
            store.set(StorageKey::User, r#"{"username":"johndoe"}"#.to_string());
        }

        let app = App::new(&PortalConfig::with_base_url(base_url), store.clone()).unwrap();
        Self { app, backend, store }
    }

    pub fn current_path(&self) -> Option<String> {
        self.app.router.current().map(|route| route.path)
    }

    pub fn session_cleared(&self) -> bool {
        self.store.get(StorageKey::Token).is_none() && self.store.get(StorageKey::User).is_none()
    }
}
