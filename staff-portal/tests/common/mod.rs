//! Test helpers: an in-process mock of the backend's `/api/auth` routes and a
//! token minter.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};
use staff_portal::config::BackendSettings;
use staff_portal::services::{AuthClient, AuthService, SessionManager, SessionStore};
use staff_portal::AppState;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const GOOD_PASSWORD: &str = "secret1";
pub const ISSUED_RESET_TOKEN: &str = "reset-token-123";

#[derive(Serialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// HS256 token whose `exp` is `now + offset_secs`.
pub fn mint_token(subject: &str, offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: subject.to_string(),
        iat: now,
        exp: now + offset_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-signing-secret"),
    )
    .unwrap()
}

/// A request the mock backend received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct Backend {
    pub requests: Mutex<Vec<Recorded>>,
    /// When set, `/auth/refresh` answers 401.
    pub reject_refresh: Mutex<bool>,
}

impl Backend {
    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.requests.lock().unwrap().push(Recorded {
            path: path.to_string(),
            authorization: header("authorization"),
            request_id: header("x-request-id"),
            body,
        });
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

type Reply = (StatusCode, Json<Value>);

fn message(status: StatusCode, text: &str) -> Reply {
    (status, Json(json!({ "message": text })))
}

async fn login(State(backend): State<Arc<Backend>>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    backend.record("/auth/login", &headers, body.clone());

    let username = body["username"].as_str().unwrap_or_default();
    if body["password"] != GOOD_PASSWORD {
        return message(StatusCode::BAD_REQUEST, "Invalid username or password");
    }
    if username == "empty.token@ourcompany.com" {
        return (
            StatusCode::OK,
            Json(json!({
                "token": "",
                "username": "empty.token",
                "email": username,
                "firstName": "Empty",
                "lastName": "Token",
                "role": "EMPLOYEE"
            })),
        );
    }
    let (role, handle) = if username.starts_with("admin") {
        ("ADMIN", "admin")
    } else {
        ("EMPLOYEE", "j.smith")
    };

    (
        StatusCode::OK,
        Json(json!({
            "token": mint_token(handle, 3600),
            "username": handle,
            "email": username,
            "firstName": "John",
            "lastName": "Smith",
            "role": role
        })),
    )
}

async fn register(State(backend): State<Arc<Backend>>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    backend.record("/auth/register", &headers, body.clone());

    if body["username"] == "t.taken" {
        return message(StatusCode::CONFLICT, "Username is already taken!");
    }
    message(StatusCode::OK, "User registered successfully!")
}

async fn refresh(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Reply {
    backend.record("/auth/refresh", &headers, Value::Null);

    if *backend.reject_refresh.lock().unwrap() {
        return message(StatusCode::UNAUTHORIZED, "Token expired");
    }
    (
        StatusCode::OK,
        Json(json!({ "token": mint_token("refreshed", 7200) })),
    )
}

async fn forgot_password(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    backend.record("/auth/forgot-password", &headers, body.clone());

    if body["email"] == "nobody@ourcompany.com" {
        return message(StatusCode::NOT_FOUND, "User not found with email");
    }
    (
        StatusCode::OK,
        Json(json!({
            "message": "Password reset token generated",
            "resetToken": ISSUED_RESET_TOKEN
        })),
    )
}

async fn reset_password(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    backend.record("/auth/reset-password", &headers, body.clone());

    if body["token"] != ISSUED_RESET_TOKEN {
        return message(StatusCode::BAD_REQUEST, "Invalid or expired reset token");
    }
    message(StatusCode::OK, "Password has been reset successfully")
}

/// Mock backend listening on an ephemeral port.
pub struct TestBackend {
    pub url: String,
    pub backend: Arc<Backend>,
}

impl TestBackend {
    pub async fn spawn() -> Self {
        let backend = Arc::new(Backend::default());
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/auth/forgot-password", post(forgot_password))
            .route("/api/auth/reset-password", post(reset_password))
            .with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://127.0.0.1:{}/api", port),
            backend,
        }
    }

    pub fn state(&self, store: Arc<dyn SessionStore>) -> AppState {
        let session = Arc::new(SessionManager::new(store));
        let client = AuthClient::new(BackendSettings {
            url: self.url.clone(),
            timeout_secs: 5,
        })
        .unwrap();
        AppState::new(
            Arc::new(AuthService::new(client, session.clone())),
            session,
        )
    }
}
