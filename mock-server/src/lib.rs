use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

/// One request as the server saw it. Header names are lower-case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

#[derive(Clone)]
pub struct MockState {
    token: Arc<str>,
    profile: Arc<Value>,
    seen: RequestLog,
}

impl MockState {
    pub fn new(token: &str, profile: Value) -> Self {
        Self {
            token: Arc::from(token),
            profile: Arc::new(profile),
            seen: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Snapshot of every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.seen.read().await.clone()
    }

    async fn record(&self, method: &Method, uri: &Uri, headers: &HeaderMap) {
        let request = RecordedRequest {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| {
                    (k.as_str().to_string(), String::from_utf8_lossy(v.as_bytes()).into_owned())
                })
                .collect(),
        };
        log::debug!("{} {}", request.method, request.path);
        self.seen.write().await.push(request);
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|t| t == &*self.token)
    }
}

pub fn app(state: MockState) -> Router {
    Router::new()
        .route("/auth/me", get(auth_me))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn auth_me(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.record(&method, &uri, &headers).await;
    if state.authorized(&headers) {
        (StatusCode::OK, Json(state.profile.as_ref().clone())).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}

async fn not_found(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> StatusCode {
    state.record(&method, &uri, &headers).await;
    StatusCode::NOT_FOUND
}
