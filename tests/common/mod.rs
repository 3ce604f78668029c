#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use swimdesk::AppContext;
use swimdesk_config::{ApiConfig, ClientConfig};
use swimdesk_models::UserProfile;
use swimdesk_session::MemoryStore;

/// A request as seen by the stub backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub tenant_id: Option<String>,
    pub body: Option<Value>,
}

type RequestLog = Arc<Mutex<Vec<RecordedRequest>>>;

pub struct StubBackend {
    pub base_url: String,
    log: RequestLog,
}

impl StubBackend {
    /// Serves `router` on an ephemeral local port, recording every request.
    pub async fn spawn(router: Router) -> Self {
        let log: RequestLog = Arc::default();
        let app = router.layer(from_fn_with_state(log.clone(), record));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            log,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.log.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    /// Context pointed at this backend with in-memory storage.
    pub fn context(&self) -> AppContext {
        context_for(&self.base_url)
    }
}

pub fn context_for(base_url: &str) -> AppContext {
    let config = ClientConfig {
        api: ApiConfig::with_base_url(base_url),
        ..ClientConfig::default()
    };
    AppContext::new(config, Arc::new(MemoryStore::new())).unwrap()
}

async fn record(State(log): State<RequestLog>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    log.lock().unwrap().push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: header(&parts.headers, "authorization"),
        tenant_id: header(&parts.headers, "x-tenant-id"),
        body: serde_json::from_slice(&bytes).ok(),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Token issued a minute ago, expiring `expires_in` from now.
pub fn token_expiring_in(expires_in: Duration) -> String {
    let now = Utc::now();
    encode(
        &Header::default(),
        &json!({
            "sub": "u1",
            "email": "manager@example.com",
            "iat": (now - Duration::minutes(1)).timestamp(),
            "exp": (now + expires_in).timestamp(),
        }),
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

pub fn valid_token() -> String {
    token_expiring_in(Duration::hours(1))
}

pub fn user_json(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "first_name": format!("First-{id}"),
        "last_name": "Tester",
        "email": format!("{id}@example.com"),
        "role_front": [role],
        "tenant_id": "t1"
    })
}

/// Stores a manager session and selects tenant `t1`. Returns the token.
pub fn authenticate(ctx: &AppContext) -> String {
    let token = valid_token();
    let profile: UserProfile = serde_json::from_value(user_json("u1", "manager")).unwrap();
    ctx.sessions.set_session(&token, profile).unwrap();
    ctx.tenants.set_tenant("t1").unwrap();
    token
}

/// `{ data: [[ { data: items, meta_data } ]] }`
pub fn paged(items: Value, total: i64) -> Value {
    json!({
        "data": [[{
            "data": items,
            "meta_data": { "total": total, "page": 1, "limit": 10, "total_pages": 1 }
        }]],
        "message": "success",
        "statusCode": 200
    })
}

/// `{ data: [[ item ]] }`
pub fn detail(item: Value) -> Value {
    json!({ "data": [[item]], "message": "success", "statusCode": 200 })
}

/// `{ data: [[[ item ]]] }`
pub fn nested_detail(item: Value) -> Value {
    json!({ "data": [[[item]]], "message": "success", "statusCode": 200 })
}
