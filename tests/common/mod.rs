use std::sync::Arc;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use sports_gear_api::app::app;
use sports_gear_api::auth::{self, IdentityPayload};
use sports_gear_api::state::AppState;
use sports_gear_api::store::MemoryStore;

pub const TEST_SECRET: &str = "gate-test-secret";

/// Router over a fresh in-memory store, plus a handle for seeding records.
pub fn test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), TEST_SECRET);
    (app(state), store)
}

/// Mint a valid one-hour token the way `POST /jwt` would.
pub fn token_for(email: &str) -> String {
    let payload = IdentityPayload { email: email.to_string(), extra: Map::new() };
    auth::issue_token(payload, TEST_SECRET).expect("token signing")
}

/// Drive one request through the router and decode the JSON reply.
pub async fn request(
    app: Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };

    Ok((status, json))
}
