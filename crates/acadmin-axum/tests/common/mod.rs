//! Shared fixtures for acadmin-axum integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use acadmin_axum::bootstrap::{AxumContext, CorsConfig};
use acadmin_axum::routes::create_router;
use acadmin_core::ports::{IdentityError, IdentityProviderPort};
use acadmin_core::services::AccessService;
use acadmin_core::{CallerProfile, NoopEventPublisher};
use acadmin_db::TestDb;

/// Token of a caller allowed through the gate.
pub const IT_ADMIN: &str = "it-admin-token";
/// Administrator outside the IT area.
pub const HR_ADMIN: &str = "hr-admin-token";
/// Token that makes the fake identity service act as if it were down.
pub const IDENTITY_DOWN: &str = "identity-down";

/// Identity provider answering from a fixed token table.
pub struct FakeIdentity;

#[async_trait]
impl IdentityProviderPort for FakeIdentity {
    async fn fetch_profile(&self, token: &str) -> Result<CallerProfile, IdentityError> {
        let (role, sub_role) = match token {
            IT_ADMIN => ("administrator", "IT"),
            HR_ADMIN => ("administrator", "HR"),
            IDENTITY_DOWN => {
                return Err(IdentityError::Unavailable("connection refused".to_string()));
            }
            _ => return Err(IdentityError::InvalidToken("unknown token".to_string())),
        };
        Ok(CallerProfile {
            user_id: format!("{token}-id"),
            email: Some(format!("{token}@example.edu")),
            name: None,
            role: role.to_string(),
            sub_role: Some(sub_role.to_string()),
        })
    }
}

/// Router over a fresh in-memory database with the fake identity provider.
pub async fn test_app() -> Router {
    test_app_with_cors(&CorsConfig::AllowAll).await
}

pub async fn test_app_with_cors(cors: &CorsConfig) -> Router {
    let db = TestDb::new().await.unwrap();
    let core = db.app_core(Arc::new(NoopEventPublisher::new()));
    let access = AccessService::new(Arc::new(FakeIdentity));
    create_router(AxumContext::new(core, access), cors)
}

/// Send one request and decode the JSON response (or `Value::Null`).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, Some(IT_ADMIN), None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(IT_ADMIN), Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(IT_ADMIN), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, Some(IT_ADMIN), None).await
}

/// POST and return the created id, asserting 201.
pub async fn create(app: &Router, uri: &str, body: Value) -> i64 {
    let (status, json) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::CREATED, "POST {uri} failed: {json}");
    json["id"].as_i64().unwrap()
}
