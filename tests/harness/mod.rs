// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Test harness for driving the Chirpy router in-process.
//!
//! Each [`TestApp`] owns its own in-memory database and hit counter.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chirpy::{config::Config, db::Database, handlers::AppState, server};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

/// Router plus direct handles on its state.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

/// Response with the body already collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }
}

/// Configuration pointing at an in-memory database and the bundled site.
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.assets.root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = Database::connect(&config.database.url)
            .await
            .expect("in-memory database");
        let state = Arc::new(AppState::new(config, db).expect("app state"));
        Self {
            router: server::router(state.clone()),
            state,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &str) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.request(Method::POST, uri, None).await
    }

    /// Register a user and return its id.
    pub async fn create_user(&self, email: &str) -> String {
        let response = self
            .post("/api/users", &serde_json::json!({ "email": email }).to_string())
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["id"].as_str().unwrap().to_string()
    }
}
