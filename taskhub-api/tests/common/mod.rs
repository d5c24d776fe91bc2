//! Common test utilities for integration tests
//!
//! Every test gets its own router over a fresh `MemoryStore`, so tests run
//! in parallel without a database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use taskhub_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskhub_shared::{
    auth::jwt::{create_token, Claims, TokenType},
    models::user::{CreateUser, Role, User},
    store::{MemoryStore, Store},
};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<dyn Store>,
    pub app: Router,
    pub config: Config,
}

/// A user inserted directly into the store, with a valid access token
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> Uuid {
        self.user.id
    }
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config::for_tests();
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let app = build_router(AppState::new(store.clone(), config.clone()));

        Self { store, app, config }
    }

    /// Creates a user without going through password hashing
    pub async fn user(&self, name: &str) -> TestUser {
        let user = self
            .store
            .insert_user(CreateUser {
                name: name.to_string(),
                email: format!("{}-{}@example.com", name.to_lowercase(), Uuid::new_v4()),
                password_hash: "$argon2id$unused".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();

        let claims = Claims::new(user.id, user.role, TokenType::Access);
        let token = create_token(&claims, &self.config.jwt.secret).unwrap();

        TestUser { user, token }
    }

    /// Sends a request and returns the status and parsed JSON body
    ///
    /// An empty body is returned as `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "Expected JSON body, got {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, Some(token), None).await
    }

    /// Creates a project through the API and returns its id
    pub async fn create_project(&self, token: &str, title: &str, status: &str) -> String {
        let (code, body) = self
            .post(
                "/projects",
                token,
                serde_json::json!({ "title": title, "description": "", "status": status }),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    /// Creates a task through the API and returns its id
    pub async fn create_task(&self, token: &str, project_id: &str, title: &str, status: &str) -> String {
        let (code, body) = self
            .post(
                "/tasks",
                token,
                serde_json::json!({
                    "title": title,
                    "description": "",
                    "status": status,
                    "projectId": project_id,
                }),
            )
            .await;
        assert_eq!(code, StatusCode::CREATED, "{body}");
        body["id"].as_str().unwrap().to_string()
    }
}
