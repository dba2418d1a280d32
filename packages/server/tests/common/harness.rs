//! Test harness driving the real router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`; no socket is bound.

use std::sync::Arc;

use access_gate::common::SessionAttributes;
use access_gate::config::Config;
use access_gate::server::auth::SignedCookieStore;
use access_gate::server::build_app;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, header::COOKIE, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

pub const SESSION_NAME: &str = "session";

/// Response captured from the router
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// `Reason` of every entry in an error envelope
    pub fn reasons(&self) -> Vec<String> {
        self.body["errors"]
            .as_array()
            .map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e["Reason"].as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub struct TestHarness {
    pub app: Router,
    pub store: SignedCookieStore,
}

impl TestHarness {
    pub fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let config = Config {
            port: 0,
            session_name: SESSION_NAME.to_string(),
            session_secret: "test_secret_key".to_string(),
            session_issuer: "test_issuer".to_string(),
            session_ttl: chrono::Duration::hours(24),
            allowed_origins: vec!["http://localhost:3000".to_string()],
        };
        let store = SignedCookieStore::new(
            &config.session_secret,
            config.session_issuer.clone(),
            config.session_ttl,
        );
        let app = build_app(&config, Arc::new(store.clone())).expect("Failed to build app");

        Self { app, store }
    }

    /// Cookie header value for a session with these attributes
    pub fn cookie_for(&self, attributes: &SessionAttributes) -> String {
        let token = self.store.issue(attributes).expect("Failed to sign session");
        format!("{}={}", SESSION_NAME, token)
    }

    pub async fn get(&self, path: &str, session: Option<&SessionAttributes>) -> TestResponse {
        let cookie = session.map(|attributes| self.cookie_for(attributes));
        self.get_with_cookie(path, cookie.as_deref()).await
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let request = request.body(Body::empty()).expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body is not JSON")
        };

        TestResponse {
            status,
            content_type,
            body,
        }
    }
}
