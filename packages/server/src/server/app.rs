//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::common::ConfigError;
use crate::config::Config;
use crate::server::auth::SessionStore;
use crate::server::middleware::AccessGate;
use crate::server::routes::{
    account_handler, admin_handler, drafts_handler, health_handler, me_handler,
};

/// Build the Axum application router
///
/// Every gated route gets its own [`AccessGate`] sharing `store`. A malformed
/// access spec fails here, before the server starts listening.
pub fn build_app(config: &Config, store: Arc<dyn SessionStore>) -> Result<Router, ConfigError> {
    let gate = |spec: &str| AccessGate::new(spec, store.clone(), config.session_name.as_str());

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/me", gate("authenticated")?.protect(get(me_handler)))
        .route(
            "/account",
            gate("authenticated/verified")?.protect(get(account_handler)),
        )
        .route(
            "/admin",
            gate("authenticated/admin")?.protect(get(admin_handler)),
        )
        .route(
            "/articles/drafts",
            gate("authenticated/author|admin")?.protect(get(drafts_handler)),
        )
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) if origin != "*" => Some(value),
            _ => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::auth::MemorySessionStore;

    fn config(allowed_origins: &[&str]) -> Config {
        Config {
            port: 0,
            session_name: "session".to_string(),
            session_secret: "test_secret_key".to_string(),
            session_issuer: "test_issuer".to_string(),
            session_ttl: chrono::Duration::hours(24),
            allowed_origins: allowed_origins.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_build_app_with_explicit_origins() {
        let store = Arc::new(MemorySessionStore::default());
        assert!(build_app(&config(&["http://localhost:3000"]), store).is_ok());
    }

    #[test]
    fn test_wildcard_origin_is_skipped() {
        let store = Arc::new(MemorySessionStore::default());
        assert!(build_app(&config(&["*", "not a header\n"]), store).is_ok());
    }
}
