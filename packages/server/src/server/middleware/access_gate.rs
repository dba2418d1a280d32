use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use tracing::{debug, warn};

use crate::common::{AccessSpec, ConfigError, Outcome, SessionAttributes};
use crate::server::auth::SessionStore;

/// Authorization gate for a route
///
/// Holds the route's [`AccessSpec`] and the session store to read from.
/// Cloning is cheap; one gate is built per route at registration time.
#[derive(Clone)]
pub struct AccessGate {
    spec: Arc<AccessSpec>,
    store: Arc<dyn SessionStore>,
    session_name: Arc<str>,
}

impl AccessGate {
    /// Build a gate from a spec string such as `"authenticated/verified"`
    ///
    /// Fails if the spec names no predicates. Unknown predicate names are
    /// accepted and ignored at request time; each one is logged here.
    pub fn new(
        spec: &str,
        store: Arc<dyn SessionStore>,
        session_name: impl Into<Arc<str>>,
    ) -> Result<Self, ConfigError> {
        let spec = AccessSpec::parse(spec)?;

        for name in spec.unrecognized() {
            warn!(
                predicate = name,
                access_spec = %spec,
                "Unrecognized access predicate will be ignored"
            );
        }

        Ok(Self {
            spec: Arc::new(spec),
            store,
            session_name: session_name.into(),
        })
    }

    pub fn spec(&self) -> &AccessSpec {
        &self.spec
    }

    /// Read the request's session, treating any lookup failure as anonymous
    pub async fn load_session(&self, headers: &HeaderMap) -> SessionAttributes {
        match self.store.get(headers, &self.session_name).await {
            Ok(attributes) => attributes,
            Err(error) => {
                debug!(%error, "Session lookup failed, treating request as anonymous");
                SessionAttributes::default()
            }
        }
    }

    /// Load the session once and evaluate the spec against it
    pub async fn check(&self, headers: &HeaderMap) -> Outcome {
        let session = self.load_session(headers).await;
        self.spec.evaluate(&session)
    }

    /// Wrap a route so it only runs when this gate allows the request
    pub fn protect<S>(self, route: MethodRouter<S>) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        route.route_layer(middleware::from_fn_with_state(self, access_gate_middleware))
    }
}

/// Access gate middleware
///
/// Rejects the request with a JSON error envelope on the first failing
/// predicate. Otherwise passes the request through untouched.
pub async fn access_gate_middleware(
    State(gate): State<AccessGate>,
    request: Request,
    next: Next,
) -> Response {
    match gate.check(request.headers()).await {
        Outcome::Allow => next.run(request).await,
        Outcome::Deny(denial) => {
            debug!(
                path = %request.uri().path(),
                access_spec = %gate.spec(),
                status = denial.status.as_u16(),
                reason = denial.reason().unwrap_or_default(),
                "Access denied"
            );
            denial.into_response()
        }
    }
}
