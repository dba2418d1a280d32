// Session lookup used by the access gate
pub mod memory;
pub mod signed_cookie;

pub use memory::*;
pub use signed_cookie::*;

use async_trait::async_trait;
use axum::http::{header::COOKIE, HeaderMap};
use cookie::Cookie;

use crate::common::{SessionAttributes, SessionError};

/// Loads the session attributes attached to a request
///
/// Implementations find the cookie called `session_name` and turn its value
/// into attributes. Any failure is reported as a [`SessionError`]; callers
/// decide what an unreadable session means.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(
        &self,
        headers: &HeaderMap,
        session_name: &str,
    ) -> Result<SessionAttributes, SessionError>;
}

/// Value of the cookie named `name`, if the request carries one
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

/// Like [`session_cookie`] but reports a missing cookie as an error
pub(crate) fn require_session_cookie(
    headers: &HeaderMap,
    name: &str,
) -> Result<String, SessionError> {
    session_cookie(headers, name).ok_or_else(|| SessionError::MissingCookie(name.to_string()))
}
