use thiserror::Error;

/// Why a session could not be loaded for a request
///
/// The access gate never surfaces these to clients; a failed lookup is
/// treated as an anonymous session.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No session cookie named {0}")]
    MissingCookie(String),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session not found")]
    NotFound,

    #[error("Session expired")]
    Expired,
}

/// Errors raised while wiring gates onto routes
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Access spec must name at least one predicate")]
    EmptyAccessSpec,
}
