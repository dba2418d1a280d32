// Access Gate - route authorization for axum services
//
// Routes declare what they require ("authenticated/admin") and the gate
// checks the caller's session before the handler runs.

pub mod common;
pub mod config;
pub mod server;

pub use config::*;
