// Types shared between the gate and the HTTP layer

pub mod auth;

pub use auth::{AccessSpec, ConfigError, Outcome, SessionAttributes, SessionError};
