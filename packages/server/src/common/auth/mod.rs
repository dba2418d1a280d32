//! Route access checks
//!
//! An [`AccessSpec`] names the predicates a route requires. Evaluating it
//! against a session's [`SessionAttributes`] yields an [`Outcome`]:
//!
//! ```rust
//! use access_gate::common::auth::{AccessSpec, Outcome, SessionAttributes};
//!
//! let spec = AccessSpec::parse("authenticated/admin").unwrap();
//! let session = SessionAttributes::for_user("ann").with_role("admin");
//! assert_eq!(spec.evaluate(&session), Outcome::Allow);
//! ```

mod attributes;
mod errors;
mod outcome;
mod predicate;

pub use attributes::{SessionAttributes, ADMIN_ROLE};
pub use errors::{ConfigError, SessionError};
pub use outcome::{Denial, ErrorEnvelope, Outcome, ValidationError, AUTHENTICATION_ERROR};
pub use predicate::{AccessSpec, Predicate, SPEC_SEPARATOR};
