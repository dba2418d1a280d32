use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;

use super::{ConfigError, Denial, Outcome, SessionAttributes, ValidationError};

/// Separator between predicate names in an access spec string
pub const SPEC_SEPARATOR: char = '/';

/// A named check against session attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `authenticated`: a username is present
    Authenticated,
    /// `verified`: the account is not explicitly unverified
    Verified,
    /// `admin`: role is `admin`
    Admin,
    /// `author`: the user is not explicitly a non-author
    Author,
    /// `author|admin`: either of the above two
    AuthorOrAdmin,
    /// Any other name. Always passes.
    Unrecognized(String),
}

impl Predicate {
    pub fn parse(name: &str) -> Self {
        match name {
            "authenticated" => Predicate::Authenticated,
            "verified" => Predicate::Verified,
            "admin" => Predicate::Admin,
            "author" => Predicate::Author,
            "author|admin" => Predicate::AuthorOrAdmin,
            other => Predicate::Unrecognized(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Predicate::Authenticated => "authenticated",
            Predicate::Verified => "verified",
            Predicate::Admin => "admin",
            Predicate::Author => "author",
            Predicate::AuthorOrAdmin => "author|admin",
            Predicate::Unrecognized(name) => name.as_str(),
        }
    }

    /// Returns the denial for this predicate if the session fails it
    pub fn check(&self, session: &SessionAttributes) -> Option<Denial> {
        let (status, reason) = match self {
            Predicate::Authenticated if !session.is_authenticated() => (
                StatusCode::UNAUTHORIZED,
                "This route needs authentication.",
            ),
            Predicate::Verified if session.is_verified == Some(false) => (
                StatusCode::FORBIDDEN,
                "This route is forbidden for unverified users.",
            ),
            Predicate::Admin if !session.is_admin() => (
                StatusCode::FORBIDDEN,
                "This route is forbidden for non admin users.",
            ),
            Predicate::Author if session.is_author == Some(false) => (
                StatusCode::FORBIDDEN,
                "This route is forbidden for non author users.",
            ),
            Predicate::AuthorOrAdmin
                if session.is_author == Some(false) && !session.is_admin() =>
            (
                StatusCode::FORBIDDEN,
                "This route is forbidden for non author users.",
            ),
            _ => return None,
        };

        Some(Denial::new(status, ValidationError::authentication(reason)))
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of predicates a route requires
///
/// Parsed from strings like `"authenticated/verified"`. Every predicate must
/// pass; they are checked left to right and evaluation stops at the first
/// failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSpec {
    predicates: Vec<Predicate>,
}

impl AccessSpec {
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let predicates: Vec<Predicate> = spec
            .split(SPEC_SEPARATOR)
            .filter(|name| !name.is_empty())
            .map(Predicate::parse)
            .collect();

        if predicates.is_empty() {
            return Err(ConfigError::EmptyAccessSpec);
        }

        Ok(Self { predicates })
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// Names that did not match a known predicate
    pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
        self.predicates.iter().filter_map(|predicate| match predicate {
            Predicate::Unrecognized(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn evaluate(&self, session: &SessionAttributes) -> Outcome {
        self.predicates
            .iter()
            .find_map(|predicate| predicate.check(session))
            .map_or(Outcome::Allow, Outcome::Deny)
    }
}

impl FromStr for AccessSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccessSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SPEC_SEPARATOR)?;
            }
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}
