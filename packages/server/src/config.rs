use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub session_name: String,
    pub session_secret: String,
    pub session_issuer: String,
    /// Lifetime of issued sessions, always positive
    pub session_ttl: chrono::Duration,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let session_ttl = parse_ttl_hours(
            &env::var("SESSION_TTL_HOURS").unwrap_or_else(|_| "24".to_string()),
        )
        .context("Invalid SESSION_TTL_HOURS")?;

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(origins) => parse_origins(&origins).context("Invalid ALLOWED_ORIGINS")?,
            Err(_) => Vec::new(),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            session_name: env::var("SESSION_NAME").unwrap_or_else(|_| "session".to_string()),
            session_secret: env::var("SESSION_SECRET").context("SESSION_SECRET must be set")?,
            session_issuer: env::var("SESSION_ISSUER")
                .unwrap_or_else(|_| "access-gate".to_string()),
            session_ttl,
            allowed_origins,
        })
    }
}

fn parse_ttl_hours(hours: &str) -> Result<chrono::Duration> {
    let hours: i64 = hours.trim().parse().context("must be a whole number of hours")?;
    if hours <= 0 {
        bail!("must be positive, got {}", hours);
    }
    chrono::Duration::try_hours(hours).with_context(|| format!("{} hours is out of range", hours))
}

/// Comma separated list of exact origins; `*` is not allowed because
/// credentialed CORS needs explicit origins
fn parse_origins(origins: &str) -> Result<Vec<String>> {
    let origins: Vec<String> = origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        bail!("wildcard origin `*` is not supported, list origins explicitly");
    }

    Ok(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example,,").unwrap(),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("").unwrap().is_empty());
    }

    #[test]
    fn test_wildcard_origin_is_error() {
        assert!(parse_origins("*").is_err());
        assert!(parse_origins("https://a.example, *").is_err());
    }

    #[test]
    fn test_parse_ttl_hours() {
        assert_eq!(parse_ttl_hours("24").unwrap(), chrono::Duration::hours(24));
        assert_eq!(parse_ttl_hours(" 1 ").unwrap(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_non_positive_ttl_is_error() {
        assert!(parse_ttl_hours("0").is_err());
        assert!(parse_ttl_hours("-5").is_err());
    }

    #[test]
    fn test_out_of_range_ttl_is_error() {
        assert!(parse_ttl_hours(&(i64::MAX / 1000).to_string()).is_err());
        assert!(parse_ttl_hours(&i64::MAX.to_string()).is_err());
        assert!(parse_ttl_hours("lots").is_err());
    }
}
