//! CLI for minting signed session cookies
//!
//! Prints a cookie value the demo server accepts, signed with the same
//! `SESSION_SECRET`/`SESSION_ISSUER` configuration. Useful with curl:
//!
//! ```text
//! curl -b "session=$(issue_session --username ann --role admin)" localhost:8080/admin
//! ```

use access_gate::common::SessionAttributes;
use access_gate::config::Config;
use access_gate::server::auth::SignedCookieStore;
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(name = "issue_session")]
#[command(about = "Sign a session cookie for local testing")]
struct Cli {
    /// Username; omit for an anonymous session
    #[arg(long)]
    username: Option<String>,

    /// Value of isVerified
    #[arg(long)]
    verified: Option<bool>,

    /// Role, e.g. "admin"
    #[arg(long)]
    role: Option<String>,

    /// Value of isAuthor
    #[arg(long)]
    author: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let store = SignedCookieStore::new(
        &config.session_secret,
        config.session_issuer.clone(),
        config.session_ttl,
    );

    let attributes = SessionAttributes {
        username: cli.username,
        is_verified: cli.verified,
        role: cli.role,
        is_author: cli.author,
    };

    let token = store
        .issue(&attributes)
        .context("Failed to sign session")?;
    println!("{}", token);

    Ok(())
}
