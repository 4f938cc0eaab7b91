use crate::cli::{
    actions::Action,
    globals::{GlobalArgs, DEFAULT_SESSION_TTL_SECONDS},
};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to the server action and global state.
///
/// # Errors
/// Returns an error if a required argument is missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let dsn = matches
        .get_one::<String>("dsn")
        .cloned()
        .context("missing required argument: --dsn")?;

    let session_key = matches
        .get_one::<String>("session-key")
        .cloned()
        .context("missing required argument: --session-key")?;

    let session_ttl_seconds = matches
        .get_one::<i64>("session-ttl")
        .copied()
        .unwrap_or(DEFAULT_SESSION_TTL_SECONDS);

    let frontend_url = matches
        .get_one::<String>("frontend-url")
        .cloned()
        .unwrap_or_else(|| "http://localhost:3000".to_string());

    let globals = GlobalArgs::new(
        frontend_url,
        SecretString::from(session_key),
        session_ttl_seconds,
    );

    Ok((Action::Server { port, dsn }, globals))
}
