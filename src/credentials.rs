//! Credential resolution.
//!
//! Username and password are taken from, in priority order: the explicit
//! flag, the environment, an interactive prompt. The password prompt does
//! not echo. No validation happens here; bad credentials fail at the
//! authenticate call.

use crate::config::Config;
use crate::prompt::{PromptError, Prompter};
use std::env;
use thiserror::Error;

/// Environment variable consulted when no username flag is given.
pub const USERNAME_ENV: &str = "JF_USERNAME";
/// Environment variable consulted when no password flag is given.
pub const PASSWORD_ENV: &str = "JF_PASSWORD";

/// Errors that can occur while resolving credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read credentials: {0}")]
    Prompt(#[from] PromptError),
}

/// Resolves the username from flag, environment or prompt.
pub fn resolve_username(
    config: &Config,
    prompter: &dyn Prompter,
) -> Result<String, CredentialError> {
    from_sources(
        config.username.as_deref(),
        env::var(USERNAME_ENV).ok(),
        || prompter.input("Username"),
    )
}

/// Resolves the password from flag, environment or non-echoing prompt.
pub fn resolve_password(
    config: &Config,
    prompter: &dyn Prompter,
) -> Result<String, CredentialError> {
    from_sources(
        config.password.as_deref(),
        env::var(PASSWORD_ENV).ok(),
        || prompter.secret("Password"),
    )
}

/// Applies the flag -> environment -> prompt priority for one credential
/// field. Empty flag and environment values count as absent, matching the
/// behavior of unset variables.
fn from_sources<F>(
    flag: Option<&str>,
    env_value: Option<String>,
    prompt: F,
) -> Result<String, CredentialError>
where
    F: FnOnce() -> Result<String, PromptError>,
{
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return Ok(value.to_string());
    }

    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return Ok(value);
    }

    Ok(prompt()?)
}
