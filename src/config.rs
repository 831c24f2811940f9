//! Run configuration and argument validation.
//!
//! The CLI surface in `main.rs` leaves every flag optional so that all
//! semantic validation happens here, before any prompt is shown or network
//! call is made.

use regex_lite::Regex;
use thiserror::Error;

/// Pattern a server URL must match: `http(s)://host(:port)(/path)`. The host
/// may also be an IPv4 address.
const URL_PATTERN: &str = r"^https?://[\w.-]+(:\d+)?(/[\w./-]*)?$";

/// Errors caused by malformed or missing command line input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No URL was given. See --help for more information")]
    MissingUrl,

    #[error(
        "URL '{url}' was supplied in the wrong pattern. The URL must be supplied like so: http(s)://myserver(:123)(/path). Instead of the hostname, you can also specify the IPv4 address of your server"
    )]
    InvalidUrl { url: String },

    #[error("No series id or name was given. See --help for more information")]
    MissingTarget,
}

/// What the catalog resolver should resolve: a direct id or a search term.
///
/// When both a series id and a name are configured, the id takes precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Id(String),
    Name(String),
}

/// Immutable configuration of one run, constructed once at startup and
/// passed explicitly to every stage.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Base URL of the media server instance
    pub base_url: String,
    /// Direct catalog id of the series or movie to download
    pub series_id: Option<String>,
    /// Restricts a series download to the season with this id
    pub season_id: Option<String>,
    /// Username flag value; falls back to env or prompt when absent
    pub username: Option<String>,
    /// Password flag value; falls back to env or prompt when absent
    pub password: Option<String>,
    /// Free-text search term used when no direct id is given
    pub name: Option<String>,
}

impl Config {
    /// Checks that all required arguments are present and well-formed.
    ///
    /// Must pass before any prompt or network call; a failure here is an
    /// argument error reported to the user with exit code 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingUrl);
        }

        let pattern = Regex::new(URL_PATTERN).expect("hard-coded URL pattern compiles");
        if !pattern.is_match(&self.base_url) {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
            });
        }

        self.target().map(|_| ())
    }

    /// Returns what to resolve, with the series id taking precedence over a
    /// search name when both were supplied.
    pub fn target(&self) -> Result<Target, ConfigError> {
        if let Some(id) = &self.series_id {
            return Ok(Target::Id(id.clone()));
        }
        if let Some(name) = &self.name {
            return Ok(Target::Name(name.clone()));
        }
        Err(ConfigError::MissingTarget)
    }
}
