//! jellydl - Interactively resolve and bulk download media from a Jellyfin
//! instance.
//!
//! This library provides the selection-and-orchestration workflow: it turns
//! ambiguous user input (a name or an id, an optional season) into a
//! concrete, confirmed list of downloadable media files and drives the
//! download execution.

mod catalog;
mod config;
mod confirm;
mod credentials;
mod download;
mod expand;
mod plan;
mod prompt;
mod resolve;
#[cfg(test)]
mod testing;

use plan::DownloadPlan;
use thiserror::Error;

// Re-export error types
pub use catalog::ServerError;
pub use config::ConfigError;
pub use credentials::CredentialError;
pub use download::DownloadError;
pub use expand::ExpandError;
pub use prompt::PromptError;
pub use resolve::ResolveError;

// Re-export the types the binary wires together
pub use catalog::{AuthSession, Episode, Item, ItemKind, JellyfinServer, MediaServer, Movie, Season};
pub use config::{Config, Target};
pub use credentials::{PASSWORD_ENV, USERNAME_ENV};
pub use download::{Downloader, HttpDownloader};
pub use prompt::{Prompter, TerminalPrompter};

/// Progress event emitted during a run
///
/// These events let the binary (or any other embedder) render status output
/// without the workflow printing it itself.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Logging in to the server
    Authenticating { server: String },

    /// Authentication succeeded
    Authenticated { user: String },

    /// Looking up a catalog item by its id
    LookingUpItem { id: String },

    /// Searching the catalog by text
    Searching { term: String },

    /// The target resolved to a concrete catalog item
    ItemResolved { name: String, kind: ItemKind },

    /// Fetching season and episode information for a series
    FetchingSeasons { series: String },

    /// Season information fetched
    SeasonsFetched { series: String, season_count: usize },

    /// The episode selection is complete
    EpisodesSelected { count: usize },

    /// Fetching download metadata for a movie
    FetchingMovie { name: String },

    /// Transfers are about to begin
    DownloadStarted { count: usize },

    /// All transfers finished
    Complete { count: usize },
}

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything was downloaded
    Downloaded,
    /// The user declined at the confirmation gate
    Declined,
}

/// Top-level error type for jellydl operations
#[derive(Debug, Error)]
pub enum JellyDlError {
    /// Malformed or missing command line input
    #[error("Wrong arguments: {0}")]
    Config(#[from] ConfigError),

    /// Credential resolution failed
    #[error("Failed to resolve credentials: {0}")]
    Credentials(#[from] CredentialError),

    /// The server rejected the login
    #[error("Authentication failed: {0}")]
    Authentication(#[source] ServerError),

    /// The target could not be resolved to a catalog item
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Season information could not be obtained
    #[error("Failed to obtain episode information: {0}")]
    SeasonFetch(#[source] ServerError),

    /// Movie information could not be obtained
    #[error("Failed to obtain movie information: {0}")]
    MovieFetch(#[source] ServerError),

    /// Series expansion failed
    #[error(transparent)]
    Expand(#[from] ExpandError),

    /// The confirmation prompt could not be read
    #[error("Failed to read confirmation: {0}")]
    Confirmation(#[from] PromptError),

    /// A transfer failed
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// Runs the complete download workflow.
///
/// Validates the configuration, resolves credentials, authenticates, turns
/// the configured target into a confirmed selection and hands it to the
/// downloader. Execution is strictly sequential; every stage either returns
/// a narrowed result or a terminal error.
///
/// # Arguments
///
/// * `config` - The run configuration; validated before anything else happens
/// * `server` - Media server to resolve against
/// * `prompter` - Source of interactive answers
/// * `downloader` - Transfer executor invoked after confirmation
/// * `progress` - Closure called with progress events
///
/// # Returns
///
/// `Outcome::Downloaded` after a successful transfer, `Outcome::Declined`
/// when the user answered the confirmation with anything but `y`.
pub fn run<F>(
    config: &Config,
    server: &dyn MediaServer,
    prompter: &dyn Prompter,
    downloader: &dyn Downloader,
    mut progress: F,
) -> Result<Outcome, JellyDlError>
where
    F: FnMut(ProgressEvent),
{
    config.validate()?;
    let target = config.target()?;

    let username = credentials::resolve_username(config, prompter)?;
    let password = credentials::resolve_password(config, prompter)?;

    progress(ProgressEvent::Authenticating {
        server: config.base_url.clone(),
    });
    let session = server
        .authenticate(&username, &password)
        .map_err(JellyDlError::Authentication)?;
    progress(ProgressEvent::Authenticated {
        user: session.user_name.clone(),
    });

    match &target {
        Target::Id(id) => progress(ProgressEvent::LookingUpItem { id: id.clone() }),
        Target::Name(term) => progress(ProgressEvent::Searching { term: term.clone() }),
    }

    let item = resolve::resolve_item(server, &session, &target, prompter)?;
    progress(ProgressEvent::ItemResolved {
        name: item.name.clone(),
        kind: item.kind,
    });

    match plan::route(item) {
        DownloadPlan::Series(series) => {
            progress(ProgressEvent::FetchingSeasons {
                series: series.name.clone(),
            });
            let seasons = server
                .fetch_seasons(&session, &series)
                .map_err(JellyDlError::SeasonFetch)?;
            progress(ProgressEvent::SeasonsFetched {
                series: series.name.clone(),
                season_count: seasons.len(),
            });

            let episodes =
                expand::expand_series(&seasons, config.season_id.as_deref(), prompter)?;
            progress(ProgressEvent::EpisodesSelected {
                count: episodes.len(),
            });

            if !confirm::confirm_episodes(&series.name, &episodes, prompter)? {
                return Ok(Outcome::Declined);
            }

            progress(ProgressEvent::DownloadStarted {
                count: episodes.len(),
            });
            downloader.download_episodes(&session, &episodes)?;
            progress(ProgressEvent::Complete {
                count: episodes.len(),
            });
        }
        DownloadPlan::Movie(item) => {
            progress(ProgressEvent::FetchingMovie {
                name: item.name.clone(),
            });
            let movie = server
                .fetch_movie(&session, &item)
                .map_err(JellyDlError::MovieFetch)?;

            if !confirm::confirm_movie(&movie, prompter)? {
                return Ok(Outcome::Declined);
            }

            progress(ProgressEvent::DownloadStarted { count: 1 });
            downloader.download_movie(&session, &movie)?;
            progress(ProgressEvent::Complete { count: 1 });
        }
    }

    Ok(Outcome::Downloaded)
}
