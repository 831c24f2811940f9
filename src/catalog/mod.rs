//! Data structures and traits for talking to a media server.
//!
//! This module provides the domain model for catalog resolution (items,
//! seasons, episodes, movies) together with the `MediaServer` trait that the
//! selection workflow is written against. The concrete Jellyfin client lives
//! in a submodule.
mod jellyfin;
mod jellyfin_types;

pub use jellyfin::JellyfinServer;

use thiserror::Error;

/// Errors that can occur while communicating with the media server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Request to the server failed at the transport level
    #[error("Request failed: {0}")]
    Request(String),

    /// Failed to parse the server's JSON response
    #[error("Failed to parse server response: {0}")]
    Parse(String),

    /// The server rejected the supplied credentials
    #[error("The server rejected the supplied credentials")]
    Unauthorized,

    /// The requested item does not exist on the server
    #[error("No item found for id '{0}'")]
    NotFound(String),

    /// The server returned data the client cannot work with
    #[error("Server returned invalid data: {0}")]
    InvalidData(String),
}

/// The recognized kinds of catalog items.
///
/// Anything the server reports that is not a series or a movie maps to
/// `Unknown` and is treated as a single-file download further down the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Series,
    Movie,
    Unknown,
}

impl ItemKind {
    /// Maps the server's `Type` tag onto the closed set of recognized kinds.
    pub(crate) fn from_tag(tag: &str) -> Self {
        match tag {
            "Series" => ItemKind::Series,
            "Movie" => ItemKind::Movie,
            _ => ItemKind::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Series => "Series",
            ItemKind::Movie => "Movie",
            ItemKind::Unknown => "Unknown",
        }
    }
}

/// A catalog entry as returned by search or direct-id lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Opaque identifier, unique within the server
    pub id: String,
    /// Display name
    pub name: String,
    /// Item kind used to route between the series and movie paths
    pub kind: ItemKind,
}

/// Session context established by a successful authentication.
///
/// Created once per run and read-only afterward; every subsequent server
/// call carries the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Access token for subsequent API calls
    pub token: String,
    /// Id of the authenticated user, required by user-scoped endpoints
    pub user_id: String,
    /// Display name of the authenticated user
    pub user_name: String,
}

/// A season of a series, with its episodes attached.
///
/// Invariant: every episode in `episodes` carries this season's id. The
/// grouping happens when the server response is converted, so consumers can
/// rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: String,
    pub name: String,
    /// Season ordering as reported by the server
    pub index: Option<u32>,
    pub episodes: Vec<Episode>,
}

impl Season {
    /// Label shown in the interactive season selection.
    pub(crate) fn label(&self) -> String {
        format!("{} [{} episodes]", self.name, self.episodes.len())
    }
}

/// A single downloadable episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: String,
    pub name: String,
    /// Parent series name, denormalized for display and file naming
    pub series_name: String,
    /// Id of the season this episode belongs to
    pub season_id: String,
    /// Episode ordering within the season as reported by the server
    pub index: Option<u32>,
    /// Media container reported by the server, e.g. "mkv"
    pub container: Option<String>,
}

/// A single downloadable movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: String,
    pub name: String,
    /// Media container reported by the server, e.g. "mkv"
    pub container: Option<String>,
    /// Size of the primary media source in bytes, when the server reports it
    pub size_bytes: Option<u64>,
}

/// Trait for media servers the download workflow can run against.
///
/// Implementors provide authentication, catalog lookup and search, and the
/// expansion of a series into its seasons and episodes. All calls are
/// blocking; a transport failure is terminal for the run.
pub trait MediaServer {
    /// Authenticates with the server and establishes a session.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Unauthorized` when the server rejects the
    /// credentials, or a transport/parse error.
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthSession, ServerError>;

    /// Fetches a single catalog item by its id.
    fn item_by_id(&self, session: &AuthSession, id: &str) -> Result<Item, ServerError>;

    /// Searches the catalog for series and movies matching the given text.
    ///
    /// Returns the matches in server order; an empty vector is not an error.
    fn search(&self, session: &AuthSession, term: &str) -> Result<Vec<Item>, ServerError>;

    /// Fetches all seasons of a series, each with its episodes attached in
    /// server order.
    fn fetch_seasons(&self, session: &AuthSession, series: &Item)
    -> Result<Vec<Season>, ServerError>;

    /// Fetches the download-relevant metadata of a movie item.
    fn fetch_movie(&self, session: &AuthSession, item: &Item) -> Result<Movie, ServerError>;
}
