/// Jellyfin API response types for deserialization.
///
/// These structures mirror the JSON response format of the Jellyfin REST
/// API. Only the fields the client actually reads are declared.
use serde::Deserialize;

/// Response of the `/Users/AuthenticateByName` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct AuthenticationResult {
    /// Token to authenticate subsequent API calls with
    pub access_token: String,
    /// The user the session was established for
    pub user: AuthenticatedUser,
}

/// The user object embedded in an authentication response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct AuthenticatedUser {
    pub id: String,
    pub name: String,
}

/// A paged list of items, as returned by `/Items`, `/Shows/{id}/Seasons`
/// and `/Shows/{id}/Episodes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ItemsPage {
    pub items: Vec<ItemDto>,
}

/// A catalog item. Jellyfin uses one item shape for series, seasons,
/// episodes and movies alike; which fields are populated depends on the
/// endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct ItemDto {
    pub id: String,
    /// Display name (may be null for unnamed entries)
    pub name: Option<String>,
    /// Item type tag, e.g. "Series", "Movie", "Season", "Episode"
    #[serde(rename = "Type")]
    pub kind: Option<String>,
    /// Ordering within the parent (season number, episode number)
    pub index_number: Option<u32>,
    /// Media container, e.g. "mkv"
    pub container: Option<String>,
    /// Name of the parent series, present on episode items
    pub series_name: Option<String>,
    /// Id of the parent season, present on episode items
    pub season_id: Option<String>,
    /// Media sources, present when requested via the `fields` parameter
    pub media_sources: Option<Vec<MediaSourceDto>>,
}

/// A media source attached to an item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct MediaSourceDto {
    pub container: Option<String>,
    pub size: Option<u64>,
}
