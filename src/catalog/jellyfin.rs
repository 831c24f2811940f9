/// Jellyfin media server client implementation.
use super::jellyfin_types::{AuthenticationResult, ItemDto, ItemsPage};
use super::{AuthSession, Episode, Item, ItemKind, MediaServer, Movie, Season, ServerError};

/// Client identification sent with the authentication handshake.
const CLIENT_NAME: &str = "jellydl";
const DEVICE_NAME: &str = "cli";
const DEVICE_ID: &str = "jellydl-cli";

/// Header carrying the session token on authenticated requests.
const TOKEN_HEADER: &str = "X-Emby-Token";

/// Media server client for a Jellyfin instance.
///
/// Talks to the Jellyfin REST API using blocking HTTP requests. One client
/// is constructed per run and holds no state beyond the base URL; the
/// session token is passed in explicitly with every call.
pub struct JellyfinServer {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl JellyfinServer {
    /// Creates a new client for the Jellyfin instance at the given base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Converts a Jellyfin item to our internal Item structure.
    fn convert_item(dto: ItemDto) -> Item {
        Item {
            id: dto.id,
            name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
            kind: dto
                .kind
                .as_deref()
                .map(ItemKind::from_tag)
                .unwrap_or(ItemKind::Unknown),
        }
    }

    /// Builds the season list of a series from the raw season and episode
    /// pages.
    ///
    /// Seasons keep their server order; each episode is attached to the
    /// season its `SeasonId` names, preserving the episode order within the
    /// page. Episodes pointing at a season the listing does not contain are
    /// dropped.
    fn assemble_seasons(
        series_name: &str,
        season_dtos: Vec<ItemDto>,
        episode_dtos: Vec<ItemDto>,
    ) -> Vec<Season> {
        let mut seasons: Vec<Season> = season_dtos
            .into_iter()
            .map(|dto| Season {
                id: dto.id,
                name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
                index: dto.index_number,
                episodes: Vec::new(),
            })
            .collect();

        for dto in episode_dtos {
            let Some(season_id) = dto.season_id else {
                continue;
            };
            if let Some(season) = seasons.iter_mut().find(|season| season.id == season_id) {
                season.episodes.push(Episode {
                    id: dto.id,
                    name: dto.name.unwrap_or_else(|| "Unknown".to_string()),
                    series_name: dto
                        .series_name
                        .unwrap_or_else(|| series_name.to_string()),
                    season_id,
                    index: dto.index_number,
                    container: dto.container,
                });
            }
        }

        seasons
    }

    /// Performs an authenticated GET request and deserializes the item page
    /// it returns.
    fn get_items_page(
        &self,
        session: &AuthSession,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ItemsPage, ServerError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &session.token)
            .query(query)
            .send()
            .map_err(|e| ServerError::Request(e.to_string()))?;

        if response.status() == 401 {
            return Err(ServerError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(ServerError::Request(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json()
            .map_err(|e| ServerError::Parse(e.to_string()))
    }
}

impl MediaServer for JellyfinServer {
    fn authenticate(&self, username: &str, password: &str) -> Result<AuthSession, ServerError> {
        let url = format!("{}/Users/AuthenticateByName", self.base_url);

        let authorization = format!(
            "MediaBrowser Client=\"{}\", Device=\"{}\", DeviceId=\"{}\", Version=\"{}\"",
            CLIENT_NAME,
            DEVICE_NAME,
            DEVICE_ID,
            env!("CARGO_PKG_VERSION")
        );

        let response = self
            .client
            .post(&url)
            .header("X-Emby-Authorization", authorization)
            .json(&serde_json::json!({ "Username": username, "Pw": password }))
            .send()
            .map_err(|e| ServerError::Request(e.to_string()))?;

        // Jellyfin answers both 401 and 403 for rejected credentials.
        if response.status() == 401 || response.status() == 403 {
            return Err(ServerError::Unauthorized);
        }

        if !response.status().is_success() {
            return Err(ServerError::Request(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let auth: AuthenticationResult = response
            .json()
            .map_err(|e| ServerError::Parse(e.to_string()))?;

        Ok(AuthSession {
            token: auth.access_token,
            user_id: auth.user.id,
            user_name: auth.user.name,
        })
    }

    fn item_by_id(&self, session: &AuthSession, id: &str) -> Result<Item, ServerError> {
        let url = format!("{}/Users/{}/Items/{}", self.base_url, session.user_id, id);

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &session.token)
            .send()
            .map_err(|e| ServerError::Request(e.to_string()))?;

        if response.status() == 401 {
            return Err(ServerError::Unauthorized);
        }

        // An unknown id answers 404 on current servers and 400 on older ones.
        if response.status() == 404 || response.status() == 400 {
            return Err(ServerError::NotFound(id.to_string()));
        }

        if !response.status().is_success() {
            return Err(ServerError::Request(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let dto: ItemDto = response
            .json()
            .map_err(|e| ServerError::Parse(e.to_string()))?;

        Ok(Self::convert_item(dto))
    }

    fn search(&self, session: &AuthSession, term: &str) -> Result<Vec<Item>, ServerError> {
        let page = self.get_items_page(
            session,
            "/Items",
            &[
                ("searchTerm", term),
                ("Recursive", "true"),
                ("IncludeItemTypes", "Series,Movie"),
                ("userId", &session.user_id),
            ],
        )?;

        Ok(page.items.into_iter().map(Self::convert_item).collect())
    }

    fn fetch_seasons(
        &self,
        session: &AuthSession,
        series: &Item,
    ) -> Result<Vec<Season>, ServerError> {
        let seasons_path = format!("/Shows/{}/Seasons", series.id);
        let episodes_path = format!("/Shows/{}/Episodes", series.id);

        let season_page =
            self.get_items_page(session, &seasons_path, &[("userId", &session.user_id)])?;
        let episode_page =
            self.get_items_page(session, &episodes_path, &[("userId", &session.user_id)])?;

        Ok(Self::assemble_seasons(
            &series.name,
            season_page.items,
            episode_page.items,
        ))
    }

    fn fetch_movie(&self, session: &AuthSession, item: &Item) -> Result<Movie, ServerError> {
        let url = format!(
            "{}/Users/{}/Items/{}",
            self.base_url, session.user_id, item.id
        );

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &session.token)
            .query(&[("fields", "MediaSources")])
            .send()
            .map_err(|e| ServerError::Request(e.to_string()))?;

        if response.status() == 401 {
            return Err(ServerError::Unauthorized);
        }

        if response.status() == 404 || response.status() == 400 {
            return Err(ServerError::NotFound(item.id.clone()));
        }

        if !response.status().is_success() {
            return Err(ServerError::Request(format!(
                "HTTP {} {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let dto: ItemDto = response
            .json()
            .map_err(|e| ServerError::Parse(e.to_string()))?;

        let source = dto
            .media_sources
            .as_ref()
            .and_then(|sources| sources.first());

        Ok(Movie {
            name: dto.name.unwrap_or_else(|| item.name.clone()),
            container: dto
                .container
                .or_else(|| source.and_then(|s| s.container.clone())),
            size_bytes: source.and_then(|s| s.size),
            id: dto.id,
        })
    }
}
