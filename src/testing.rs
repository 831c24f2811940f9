//! Scripted fakes for the interactive and network seams, shared by the
//! module tests and the end-to-end workflow tests.

use crate::catalog::{
    AuthSession, Episode, Item, ItemKind, MediaServer, Movie, Season, ServerError,
};
use crate::download::{DownloadError, Downloader};
use crate::prompt::{PromptError, Prompter};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

/// Builds an established session without going through authentication.
pub(crate) fn session() -> AuthSession {
    AuthSession {
        token: "test-token".to_string(),
        user_id: "user-1".to_string(),
        user_name: "tester".to_string(),
    }
}

pub(crate) fn item(id: &str, name: &str, kind: ItemKind) -> Item {
    Item {
        id: id.to_string(),
        name: name.to_string(),
        kind,
    }
}

pub(crate) fn episode(id: &str, name: &str, season_id: &str) -> Episode {
    Episode {
        id: id.to_string(),
        name: name.to_string(),
        series_name: "The Show".to_string(),
        season_id: season_id.to_string(),
        index: None,
        container: None,
    }
}

pub(crate) fn season(id: &str, name: &str, episodes: Vec<Episode>) -> Season {
    Season {
        id: id.to_string(),
        name: name.to_string(),
        index: None,
        episodes,
    }
}

/// Prompter that replays scripted answers. Running out of script while a
/// prompt is still asked panics, which doubles as the assertion that no
/// unexpected prompt was shown.
pub(crate) struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<Vec<usize>>>,
}

impl ScriptedPrompter {
    pub(crate) fn new() -> Self {
        Self {
            inputs: RefCell::new(VecDeque::new()),
            selections: RefCell::new(VecDeque::new()),
        }
    }

    /// Queues one line of input, served to `input`, `secret` and
    /// `choose_one` alike.
    pub(crate) fn push_input(&self, line: &str) {
        self.inputs.borrow_mut().push_back(line.to_string());
    }

    /// Queues one multi-selection answer.
    pub(crate) fn push_selection(&self, indices: &[usize]) {
        self.selections.borrow_mut().push_back(indices.to_vec());
    }

    fn next_input(&self) -> String {
        self.inputs
            .borrow_mut()
            .pop_front()
            .expect("prompt shown but no scripted input left")
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _prompt: &str) -> Result<String, PromptError> {
        Ok(self.next_input())
    }

    fn secret(&self, _prompt: &str) -> Result<String, PromptError> {
        Ok(self.next_input())
    }

    fn choose_one(&self, _heading: &str, _options: &[String]) -> Result<String, PromptError> {
        Ok(self.next_input())
    }

    fn choose_many(&self, _heading: &str, _options: &[String]) -> Result<Vec<usize>, PromptError> {
        Ok(self
            .selections
            .borrow_mut()
            .pop_front()
            .expect("multi-selection shown but no scripted selection left"))
    }
}

/// Media server fake serving canned catalog data.
#[derive(Default)]
pub(crate) struct FakeServer {
    /// Items found by direct-id lookup
    pub(crate) items: HashMap<String, Item>,
    /// Items returned for any search term
    pub(crate) search_results: Vec<Item>,
    /// Seasons returned for any series
    pub(crate) seasons: Vec<Season>,
    /// Movie returned for any movie fetch
    pub(crate) movie: Option<Movie>,
    /// When true, authentication is rejected
    pub(crate) reject_credentials: bool,
}

impl MediaServer for FakeServer {
    fn authenticate(&self, username: &str, _password: &str) -> Result<AuthSession, ServerError> {
        if self.reject_credentials {
            return Err(ServerError::Unauthorized);
        }
        Ok(AuthSession {
            token: "test-token".to_string(),
            user_id: "user-1".to_string(),
            user_name: username.to_string(),
        })
    }

    fn item_by_id(&self, _session: &AuthSession, id: &str) -> Result<Item, ServerError> {
        self.items
            .get(id)
            .cloned()
            .ok_or_else(|| ServerError::NotFound(id.to_string()))
    }

    fn search(&self, _session: &AuthSession, _term: &str) -> Result<Vec<Item>, ServerError> {
        Ok(self.search_results.clone())
    }

    fn fetch_seasons(
        &self,
        _session: &AuthSession,
        _series: &Item,
    ) -> Result<Vec<Season>, ServerError> {
        Ok(self.seasons.clone())
    }

    fn fetch_movie(&self, _session: &AuthSession, item: &Item) -> Result<Movie, ServerError> {
        self.movie
            .clone()
            .ok_or_else(|| ServerError::NotFound(item.id.clone()))
    }
}

/// Downloader fake that records what it was asked to transfer.
#[derive(Default)]
pub(crate) struct RecordingDownloader {
    pub(crate) episode_batches: RefCell<Vec<Vec<Episode>>>,
    pub(crate) movies: RefCell<Vec<Movie>>,
}

impl Downloader for RecordingDownloader {
    fn download_episodes(
        &self,
        _session: &AuthSession,
        episodes: &[Episode],
    ) -> Result<(), DownloadError> {
        self.episode_batches.borrow_mut().push(episodes.to_vec());
        Ok(())
    }

    fn download_movie(&self, _session: &AuthSession, movie: &Movie) -> Result<(), DownloadError> {
        self.movies.borrow_mut().push(movie.clone());
        Ok(())
    }
}
