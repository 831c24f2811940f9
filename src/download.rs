//! Download execution.
//!
//! Streams confirmed media files from the server to the current working
//! directory, one after the other. Each file is written to a `.tmp` sibling
//! first and renamed once the stream ends, so an interrupted transfer never
//! leaves a file that looks complete. No retries; the first failure is
//! terminal for the run.

use crate::catalog::{AuthSession, Episode, Movie};
use humansize::{DECIMAL, format_size};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Container used when the server does not report one.
const DEFAULT_CONTAINER: &str = "mkv";

/// Errors that can occur while downloading media files.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The download request could not be sent
    #[error("Failed to request '{name}': {source}")]
    Request { name: String, source: reqwest::Error },

    /// The server answered with a non-success status
    #[error("HTTP {status} while downloading '{name}'")]
    HttpStatus { name: String, status: u16 },

    /// Reading from the download stream failed mid-transfer
    #[error("Transfer of '{name}' failed: {source}")]
    Transfer { name: String, source: io::Error },

    /// Writing to the local file failed
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// The stream ended without delivering any data
    #[error("Download of '{name}' ended with an empty file")]
    Incomplete { name: String },
}

/// Trait for the component that performs the actual file transfer.
///
/// The workflow only calls this with a non-empty, confirmed selection and
/// treats the result as terminal.
pub trait Downloader {
    /// Downloads the given episodes in order.
    fn download_episodes(
        &self,
        session: &AuthSession,
        episodes: &[Episode],
    ) -> Result<(), DownloadError>;

    /// Downloads a single movie.
    fn download_movie(&self, session: &AuthSession, movie: &Movie) -> Result<(), DownloadError>;
}

/// Downloader that streams files over HTTP from the media server.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpDownloader {
    /// Creates a downloader for the media server at the given base URL.
    /// Files are written to the current working directory.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn download_url(&self, session: &AuthSession, item_id: &str) -> String {
        format!(
            "{}/Items/{}/Download?api_key={}",
            self.base_url, item_id, session.token
        )
    }

    /// Streams one file to disk.
    ///
    /// Downloads into `<file_name>.tmp` in 8 KiB chunks, printing progress
    /// every 10% when the server reports a length, then renames to the
    /// final name.
    fn fetch_to_disk(&self, url: &str, file_name: &str) -> Result<(), DownloadError> {
        let mut response =
            self.client
                .get(url)
                .send()
                .map_err(|source| DownloadError::Request {
                    name: file_name.to_string(),
                    source,
                })?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus {
                name: file_name.to_string(),
                status: response.status().as_u16(),
            });
        }

        let total_size = response.content_length();
        if let Some(total) = total_size {
            println!("  Size: {}", format_size(total, DECIMAL));
        }

        let temp_path = PathBuf::from(format!("{file_name}.tmp"));
        let mut file = fs::File::create(&temp_path).map_err(|source| DownloadError::Write {
            path: temp_path.clone(),
            source,
        })?;

        print!("  Progress: ");
        io::stdout().flush().ok();

        let mut downloaded: u64 = 0;
        let mut buffer = [0u8; 8192];
        let mut last_progress_percent = 0;

        loop {
            let bytes_read =
                response
                    .read(&mut buffer)
                    .map_err(|source| DownloadError::Transfer {
                        name: file_name.to_string(),
                        source,
                    })?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read])
                .map_err(|source| DownloadError::Write {
                    path: temp_path.clone(),
                    source,
                })?;

            downloaded += bytes_read as u64;

            if let Some(total) = total_size.filter(|total| *total > 0) {
                let progress_percent = (downloaded * 100 / total) as u32;
                if progress_percent >= last_progress_percent + 10 {
                    print!("{}% ", progress_percent);
                    io::stdout().flush().ok();
                    last_progress_percent = progress_percent;
                }
            }
        }

        println!("done");

        if downloaded == 0 {
            let _ = fs::remove_file(&temp_path);
            return Err(DownloadError::Incomplete {
                name: file_name.to_string(),
            });
        }

        fs::rename(&temp_path, file_name).map_err(|source| DownloadError::Write {
            path: PathBuf::from(file_name),
            source,
        })?;

        println!("  Saved as: {}", file_name);

        Ok(())
    }
}

impl Downloader for HttpDownloader {
    fn download_episodes(
        &self,
        session: &AuthSession,
        episodes: &[Episode],
    ) -> Result<(), DownloadError> {
        for (index, episode) in episodes.iter().enumerate() {
            println!(
                "[{}/{}] Downloading: {}",
                index + 1,
                episodes.len(),
                episode.name
            );
            let url = self.download_url(session, &episode.id);
            self.fetch_to_disk(&url, &episode_file_name(episode))?;
        }

        Ok(())
    }

    fn download_movie(&self, session: &AuthSession, movie: &Movie) -> Result<(), DownloadError> {
        println!("Downloading: {}", movie.name);
        let url = self.download_url(session, &movie.id);
        self.fetch_to_disk(&url, &movie_file_name(movie))
    }
}

/// Builds the local file name for an episode: series and episode title,
/// sanitized, with the reported container as extension.
fn episode_file_name(episode: &Episode) -> String {
    let container = episode.container.as_deref().unwrap_or(DEFAULT_CONTAINER);
    format!(
        "{} - {}.{}",
        sanitize_filename(&episode.series_name),
        sanitize_filename(&episode.name),
        container
    )
}

/// Builds the local file name for a movie.
fn movie_file_name(movie: &Movie) -> String {
    let container = movie.container.as_deref().unwrap_or(DEFAULT_CONTAINER);
    format!("{}.{}", sanitize_filename(&movie.name), container)
}

/// Sanitizes a string for use in filenames by replacing problematic
/// characters
///
/// Replaces characters that are invalid or problematic in filenames across
/// platforms:
/// - Path separators: / \
/// - Reserved characters: : * ? " < > |
/// - Control characters
/// - Trim leading/trailing whitespace and dots
fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    sanitized
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}
