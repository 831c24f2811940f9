use clap::Parser;
use colored::Colorize;
use jellydl::{
    Config, HttpDownloader, JellyDlError, JellyfinServer, Outcome, ProgressEvent, ResolveError,
    TerminalPrompter,
};
use std::process;

/// Interactively resolve and bulk download movies and series from a
/// Jellyfin instance.
#[derive(Debug, Parser)]
#[command(name = "jellydl", version, about)]
struct Cli {
    /// Base URL pointing to the Jellyfin instance, e.g. https://media.example.org:8096
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Id of the series or movie to download; takes precedence over --name
    #[arg(long, value_name = "ID")]
    series_id: Option<String>,

    /// Only download the episodes belonging to the season with this id
    #[arg(long, value_name = "ID")]
    season_id: Option<String>,

    /// Username for the Jellyfin instance; falls back to JF_USERNAME or a prompt
    #[arg(long, value_name = "NAME")]
    username: Option<String>,

    /// Password for the Jellyfin instance; falls back to JF_PASSWORD or a hidden prompt
    #[arg(long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Name of the show or movie to search for
    #[arg(long, value_name = "NAME")]
    name: Option<String>,
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Authenticating { server } => {
            println!("Logging in to {}...", server);
        }
        ProgressEvent::Authenticated { user } => {
            println!("Logged in as {}.\n", user);
        }
        ProgressEvent::LookingUpItem { id } => {
            println!("Looking up item {}...", id);
        }
        ProgressEvent::Searching { term } => {
            println!("Searching for '{}'...", term);
        }
        ProgressEvent::ItemResolved { name, kind } => {
            println!("Resolved '{}' ({}).\n", name, kind.label());
        }
        ProgressEvent::FetchingSeasons { series } => {
            println!("Fetching episode information for '{}'...", series);
        }
        ProgressEvent::SeasonsFetched {
            series,
            season_count,
        } => {
            println!("Found {} season(s) for '{}'.\n", season_count, series);
        }
        ProgressEvent::EpisodesSelected { count } => {
            println!("Selected {} episode(s).\n", count);
        }
        ProgressEvent::FetchingMovie { name } => {
            println!("Fetching movie information for '{}'...", name);
        }
        ProgressEvent::DownloadStarted { count } => {
            println!("\nStarting download of {} file(s)...", count);
        }
        ProgressEvent::Complete { count } => {
            println!("\nDownload complete. {} file(s) saved.", count);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = Config {
        base_url: cli.url.unwrap_or_default(),
        series_id: cli.series_id,
        season_id: cli.season_id,
        username: cli.username,
        password: cli.password,
        name: cli.name,
    };

    let server = JellyfinServer::new(&config.base_url);
    let downloader = HttpDownloader::new(&config.base_url);
    let prompter = TerminalPrompter::new();

    match jellydl::run(
        &config,
        &server,
        &prompter,
        &downloader,
        handle_progress_event,
    ) {
        Ok(Outcome::Downloaded) => {}
        Ok(Outcome::Declined) => {
            println!("{}", "Download aborted.".yellow());
            process::exit(1);
        }
        Err(JellyDlError::Resolve(ResolveError::NoMatches { term })) => {
            eprintln!(
                "{}",
                format!("Did not find anything for '{}' on the server.", term).yellow()
            );
            process::exit(1);
        }
        Err(error) => {
            eprintln!("{}", error.to_string().red());
            process::exit(1);
        }
    }
}
