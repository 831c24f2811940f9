//! Confirmation gate.
//!
//! Renders a summary of what is about to be downloaded and asks a
//! single-shot `Continue? (y/n)` question. Only an exact `y` (after
//! trimming and case-folding) counts as consent; everything else, including
//! empty input, declines.

use crate::catalog::{Episode, Movie};
use crate::prompt::{PromptError, Prompter};
use humansize::{DECIMAL, format_size};

/// Returns true only for the exact affirmative token.
fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

/// Renders the deterministic episode listing shown before a series
/// download: series name first, then each episode enumerated in download
/// order.
fn render_episode_summary(series_name: &str, episodes: &[Episode]) -> String {
    let mut summary = format!(
        "The following {} episode(s) of '{}' will be downloaded:\n",
        episodes.len(),
        series_name
    );
    for (index, episode) in episodes.iter().enumerate() {
        summary.push_str(&format!("  {}. {}\n", index + 1, episode.name));
    }
    summary
}

/// Renders the one-line summary shown before a movie download.
fn render_movie_summary(movie: &Movie) -> String {
    match movie.size_bytes {
        Some(size) => format!(
            "The movie '{}' ({}) will be downloaded.\n",
            movie.name,
            format_size(size, DECIMAL)
        ),
        None => format!("The movie '{}' will be downloaded.\n", movie.name),
    }
}

/// Shows the episode summary and asks for confirmation.
pub(crate) fn confirm_episodes(
    series_name: &str,
    episodes: &[Episode],
    prompter: &dyn Prompter,
) -> Result<bool, PromptError> {
    print!("{}", render_episode_summary(series_name, episodes));
    let response = prompter.input("Continue? (y/n)")?;
    Ok(is_affirmative(&response))
}

/// Shows the movie summary and asks for confirmation.
pub(crate) fn confirm_movie(movie: &Movie, prompter: &dyn Prompter) -> Result<bool, PromptError> {
    print!("{}", render_movie_summary(movie));
    let response = prompter.input("Continue? (y/n)")?;
    Ok(is_affirmative(&response))
}
