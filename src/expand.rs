//! Series expansion.
//!
//! Turns a series plus an optional season constraint into the ordered list
//! of episodes to download. With an explicit season id the season is looked
//! up directly; without one the user picks any number of seasons
//! interactively. Season order and within-season episode order are
//! preserved either way.

use crate::catalog::{Episode, Season};
use crate::prompt::{PromptError, Prompter};
use thiserror::Error;

/// Errors that can occur while expanding a series into episodes.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The explicitly requested season id does not exist in this series
    #[error("No season with id '{season_id}' exists for this series")]
    SeasonNotFound { season_id: String },

    /// The selection produced no episodes to download
    #[error("No episodes were selected")]
    EmptySelection,

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Expands a series' seasons into the candidate download set.
///
/// The result is guaranteed non-empty; selecting nothing (or a season
/// without episodes) fails with `EmptySelection` before any download is
/// attempted.
pub fn expand_series(
    seasons: &[Season],
    season_id: Option<&str>,
    prompter: &dyn Prompter,
) -> Result<Vec<Episode>, ExpandError> {
    let selected: Vec<&Season> = match season_id {
        Some(id) => {
            let season = seasons
                .iter()
                .find(|season| season.id == id)
                .ok_or_else(|| ExpandError::SeasonNotFound {
                    season_id: id.to_string(),
                })?;
            vec![season]
        }
        None => {
            let labels: Vec<String> = seasons.iter().map(Season::label).collect();
            let chosen =
                prompter.choose_many("Select the seasons you want to download", &labels)?;

            // Iterate the seasons, not the chosen indices, so the season
            // order survives whatever order the selection reports.
            seasons
                .iter()
                .enumerate()
                .filter(|(index, _)| chosen.contains(index))
                .map(|(_, season)| season)
                .collect()
        }
    };

    let episodes: Vec<Episode> = selected
        .iter()
        .flat_map(|season| season.episodes.iter().cloned())
        .collect();

    if episodes.is_empty() {
        return Err(ExpandError::EmptySelection);
    }

    Ok(episodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{episode, season, ScriptedPrompter};

    fn sample_seasons() -> Vec<Season> {
        vec![
            season(
                "s1",
                "Season 1",
                vec![episode("e1", "Pilot", "s1"), episode("e2", "Fallout", "s1")],
            ),
            season("s2", "Season 2", vec![episode("e3", "Return", "s2")]),
            season("s3", "Season 3", vec![episode("e4", "Finale", "s3")]),
        ]
    }

    #[test]
    fn test_explicit_season_id_selects_only_that_season() {
        let seasons = sample_seasons();
        let prompter = ScriptedPrompter::new();

        let episodes = expand_series(&seasons, Some("s1"), &prompter).unwrap();

        assert_eq!(episodes.len(), 2);
        assert!(episodes.iter().all(|episode| episode.season_id == "s1"));
        assert_eq!(episodes[0].id, "e1");
        assert_eq!(episodes[1].id, "e2");
    }

    #[test]
    fn test_unknown_season_id_fails() {
        let seasons = sample_seasons();
        let prompter = ScriptedPrompter::new();

        let result = expand_series(&seasons, Some("s9"), &prompter);

        assert!(matches!(
            result,
            Err(ExpandError::SeasonNotFound { season_id }) if season_id == "s9"
        ));
    }

    #[test]
    fn test_multi_selection_preserves_season_order() {
        let seasons = sample_seasons();
        let prompter = ScriptedPrompter::new();
        // Selection reported out of order; the result must still follow the
        // season order.
        prompter.push_selection(&[2, 0]);

        let episodes = expand_series(&seasons, None, &prompter).unwrap();

        let ids: Vec<&str> = episodes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e2", "e4"]);
    }

    #[test]
    fn test_empty_multi_selection_fails() {
        let seasons = sample_seasons();
        let prompter = ScriptedPrompter::new();
        prompter.push_selection(&[]);

        let result = expand_series(&seasons, None, &prompter);

        assert!(matches!(result, Err(ExpandError::EmptySelection)));
    }

    #[test]
    fn test_explicit_season_without_episodes_fails() {
        let seasons = vec![season("s1", "Season 1", Vec::new())];
        let prompter = ScriptedPrompter::new();

        let result = expand_series(&seasons, Some("s1"), &prompter);

        assert!(matches!(result, Err(ExpandError::EmptySelection)));
    }
}
