//! Catalog resolution.
//!
//! Turns the user's target (a direct id or a free-text search term) into
//! exactly one catalog item. Search results are disambiguated through a
//! single-shot numeric selection: an invalid selection is a terminal error
//! for the run, there is no retry loop.

use crate::catalog::{AuthSession, Item, MediaServer, ServerError};
use crate::config::Target;
use crate::prompt::{PromptError, Prompter};
use thiserror::Error;

/// Errors that can occur while resolving a target to a catalog item.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Direct-id lookup failed
    #[error("Failed to look up item '{id}': {source}")]
    Lookup { id: String, source: ServerError },

    /// The search call itself failed
    #[error("Search for '{term}' failed: {source}")]
    Search { term: String, source: ServerError },

    /// The search returned no results
    #[error("Did not find anything for '{term}' on the server")]
    NoMatches { term: String },

    /// The selection input was not a number
    #[error("Only provide a single number, got '{input}'")]
    InvalidSelectionFormat { input: String },

    /// The selection number was outside the listed range
    #[error("Selection {selection} is out of range, expected a number between 1 and {count}")]
    InvalidSelectionRange { selection: usize, count: usize },

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Resolves the configured target to exactly one catalog item.
///
/// A direct id is looked up as-is. A search term is resolved by result
/// count: zero results fail, a sole result is taken without prompting, and
/// multiple results are enumerated for a numeric selection.
pub fn resolve_item(
    server: &dyn MediaServer,
    session: &AuthSession,
    target: &Target,
    prompter: &dyn Prompter,
) -> Result<Item, ResolveError> {
    match target {
        Target::Id(id) => server
            .item_by_id(session, id)
            .map_err(|source| ResolveError::Lookup {
                id: id.clone(),
                source,
            }),
        Target::Name(term) => {
            let mut matches =
                server
                    .search(session, term)
                    .map_err(|source| ResolveError::Search {
                        term: term.clone(),
                        source,
                    })?;

            match matches.len() {
                0 => Err(ResolveError::NoMatches { term: term.clone() }),
                1 => Ok(matches.remove(0)),
                _ => {
                    let options: Vec<String> =
                        matches.iter().map(|item| item.name.clone()).collect();
                    let line = prompter.choose_one(
                        "Found multiple shows for the given search term. Please select the one you want to download:",
                        &options,
                    )?;
                    let index = parse_selection(&line, matches.len())?;
                    Ok(matches.remove(index))
                }
            }
        }
    }
}

/// Parses a 1-based selection over `count` listed entries and returns the
/// 0-based index.
///
/// The bounds are strict: 0 is rejected along with everything above
/// `count`. Input is trimmed before parsing; anything that is not a plain
/// number is a format error.
fn parse_selection(input: &str, count: usize) -> Result<usize, ResolveError> {
    let trimmed = input.trim();

    let selection: usize =
        trimmed
            .parse()
            .map_err(|_| ResolveError::InvalidSelectionFormat {
                input: trimmed.to_string(),
            })?;

    if selection < 1 || selection > count {
        return Err(ResolveError::InvalidSelectionRange { selection, count });
    }

    Ok(selection - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemKind;
    use crate::testing::{item, session, FakeServer, ScriptedPrompter};

    #[test]
    fn test_parse_selection_accepts_full_range() {
        assert_eq!(parse_selection("1", 3).unwrap(), 0);
        assert_eq!(parse_selection("3", 3).unwrap(), 2);
        assert_eq!(parse_selection(" 2 ", 3).unwrap(), 1);
    }

    #[test]
    fn test_parse_selection_rejects_zero() {
        // The range check is strict: 0 would index before the first entry.
        assert!(matches!(
            parse_selection("0", 3),
            Err(ResolveError::InvalidSelectionRange {
                selection: 0,
                count: 3
            })
        ));
    }

    #[test]
    fn test_parse_selection_rejects_above_count() {
        assert!(matches!(
            parse_selection("4", 3),
            Err(ResolveError::InvalidSelectionRange {
                selection: 4,
                count: 3
            })
        ));
    }

    #[test]
    fn test_parse_selection_rejects_non_numeric_input() {
        assert!(matches!(
            parse_selection("two", 3),
            Err(ResolveError::InvalidSelectionFormat { .. })
        ));
        assert!(matches!(
            parse_selection("-1", 3),
            Err(ResolveError::InvalidSelectionFormat { .. })
        ));
        assert!(matches!(
            parse_selection("", 3),
            Err(ResolveError::InvalidSelectionFormat { .. })
        ));
    }

    #[test]
    fn test_direct_id_lookup_bypasses_search() {
        let mut server = FakeServer::default();
        server
            .items
            .insert("i1".to_string(), item("i1", "The Show", ItemKind::Series));
        let prompter = ScriptedPrompter::new();

        let resolved = resolve_item(
            &server,
            &session(),
            &Target::Id("i1".to_string()),
            &prompter,
        )
        .unwrap();

        assert_eq!(resolved.name, "The Show");
    }

    #[test]
    fn test_unknown_id_fails_with_lookup_error() {
        let server = FakeServer::default();
        let prompter = ScriptedPrompter::new();

        let result = resolve_item(
            &server,
            &session(),
            &Target::Id("missing".to_string()),
            &prompter,
        );

        assert!(matches!(result, Err(ResolveError::Lookup { .. })));
    }

    #[test]
    fn test_empty_search_fails_with_no_matches() {
        let server = FakeServer::default();
        // An empty prompter doubles as the assertion that no prompt is shown.
        let prompter = ScriptedPrompter::new();

        let result = resolve_item(
            &server,
            &session(),
            &Target::Name("nothing".to_string()),
            &prompter,
        );

        assert!(matches!(result, Err(ResolveError::NoMatches { .. })));
    }

    #[test]
    fn test_sole_search_result_is_taken_without_prompting() {
        let mut server = FakeServer::default();
        server
            .search_results
            .push(item("i1", "The Show", ItemKind::Series));
        let prompter = ScriptedPrompter::new();

        let resolved = resolve_item(
            &server,
            &session(),
            &Target::Name("show".to_string()),
            &prompter,
        )
        .unwrap();

        assert_eq!(resolved.id, "i1");
    }

    #[test]
    fn test_numeric_selection_picks_the_listed_entry() {
        let mut server = FakeServer::default();
        server.search_results = vec![
            item("i1", "First", ItemKind::Series),
            item("i2", "Second", ItemKind::Movie),
            item("i3", "Third", ItemKind::Series),
        ];
        let prompter = ScriptedPrompter::new();
        prompter.push_input("2");

        let resolved = resolve_item(
            &server,
            &session(),
            &Target::Name("show".to_string()),
            &prompter,
        )
        .unwrap();

        assert_eq!(resolved.id, "i2");
    }

    #[test]
    fn test_invalid_selection_is_terminal() {
        let mut server = FakeServer::default();
        server.search_results = vec![
            item("i1", "First", ItemKind::Series),
            item("i2", "Second", ItemKind::Movie),
        ];
        let prompter = ScriptedPrompter::new();
        prompter.push_input("nope");

        let result = resolve_item(
            &server,
            &session(),
            &Target::Name("show".to_string()),
            &prompter,
        );

        assert!(matches!(
            result,
            Err(ResolveError::InvalidSelectionFormat { .. })
        ));
    }
}
