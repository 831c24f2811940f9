//! Routing of a resolved item onto the series or movie path.

use crate::catalog::{Item, ItemKind};

/// The expansion path a resolved item takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadPlan {
    /// Expand the series into seasons and episodes
    Series(Item),
    /// Download the item as a single file
    Movie(Item),
}

/// Routes an item by its kind. Only series get the expansion path; movies
/// and unrecognized kinds are treated as a single-file download.
pub fn route(item: Item) -> DownloadPlan {
    match item.kind {
        ItemKind::Series => DownloadPlan::Series(item),
        ItemKind::Movie | ItemKind::Unknown => DownloadPlan::Movie(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::item;

    #[test]
    fn test_series_routes_to_series_path() {
        let plan = route(item("i1", "A Show", ItemKind::Series));
        assert!(matches!(plan, DownloadPlan::Series(_)));
    }

    #[test]
    fn test_movie_routes_to_movie_path() {
        let plan = route(item("i1", "A Movie", ItemKind::Movie));
        assert!(matches!(plan, DownloadPlan::Movie(_)));
    }

    #[test]
    fn test_unknown_kind_routes_to_movie_path() {
        let plan = route(item("i1", "Odd Entry", ItemKind::Unknown));
        assert!(matches!(plan, DownloadPlan::Movie(_)));
    }
}
