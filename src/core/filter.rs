//! Pure derivation of the visible subset of the catalog.
//!
//! Recomputed from scratch on every render, never cached. The tri-state
//! output distinguishes "nothing fetched yet" from "fetched but nothing
//! matches", because only the latter shows the no-match message.

use crate::api::CatalogItem;

/// Result of filtering the accumulated items by the search term.
#[derive(Debug, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    /// No items have been loaded yet. Suppresses the no-match message.
    NoData,
    /// Items exist but none match the term.
    NoMatch,
    /// Matching items, paired with their catalog index (poster state is
    /// keyed positionally) and in original order.
    Matches(Vec<(usize, &'a CatalogItem)>),
}

/// Case-insensitive substring filter. An empty term matches everything.
pub fn filter_items<'a>(items: &'a [CatalogItem], search_term: &str) -> FilterOutcome<'a> {
    if items.is_empty() {
        return FilterOutcome::NoData;
    }

    let needle = search_term.to_lowercase();
    let matches: Vec<(usize, &CatalogItem)> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.name.to_lowercase().contains(&needle))
        .collect();

    if matches.is_empty() {
        FilterOutcome::NoMatch
    } else {
        FilterOutcome::Matches(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::items;

    fn names(outcome: &FilterOutcome) -> Vec<String> {
        match outcome {
            FilterOutcome::Matches(pairs) => {
                pairs.iter().map(|(_, item)| item.name.clone()).collect()
            }
            _ => panic!("expected matches, got {outcome:?}"),
        }
    }

    #[test]
    fn test_empty_items_is_no_data() {
        // NoData even with a term that could never match: the no-match
        // message is only for loaded-but-filtered-out catalogs.
        assert_eq!(filter_items(&[], ""), FilterOutcome::NoData);
        assert_eq!(filter_items(&[], "anything"), FilterOutcome::NoData);
    }

    #[test]
    fn test_empty_term_matches_all_in_order() {
        let catalog = items(&["Alpha", "Beta", "Gamma"]);
        let outcome = filter_items(&catalog, "");
        assert_eq!(names(&outcome), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let catalog = items(&["Alpha", "Beta", "Gamma"]);
        // "beta" contains an 'a' too, so an "A" query matches all three.
        let outcome = filter_items(&catalog, "A");
        assert_eq!(names(&outcome), vec!["Alpha", "Beta", "Gamma"]);

        let outcome = filter_items(&catalog, "GAM");
        assert_eq!(names(&outcome), vec!["Gamma"]);
    }

    #[test]
    fn test_no_match_with_loaded_items() {
        let catalog = items(&["Alpha"]);
        assert_eq!(filter_items(&catalog, "zzz"), FilterOutcome::NoMatch);
    }

    #[test]
    fn test_indices_track_catalog_positions() {
        let catalog = items(&["Alpha", "Beta", "Gamma"]);
        let outcome = filter_items(&catalog, "ga");
        match outcome {
            FilterOutcome::Matches(pairs) => {
                assert_eq!(pairs.len(), 1);
                assert_eq!(pairs[0].0, 2);
                assert_eq!(pairs[0].1.name, "Gamma");
            }
            other => panic!("expected matches, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = items(&["Alpha", "Beta", "Gamma"]);
        let first = match filter_items(&catalog, "a") {
            FilterOutcome::Matches(pairs) => pairs
                .iter()
                .map(|(_, item)| (*item).clone())
                .collect::<Vec<_>>(),
            other => panic!("expected matches, got {other:?}"),
        };
        let second = match filter_items(&first, "a") {
            FilterOutcome::Matches(pairs) => pairs
                .iter()
                .map(|(_, item)| (*item).clone())
                .collect::<Vec<_>>(),
            other => panic!("expected matches, got {other:?}"),
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_names_all_survive() {
        let catalog = items(&["Twin", "Twin"]);
        let outcome = filter_items(&catalog, "twin");
        assert_eq!(names(&outcome), vec!["Twin", "Twin"]);
    }
}
