// src/services/search.rs

//! Whole-cache free-text search.
//!
//! Scans every cached item, matching a case-folded term as a substring of
//! the item's serialized form. Items whose display name contains the term
//! rank before items that only match in other fields; within a tier items
//! sort by case-folded display name, ties keeping encounter order.

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Category, Item};
use crate::services::cache::CatalogCache;

/// A fully recomputed, ranked result of one search submission.
///
/// An empty `hits` is the explicit "no matches" signal; "not yet searched"
/// is represented by the absence of a `SearchResults` value altogether.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    /// The trimmed term that was searched
    pub term: String,

    /// Matching items, best-ranked first
    pub hits: Vec<Item>,
}

impl SearchResults {
    /// True when the term matched nothing.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of matching items.
    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Search all loaded collections for a term.
///
/// Only cached items are scanned; categories that never loaded contribute
/// nothing. The caller is responsible for loading beforehand (the explorer
/// runs a fan-out load first). A blank term is a caller error.
pub fn search_cache(cache: &CatalogCache, term: &str) -> Result<SearchResults> {
    let term = term.trim();
    if term.is_empty() {
        return Err(AppError::EmptyQuery);
    }
    let needle = term.to_lowercase();

    let mut ranked: Vec<(u8, String, &Item)> = Vec::new();
    for category in Category::ALL {
        for item in cache.get(category) {
            if !item.searchable_text().contains(&needle) {
                continue;
            }
            let name = item.display_name().to_lowercase();
            let tier = if name.contains(&needle) { 0 } else { 1 };
            ranked.push((tier, name, item));
        }
    }

    // Stable sort: equal (tier, name) keys keep canonical encounter order.
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    log::debug!("search '{term}': {} matches", ranked.len());
    Ok(SearchResults {
        term: term.to_string(),
        hits: ranked.into_iter().map(|(_, _, item)| item.clone()).collect(),
    })
}

/// Render a field value the way search previews and detail views show it:
/// nested reference sequences collapse to their length.
pub fn preview_value(value: &Value) -> String {
    match value {
        Value::Array(entries) => format!("{} entries", entries.len()),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::cache::testing::{item, preloaded_cache};

    async fn sample_cache() -> CatalogCache {
        preloaded_cache(vec![
            (
                Category::People,
                vec![
                    item(
                        Category::People,
                        json!({"name": "Leia Organa", "notes": "trained by Luke"}),
                    ),
                    item(Category::People, json!({"name": "Luke Skywalker"})),
                ],
            ),
            (
                Category::Films,
                vec![item(
                    Category::Films,
                    json!({"title": "A New Hope", "characters": ["Luke Skywalker"]}),
                )],
            ),
        ])
        .await
    }

    #[tokio::test]
    async fn test_name_tier_beats_field_tier() {
        let cache = sample_cache().await;
        let results = search_cache(&cache, "luke").unwrap();

        let names: Vec<_> = results.hits.iter().map(|i| i.display_name()).collect();
        assert_eq!(names[0], "Luke Skywalker");
        assert!(names.contains(&"Leia Organa"));
        assert!(
            names.iter().position(|n| *n == "Luke Skywalker")
                < names.iter().position(|n| *n == "Leia Organa")
        );
    }

    #[tokio::test]
    async fn test_match_is_case_folded_and_reaches_nested_fields() {
        let cache = sample_cache().await;
        let results = search_cache(&cache, "LUKE").unwrap();

        // The film matches only through its nested character list.
        assert!(
            results
                .hits
                .iter()
                .any(|i| i.category == Category::Films && i.display_name() == "A New Hope")
        );
    }

    #[tokio::test]
    async fn test_field_tier_sorts_by_display_name() {
        let cache = sample_cache().await;
        let results = search_cache(&cache, "luke").unwrap();

        // Both tier-1 hits: "A New Hope" < "Leia Organa" case-folded.
        let tail: Vec<_> = results.hits[1..].iter().map(|i| i.display_name()).collect();
        assert_eq!(tail, ["A New Hope", "Leia Organa"]);
    }

    #[tokio::test]
    async fn test_zero_matches_is_empty_not_error() {
        let cache = sample_cache().await;
        let results = search_cache(&cache, "midichlorian").unwrap();
        assert!(results.is_empty());
        assert_eq!(results.len(), 0);
        assert_eq!(results.term, "midichlorian");
    }

    #[tokio::test]
    async fn test_blank_term_is_rejected() {
        let cache = sample_cache().await;
        assert!(matches!(
            search_cache(&cache, "   "),
            Err(AppError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn test_unloaded_categories_are_excluded() {
        // Only people loaded; planets never loaded.
        let cache = preloaded_cache(vec![(
            Category::People,
            vec![item(Category::People, json!({"name": "Luke Skywalker"}))],
        )])
        .await;

        let results = search_cache(&cache, "luke").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results.hits[0].category, Category::People);
    }

    #[test]
    fn test_preview_value_collapses_arrays() {
        assert_eq!(preview_value(&json!(["a", "b"])), "2 entries");
        assert_eq!(preview_value(&json!("arid")), "arid");
        assert_eq!(preview_value(&json!(42)), "42");
    }
}
