// src/report.rs

//! Diagnostic and introspection surfaces over the cache.
//!
//! Everything here is derived on demand from cached data: load-state
//! summaries, aggregate statistics, a structural validation report, and a
//! self-describing JSON export.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::Result;
use crate::models::Category;
use crate::services::cache::CatalogCache;

/// Load state of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub total: usize,
    pub loaded: bool,
}

/// Load state across the whole cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheSummary {
    pub total_items_loaded: usize,
    pub categories: BTreeMap<Category, CategorySummary>,
    pub loaded_categories: Vec<Category>,
    pub pending_categories: Vec<Category>,
}

/// Summarize which categories are loaded and how many items each holds.
pub fn cache_summary(cache: &CatalogCache) -> CacheSummary {
    let mut summary = CacheSummary {
        total_items_loaded: 0,
        categories: BTreeMap::new(),
        loaded_categories: Vec::new(),
        pending_categories: Vec::new(),
    };

    for category in Category::ALL {
        let total = cache.total(category);
        let loaded = cache.is_loaded(category);
        summary.total_items_loaded += total;
        summary
            .categories
            .insert(category, CategorySummary { total, loaded });
        if loaded {
            summary.loaded_categories.push(category);
        } else {
            summary.pending_categories.push(category);
        }
    }

    summary
}

/// One category in the ranked statistics listing.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
    pub loaded: bool,
}

/// Aggregate statistics across all cached items.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub total_items: usize,
    pub categories: BTreeMap<Category, CategorySummary>,
    /// Categories ranked by item count, largest first
    pub top_categories: Vec<CategoryCount>,
    /// Every field name seen across all items, bookkeeping excluded
    pub searchable_fields: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Compute aggregate statistics: counts per category and the field
/// inventory of everything cached so far.
pub fn statistics(cache: &CatalogCache) -> CatalogStats {
    let mut categories = BTreeMap::new();
    let mut fields = BTreeSet::new();
    let mut total_items = 0;

    for category in Category::ALL {
        let items = cache.get(category);
        total_items += items.len();
        categories.insert(
            category,
            CategorySummary {
                total: items.len(),
                loaded: cache.is_loaded(category),
            },
        );

        for item in items {
            for (key, _) in item.detail_fields() {
                fields.insert(key.to_string());
            }
        }
    }

    let mut top_categories: Vec<CategoryCount> = categories
        .iter()
        .map(|(category, summary)| CategoryCount {
            category: *category,
            count: summary.total,
            loaded: summary.loaded,
        })
        .collect();
    top_categories.sort_by_key(|c| std::cmp::Reverse(c.count));

    CatalogStats {
        total_items,
        categories,
        top_categories,
        searchable_fields: fields.into_iter().collect(),
        last_updated: Utc::now(),
    }
}

/// Structural findings for one category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryValidation {
    pub item_count: usize,
    /// "item N: missing FIELD" entries for required fields
    pub missing_fields: Vec<String>,
    /// Display names seen more than once
    pub duplicates: Vec<String>,
}

/// Structural validation report across the cache.
///
/// Missing required fields are errors; duplicate display names are a
/// best-effort diagnostic only (same-named distinct entities are
/// indistinguishable from true duplicates) and never affect `is_valid`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub categories: BTreeMap<Category, CategoryValidation>,
}

/// Validate cached items against each category's required fields and flag
/// repeated display names.
pub fn validate(cache: &CatalogCache) -> ValidationReport {
    let mut report = ValidationReport {
        is_valid: true,
        errors: Vec::new(),
        warnings: Vec::new(),
        categories: BTreeMap::new(),
    };

    for category in Category::ALL {
        let mut findings = CategoryValidation::default();
        let mut seen_names = HashSet::new();

        for (index, item) in cache.get(category).iter().enumerate() {
            findings.item_count += 1;

            for field in category.required_fields() {
                if !item.has_field(field) {
                    findings
                        .missing_fields
                        .push(format!("item {index}: missing {field}"));
                }
            }

            let name = item.display_name().to_lowercase();
            if !name.is_empty() && !seen_names.insert(name) {
                findings.duplicates.push(item.display_name().to_string());
            }
        }

        if !findings.missing_fields.is_empty() {
            report.is_valid = false;
            report
                .errors
                .push(format!("{category}: missing required fields"));
        }
        if !findings.duplicates.is_empty() {
            report
                .warnings
                .push(format!("{category}: potential duplicate names"));
        }

        report.categories.insert(category, findings);
    }

    report
}

/// Export cached data as a self-describing pretty-printed JSON document.
///
/// With a category, exports that collection; otherwise exports the whole
/// cache together with its load summary.
pub fn export(cache: &CatalogCache, category: Option<Category>) -> Result<String> {
    let document = match category {
        Some(category) => json!({
            "category": category,
            "count": cache.total(category),
            "data": cache.get(category),
            "exported_at": Utc::now(),
        }),
        None => {
            let mut all_data = serde_json::Map::new();
            for category in Category::ALL {
                all_data.insert(
                    category.to_string(),
                    serde_json::to_value(cache.get(category))?,
                );
            }
            json!({
                "summary": cache_summary(cache),
                "all_data": all_data,
                "exported_at": Utc::now(),
            })
        }
    };

    Ok(serde_json::to_string_pretty(&document)?)
}
