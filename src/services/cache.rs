// src/services/cache.rs

//! In-memory collection cache.
//!
//! Owns all item data for the process lifetime. Each category slot moves
//! through `unloaded -> loading -> loaded` at most once on success; a failed
//! load reverts the slot to unloaded and a later call retries from scratch.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use futures::future;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::error::Result;
use crate::models::{Category, Item};

/// Number of display names kept as a sample per loaded category.
const SAMPLE_TITLES: usize = 3;

/// Source of fully-drained collections.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch every item of a category, in upstream page order.
    async fn fetch_all(&self, category: Category) -> Result<Vec<Item>>;
}

/// Outcome of loading one category during a fan-out load.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoadOutcome {
    /// Category loaded (or was already loaded)
    Loaded {
        count: usize,
        sample_titles: Vec<String>,
    },
    /// Category failed to load and remains unloaded
    Failed { error: String },
}

/// Aggregate result of a fan-out load across all categories.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Per-category outcome, failures independent of successes
    pub outcomes: BTreeMap<Category, LoadOutcome>,

    /// Items cached across all successfully loaded categories
    pub total_items: usize,

    /// Wall-clock seconds the fan-out took
    pub fetch_secs: f64,
}

impl LoadReport {
    /// True when every category loaded.
    pub fn all_loaded(&self) -> bool {
        self.outcomes
            .values()
            .all(|o| matches!(o, LoadOutcome::Loaded { .. }))
    }

    /// Categories that failed, with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (Category, &str)> {
        self.outcomes.iter().filter_map(|(category, outcome)| {
            match outcome {
                LoadOutcome::Failed { error } => Some((*category, error.as_str())),
                LoadOutcome::Loaded { .. } => None,
            }
        })
    }
}

/// Process-wide cache of catalog collections.
///
/// Constructed once and shared by reference with every consumer. All
/// mutation happens through `ensure_loaded`; reads never block a load of a
/// different category.
pub struct CatalogCache {
    source: Arc<dyn CatalogSource>,
    slots: [OnceCell<Vec<Item>>; 6],
}

impl CatalogCache {
    /// Create an empty cache over the given source.
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            slots: std::array::from_fn(|_| OnceCell::new()),
        }
    }

    fn slot(&self, category: Category) -> &OnceCell<Vec<Item>> {
        &self.slots[category.index()]
    }

    /// Return the category's items, fetching them first if necessary.
    ///
    /// At most one fetch sequence runs per category: the first caller
    /// installs the pending operation and overlapping callers await its
    /// result instead of issuing their own fetch. On failure the slot stays
    /// unloaded and the error propagates to every waiter; a subsequent call
    /// retries.
    pub async fn ensure_loaded(&self, category: Category) -> Result<&[Item]> {
        let items = self
            .slot(category)
            .get_or_try_init(|| async {
                log::debug!("{category}: cache miss, fetching");
                self.source.fetch_all(category).await
            })
            .await?;
        Ok(items.as_slice())
    }

    /// Load every category concurrently, collecting outcomes independently.
    ///
    /// One category's failure never aborts its siblings; completion order
    /// between categories is unspecified.
    pub async fn ensure_all_loaded(&self) -> LoadReport {
        let started = Instant::now();

        let jobs = Category::ALL.map(|category| async move {
            let outcome = match self.ensure_loaded(category).await {
                Ok(items) => LoadOutcome::Loaded {
                    count: items.len(),
                    sample_titles: items
                        .iter()
                        .take(SAMPLE_TITLES)
                        .map(|item| item.display_name().to_string())
                        .collect(),
                },
                Err(error) => {
                    log::warn!("{category}: load failed: {error}");
                    LoadOutcome::Failed {
                        error: error.to_string(),
                    }
                }
            };
            (category, outcome)
        });

        let outcomes: BTreeMap<_, _> = future::join_all(jobs).await.into_iter().collect();
        let total_items = outcomes
            .values()
            .map(|outcome| match outcome {
                LoadOutcome::Loaded { count, .. } => *count,
                LoadOutcome::Failed { .. } => 0,
            })
            .sum();

        LoadReport {
            outcomes,
            total_items,
            fetch_secs: started.elapsed().as_secs_f64(),
        }
    }

    /// Currently cached items for a category, empty if not yet loaded.
    pub fn get(&self, category: Category) -> &[Item] {
        self.slot(category)
            .get()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True once the category has fully loaded.
    pub fn is_loaded(&self, category: Category) -> bool {
        self.slot(category).initialized()
    }

    /// Item count of a loaded category, 0 while unloaded.
    pub fn total(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Items cached across all categories.
    pub fn total_items(&self) -> usize {
        Category::ALL.iter().map(|&c| self.total(c)).sum()
    }

    /// Find a cached item by display name, case-insensitively.
    pub fn find_by_name(&self, category: Category, name: &str) -> Option<&Item> {
        let needle = name.to_lowercase();
        self.get(category)
            .iter()
            .find(|item| item.display_name().to_lowercase() == needle)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by cache, search, report, and explorer tests.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use serde_json::Value;

    use super::*;
    use crate::error::AppError;

    /// Build an item from a `json!` object literal.
    pub fn item(category: Category, value: Value) -> Item {
        match value {
            Value::Object(fields) => Item::new(category, fields),
            _ => panic!("expected a JSON object"),
        }
    }

    /// Source serving fixed in-memory collections, counting fetches.
    ///
    /// Categories without data fail with a network-style error.
    pub struct StaticSource {
        data: HashMap<Category, Vec<Item>>,
        delay: Duration,
        pub fetches: AtomicUsize,
    }

    impl StaticSource {
        pub fn new(data: Vec<(Category, Vec<Item>)>) -> Self {
            Self {
                data: data.into_iter().collect(),
                delay: Duration::ZERO,
                fetches: AtomicUsize::new(0),
            }
        }

        /// Delay each fetch so concurrent callers genuinely overlap.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogSource for StaticSource {
        async fn fetch_all(&self, category: Category) -> Result<Vec<Item>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.data.get(&category).cloned().ok_or_else(|| {
                AppError::status(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    format!("http://catalog.test/api/{category}/"),
                )
            })
        }
    }

    /// Cache with the given collections already loaded; categories missing
    /// from `data` stay unloaded (their load attempt failed).
    pub async fn preloaded_cache(data: Vec<(Category, Vec<Item>)>) -> CatalogCache {
        let cache = CatalogCache::new(Arc::new(StaticSource::new(data)));
        cache.ensure_all_loaded().await;
        cache
    }
}
