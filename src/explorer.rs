// src/explorer.rs

//! Explorer session: resolves view intents against the cache.
//!
//! This is the surface a view adapter drives: select a category, flip
//! pages, submit a search, open an item. The session tracks only view
//! state; all item data stays in the shared cache.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Category, Item, PageView};
use crate::services::cache::{CatalogCache, LoadReport};
use crate::services::pagination::paginate;
use crate::services::search::{SearchResults, search_cache};

/// What the session is currently showing.
#[derive(Debug, Clone, PartialEq)]
enum ViewState {
    /// Nothing selected yet
    Idle,
    /// Browsing one category at a page
    Browse { category: Category, page: usize },
    /// Showing results of a search (search results are not paginated)
    Search { term: String },
}

/// One interactive session over a shared catalog cache.
pub struct Explorer {
    cache: Arc<CatalogCache>,
    page_size: usize,
    view: ViewState,
}

impl Explorer {
    /// Create a session with the given uniform page size.
    pub fn new(cache: Arc<CatalogCache>, page_size: usize) -> Self {
        Self {
            cache,
            page_size,
            view: ViewState::Idle,
        }
    }

    /// Shared cache handle, for diagnostics surfaces.
    pub fn cache(&self) -> &CatalogCache {
        &self.cache
    }

    /// Warm a category ahead of first use; failures are logged, not fatal.
    pub async fn preload(&self, category: Category) {
        if let Err(error) = self.cache.ensure_loaded(category).await {
            log::warn!("{category}: preload failed: {error}");
        }
    }

    /// Select a category: load it if needed and show its first page.
    ///
    /// Any previous search context is discarded.
    pub async fn select_category(&mut self, category: Category) -> Result<PageView<'_>> {
        self.cache.ensure_loaded(category).await?;
        self.view = ViewState::Browse { category, page: 1 };
        paginate(self.cache.get(category), 1, self.page_size)
    }

    /// Move the current browse view by `delta` pages.
    ///
    /// Returns `Ok(None)` (a no-op) when no category is active, when the
    /// active view is a search result set, or when the target page would
    /// leave the valid range.
    pub fn change_page(&mut self, delta: i64) -> Result<Option<PageView<'_>>> {
        let (category, page) = match &self.view {
            ViewState::Browse { category, page } => (*category, *page),
            ViewState::Idle | ViewState::Search { .. } => return Ok(None),
        };

        let total_pages = self
            .cache
            .total(category)
            .div_ceil(self.page_size)
            .max(1);
        let target = page as i64 + delta;
        if target < 1 || target > total_pages as i64 {
            return Ok(None);
        }
        let target = target as usize;

        self.view = ViewState::Browse {
            category,
            page: target,
        };
        paginate(self.cache.get(category), target, self.page_size).map(Some)
    }

    /// Submit a search over the whole catalog.
    ///
    /// Loads every category first (failures degrade gracefully: those
    /// categories are simply absent from the results), then ranks matches.
    /// A blank term is rejected with `EmptyQuery` before any loading.
    pub async fn search(&mut self, term: &str) -> Result<(SearchResults, LoadReport)> {
        let term = term.trim();
        if term.is_empty() {
            return Err(AppError::EmptyQuery);
        }

        let report = self.cache.ensure_all_loaded().await;
        for (category, error) in report.failures() {
            log::warn!("search proceeds without {category}: {error}");
        }

        let results = search_cache(&self.cache, term)?;
        self.view = ViewState::Search {
            term: results.term.clone(),
        };
        Ok((results, report))
    }

    /// Full field set of an item for the detail view, bookkeeping fields
    /// excluded.
    pub fn item_details<'a>(&self, item: &'a Item) -> Vec<(&'a str, &'a Value)> {
        item.detail_fields().collect()
    }

    /// Clear the view state; cached data is untouched.
    pub fn reset(&mut self) {
        self.view = ViewState::Idle;
    }
}
