//! Service layer for the catalog explorer.
//!
//! This module contains the business logic for:
//! - Paginated endpoint draining (`CatalogFetcher`)
//! - In-memory collection caching (`CatalogCache`)
//! - Whole-cache ranked search (`search_cache`)
//! - Client-side re-pagination (`paginate`)

pub mod cache;
pub mod fetcher;
pub mod pagination;
pub mod search;

pub use cache::{CatalogCache, CatalogSource, LoadOutcome, LoadReport};
pub use fetcher::{CatalogFetcher, HttpTransport, PageTransport};
pub use pagination::paginate;
pub use search::{SearchResults, search_cache};
