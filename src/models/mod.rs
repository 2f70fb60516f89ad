// src/models/mod.rs

//! Domain models for the catalog explorer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod category;
mod config;
mod item;
mod page;

// Re-export all public types
pub use category::Category;
pub use config::{CatalogConfig, Config, DisplayConfig};
pub use item::Item;
pub use page::{PageEnvelope, PageView};
