// src/lib.rs

//! starcat Library
//!
//! Drains the paginated SWAPI catalog endpoints into an in-memory cache,
//! then answers browse, search, and pagination intents over it.

pub mod error;
pub mod explorer;
pub mod models;
pub mod report;
pub mod services;
