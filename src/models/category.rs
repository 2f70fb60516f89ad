// src/models/category.rs

//! The closed set of catalog categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A catalog category (one upstream collection endpoint).
///
/// The declaration order is the canonical iteration order: loads, search
/// scans, and reports all walk categories in this order, so search ties
/// resolve deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Planets,
    Films,
    Species,
    Vehicles,
    Starships,
}

impl Category {
    /// All categories, in canonical order.
    pub const ALL: [Category; 6] = [
        Category::People,
        Category::Planets,
        Category::Films,
        Category::Species,
        Category::Vehicles,
        Category::Starships,
    ];

    /// Upstream endpoint path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::People => "people",
            Category::Planets => "planets",
            Category::Films => "films",
            Category::Species => "species",
            Category::Vehicles => "vehicles",
            Category::Starships => "starships",
        }
    }

    /// Stable slot index within [0, 6).
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Fields every item of this category is expected to carry.
    ///
    /// Used by the validation report; missing fields are flagged as errors.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Category::People => &["name", "gender"],
            Category::Planets => &["name", "climate"],
            Category::Films => &["title", "director"],
            Category::Species => &["name", "classification"],
            Category::Vehicles => &["name", "model"],
            Category::Starships => &["name", "model"],
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "people" => Ok(Category::People),
            "planets" => Ok(Category::Planets),
            "films" => Ok(Category::Films),
            "species" => Ok(Category::Species),
            "vehicles" => Ok(Category::Vehicles),
            "starships" => Ok(Category::Starships),
            other => Err(AppError::UnknownCategory(other.to_string())),
        }
    }
}
