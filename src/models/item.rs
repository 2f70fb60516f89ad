//! Catalog item data structure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Category;

/// Field names that are upstream bookkeeping, not catalog data.
///
/// Excluded from detail views, field inventories, and search-relevant
/// statistics. `url` is deliberately not used as an identity field either;
/// items are matched by display name within a category.
pub const BOOKKEEPING_FIELDS: [&str; 3] = ["created", "edited", "url"];

/// A single catalog entry, tagged with its owning category.
///
/// The upstream schema differs per category, so fields stay an opaque JSON
/// map with typed accessors that return `None` when a field is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Owning category, attached on ingestion
    pub category: Category,

    /// Raw upstream fields (strings, numbers, nested reference arrays)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Create an item from a raw upstream field map.
    pub fn new(category: Category, fields: Map<String, Value>) -> Self {
        Self { category, fields }
    }

    /// Display name: the `name` field, falling back to `title` for films.
    pub fn display_name(&self) -> &str {
        self.field_str("name")
            .or_else(|| self.field_str("title"))
            .unwrap_or("")
    }

    /// Look up a raw field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Look up a field as a string slice, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// True if the field is present and non-empty.
    pub fn has_field(&self, name: &str) -> bool {
        match self.fields.get(name) {
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Null) | None => false,
            Some(_) => true,
        }
    }

    /// Case-folded textual form of the whole item, nested fields included.
    ///
    /// This is the haystack for substring search; serialization keeps the
    /// match policy deliberately broad.
    pub fn searchable_text(&self) -> String {
        serde_json::to_string(&self.fields)
            .unwrap_or_default()
            .to_lowercase()
    }

    /// All fields except upstream bookkeeping, for the detail view.
    pub fn detail_fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .filter(|(key, _)| !BOOKKEEPING_FIELDS.contains(&key.as_str()))
            .map(|(key, value)| (key.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item_from_json(category: Category, value: Value) -> Item {
        match value {
            Value::Object(fields) => Item::new(category, fields),
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_display_name_prefers_name() {
        let item = item_from_json(
            Category::People,
            json!({"name": "Luke Skywalker", "gender": "male"}),
        );
        assert_eq!(item.display_name(), "Luke Skywalker");
    }

    #[test]
    fn test_display_name_falls_back_to_title() {
        let item = item_from_json(
            Category::Films,
            json!({"title": "A New Hope", "director": "George Lucas"}),
        );
        assert_eq!(item.display_name(), "A New Hope");
    }

    #[test]
    fn test_display_name_empty_when_absent() {
        let item = item_from_json(Category::Planets, json!({"climate": "arid"}));
        assert_eq!(item.display_name(), "");
    }

    #[test]
    fn test_searchable_text_includes_nested_fields() {
        let item = item_from_json(
            Category::Films,
            json!({
                "title": "A New Hope",
                "characters": ["Luke Skywalker", "Leia Organa"]
            }),
        );
        let text = item.searchable_text();
        assert!(text.contains("leia organa"));
        assert!(text.contains("a new hope"));
    }

    #[test]
    fn test_detail_fields_exclude_bookkeeping() {
        let item = item_from_json(
            Category::People,
            json!({
                "name": "Luke Skywalker",
                "created": "2014-12-09T13:50:51Z",
                "edited": "2014-12-20T21:17:56Z",
                "url": "https://swapi.py4e.com/api/people/1/"
            }),
        );
        let keys: Vec<_> = item.detail_fields().map(|(k, _)| k).collect();
        assert_eq!(keys, ["name"]);
    }

    #[test]
    fn test_has_field_treats_empty_string_as_absent() {
        let item = item_from_json(
            Category::People,
            json!({"name": "", "gender": "male", "mass": 77}),
        );
        assert!(!item.has_field("name"));
        assert!(item.has_field("gender"));
        assert!(item.has_field("mass"));
        assert!(!item.has_field("homeworld"));
    }

    #[test]
    fn test_serialize_flattens_fields() {
        let item = item_from_json(Category::People, json!({"name": "R2-D2"}));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["category"], "people");
        assert_eq!(value["name"], "R2-D2");
    }
}
