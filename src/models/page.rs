//! Upstream page envelope and the derived page view.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Item;

/// One page of an upstream collection endpoint.
///
/// The fetcher follows `next` until it is null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    /// Total item count across all pages of the collection
    pub count: usize,

    /// Address of the next page, null on the last page
    pub next: Option<String>,

    /// Address of the previous page, null on the first page
    pub previous: Option<String>,

    /// Items on this page, in upstream order
    #[serde(default)]
    pub results: Vec<Map<String, Value>>,
}

/// A windowed slice of a loaded collection plus navigation state.
///
/// Recomputed on demand; borrows the cache's items and is never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    /// Items on this page
    pub items: &'a [Item],

    /// 1-based page number
    pub page_number: usize,

    /// Items per page
    pub page_size: usize,

    /// Total pages, at least 1
    pub total_pages: usize,

    /// Total items across all pages
    pub total_count: usize,

    /// True when a previous page exists
    pub has_previous: bool,

    /// True when a next page exists
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_deserializes_with_missing_results() {
        let envelope: PageEnvelope =
            serde_json::from_str(r#"{"count": 0, "next": null, "previous": null}"#).unwrap();
        assert_eq!(envelope.count, 0);
        assert!(envelope.next.is_none());
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn test_envelope_deserializes_upstream_shape() {
        let raw = r#"{
            "count": 87,
            "next": "https://swapi.py4e.com/api/people/?page=2",
            "previous": null,
            "results": [{"name": "Luke Skywalker"}]
        }"#;
        let envelope: PageEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.count, 87);
        assert_eq!(envelope.results.len(), 1);
        assert_eq!(envelope.results[0]["name"], "Luke Skywalker");
    }
}
