//! List query parameters and page metadata.
//!
//! List endpoints accept `page`, `limit` and `search` query parameters and
//! answer with a `meta_data` object next to the items inside the envelope:
//!
//! ```json
//! { "data": [[ { "data": [...], "meta_data": { "total": 42, "page": 2, "limit": 10, "total_pages": 5 } } ]] }
//! ```
//!
//! # Limits
//!
//! - `limit` is clamped to the range [1, 100] (default: 10)
//! - `page` is clamped to a minimum of 1 (default: 1)

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_lenient_i64;

/// Metadata about a paginated response, parsed from `meta_data`.
///
/// Every field defaults to 0 when the backend omits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Total number of items across all pages
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub total: i64,
    /// Current page number (1-indexed)
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub page: i64,
    /// Items per page
    #[serde(default, deserialize_with = "deserialize_lenient_i64")]
    pub limit: i64,
    /// Number of pages
    #[serde(
        default,
        alias = "totalPages",
        alias = "total_page",
        deserialize_with = "deserialize_lenient_i64"
    )]
    pub total_pages: i64,
}

impl PageMeta {
    /// Whether there are more pages after the current one.
    pub fn has_more(&self) -> bool {
        self.page > 0 && self.page < self.total_pages
    }
}

/// A page of items with its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Query parameters for list endpoints.
///
/// # Example
///
/// ```ignore
/// let query = ListQuery { page: Some(3), limit: Some(20), search: None };
/// assert_eq!(query.limit(), 20);
/// assert_eq!(query.to_pairs(), vec![("page", "3".into()), ("limit", "20".into())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns the effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the effective limit, clamped to [1, 100].
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    /// Query-string pairs. Blank searches are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page().to_string()),
            ("limit", self.limit().to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            pairs.push(("search", search.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(
            query.to_pairs(),
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn test_list_query_clamping() {
        let query = ListQuery {
            page: Some(-5),
            limit: Some(500),
            search: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 100);

        let query = ListQuery::default().with_limit(0);
        assert_eq!(query.limit(), 1);
    }

    #[test]
    fn test_list_query_search() {
        let query = ListQuery::default().with_page(2).with_search("  Nok ");
        assert_eq!(
            query.to_pairs(),
            vec![
                ("page", "2".to_string()),
                ("limit", "10".to_string()),
                ("search", "Nok".to_string())
            ]
        );

        let query = ListQuery::default().with_search("   ");
        assert_eq!(query.to_pairs().len(), 2);
    }

    #[test]
    fn test_page_meta_lenient() {
        let meta: PageMeta =
            serde_json::from_str(r#"{"total": "30", "page": 2, "limit": 10, "totalPages": 3}"#)
                .unwrap();
        assert_eq!(
            meta,
            PageMeta {
                total: 30,
                page: 2,
                limit: 10,
                total_pages: 3
            }
        );
        assert!(meta.has_more());

        let meta: PageMeta = serde_json::from_str("{}").unwrap();
        assert_eq!(meta, PageMeta::default());
        assert!(!meta.has_more());
    }
}
