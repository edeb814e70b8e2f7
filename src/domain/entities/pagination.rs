//! Pagination state and server page envelopes.

use serde::{Deserialize, Serialize};

/// Default page size used by the board.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination state mirrored from the server's page response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl Pagination {
    /// Zero-state for a given page size.
    pub fn empty(size: u32) -> Self {
        Self {
            page: 0,
            size: size.max(1),
            total_pages: 0,
            total_elements: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// Server page envelope (`{content, number, size, totalPages, totalElements}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub number: u32,

    #[serde(default)]
    pub size: Option<u32>,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub total_pages: u32,

    #[serde(default, deserialize_with = "crate::shared::nullable::null_as_default")]
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Pagination for this page; a missing or zero size falls back to `requested_size`.
    pub fn pagination(&self, requested_size: u32) -> Pagination {
        Pagination {
            page: self.number,
            size: self.size.filter(|s| *s > 0).unwrap_or(requested_size.max(1)),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}

/// List endpoints answer either with a bare array or with a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Items(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Paged(page) => page.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Post;
    use serde_json::json;

    #[test]
    fn test_page_row_with_null_fields_decodes() {
        let page: Page<Post> = serde_json::from_value(json!({
            "content": [
                { "id": 1, "title": "a" },
                { "id": 2, "title": null, "isNotice": null, "author": null }
            ],
            "number": null,
            "totalPages": 1,
            "totalElements": 2
        }))
        .unwrap();

        assert_eq!(page.content.len(), 2);
        assert_eq!(page.content[1].title, "");
        assert_eq!(page.number, 0);
        assert_eq!(page.pagination(10).total_elements, 2);
    }

    #[test]
    fn test_page_pagination() {
        let page: Page<i64> = serde_json::from_value(json!({
            "content": [1, 2, 3],
            "number": 0,
            "size": 10,
            "totalPages": 1,
            "totalElements": 3
        }))
        .unwrap();

        let pagination = page.pagination(20);
        assert_eq!(pagination.size, 10);
        assert_eq!(pagination.total_elements, 3);
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_page_missing_fields_use_defaults() {
        let page: Page<i64> = serde_json::from_value(json!({})).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.pagination(25), Pagination::empty(25));
    }

    #[test]
    fn test_listing_accepts_array_and_page() {
        let bare: Listing<i64> = serde_json::from_value(json!([1, 2])).unwrap();
        let paged: Listing<i64> = serde_json::from_value(json!({ "content": [1, 2] })).unwrap();
        assert_eq!(bare.into_items(), vec![1, 2]);
        assert_eq!(paged.into_items(), vec![1, 2]);
    }
}
