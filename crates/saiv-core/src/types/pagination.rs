//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page sizes offered by the audit log browser.
pub const PAGE_SIZES: [u64; 4] = [25, 50, 100, 200];
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 50;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 200;

/// A list body as returned by the backend.
///
/// List endpoints answer either a bare JSON array or an `{items, total}`
/// envelope; both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// `[...]`
    Bare(Vec<T>),
    /// `{ "items": [...], "total": N }`
    Envelope {
        /// The items on this page.
        #[serde(default = "Vec::new")]
        items: Vec<T>,
        /// Total number of items, when reported.
        #[serde(default)]
        total: Option<u64>,
    },
}

impl<T> ListResponse<T> {
    /// Total number of items, falling back to the page length.
    pub fn total(&self) -> u64 {
        match self {
            Self::Envelope { items, total } => total.unwrap_or(items.len() as u64),
            Self::Bare(items) => items.len() as u64,
        }
    }

    /// Consume the response and return the items.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Envelope { items, .. } | Self::Bare(items) => items,
        }
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self::Bare(Vec::new())
    }
}

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    #[serde(default = "default_page")]
    pub page: u64,
    /// Number of items per page.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The backend `offset` query value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.page_size
    }

    /// The backend `limit` query value.
    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

/// One page of results together with navigation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> PageResponse<T> {
    /// Build a page from a backend list response.
    ///
    /// A bare array carries no total, so a full page is taken to mean that
    /// another page may follow.
    pub fn from_list(list: ListResponse<T>, request: PageRequest) -> Self {
        let page_size = request.page_size.max(1);
        let (items, total_items) = match list {
            ListResponse::Envelope {
                items,
                total: Some(total),
            } => (items, total),
            other => {
                let items = other.into_items();
                let seen = request.offset() + items.len() as u64;
                let total = if items.len() as u64 >= page_size {
                    seen + 1
                } else {
                    seen
                };
                (items, total)
            }
        };
        let total_pages = if total_items == 0 {
            1
        } else {
            total_items.div_ceil(page_size)
        };
        Self {
            items,
            page: request.page,
            page_size,
            total_items,
            total_pages,
            has_next: request.page < total_pages,
            has_previous: request.page > 1,
        }
    }
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_both_list_shapes() {
        let bare: ListResponse<u32> = serde_json::from_str("[1, 2, 3]").unwrap();
        assert_eq!(bare.total(), 3);
        assert_eq!(bare.into_items(), vec![1, 2, 3]);

        let env: ListResponse<u32> =
            serde_json::from_str(r#"{"items": [4, 5], "total": 40}"#).unwrap();
        assert_eq!(env.total(), 40);
        assert_eq!(env.into_items(), vec![4, 5]);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 25).offset(), 0);
        assert_eq!(PageRequest::new(3, 50).offset(), 100);
        assert_eq!(PageRequest::new(0, 500).page_size, 200);
    }

    #[test]
    fn test_page_from_envelope_total() {
        let list = ListResponse::Envelope {
            items: vec![1u32; 25],
            total: Some(60),
        };
        let page = PageResponse::from_list(list, PageRequest::new(2, 25));
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_page_from_bare_short_page_is_last() {
        let page = PageResponse::from_list(ListResponse::Bare(vec![1u32; 10]), PageRequest::new(1, 25));
        assert_eq!(page.total_items, 10);
        assert!(!page.has_next);
    }
}
