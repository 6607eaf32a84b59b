//! Pagination types for journal listings.

use serde::{Deserialize, Serialize};

/// Entries shown per journal page.
pub const ENTRIES_PER_PAGE: u32 = 50;

/// Maximum number of page links shown around the current page.
pub const PAGE_WINDOW: u32 = 10;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    ENTRIES_PER_PAGE
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request for the given page with the default page size.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: page.max(1),
            ..Self::default()
        }
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.per_page)
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Page numbers to offer as links.
    pub window: Vec<u32>,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if total == 0 || per_page == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        };

        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages,
                window: page_window(page, total_pages),
            },
        }
    }
}

/// Returns the page numbers to link from `current`.
///
/// With more than [`PAGE_WINDOW`] pages the window is pinned to the first
/// pages near the start, to the last pages near the end, and otherwise runs
/// from four before to five after the current page.
#[must_use]
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    if total_pages <= PAGE_WINDOW {
        return (1..=total_pages).collect();
    }
    let half = PAGE_WINDOW / 2;
    if current <= half {
        (1..=PAGE_WINDOW).collect()
    } else if current > total_pages - half {
        (total_pages - PAGE_WINDOW + 1..=total_pages).collect()
    } else {
        (current - (half - 1)..=current + half).collect()
    }
}
