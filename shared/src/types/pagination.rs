//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Pagination parameters for list endpoints
///
/// Out-of-range values are clamped rather than rejected: the page number is
/// forced to at least 1 and the page size into `1..=MAX_PER_PAGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping both values into their valid ranges
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
        }
    }

    /// Calculate the offset for database queries.
    ///
    /// Widened to `u64` so a huge page number cannot overflow the
    /// multiplication (`u32::MAX * MAX_PER_PAGE` exceeds `u32`).
    pub fn offset(&self) -> u64 {
        (self.page as u64).saturating_sub(1) * self.per_page as u64
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page
    }

    /// Offset as i64 for SQL bind parameters
    pub fn offset_i64(&self) -> i64 {
        self.offset() as i64
    }

    /// Limit as i64 for SQL bind parameters
    pub fn limit_i64(&self) -> i64 {
        self.limit() as i64
    }

    /// Check if this is the first page
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }

    /// Re-apply the clamping rules to values that bypassed `new`
    /// (e.g. deserialized from a query string)
    pub fn validate(self) -> Self {
        Self::new(self.page, self.per_page)
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub items: Vec<T>,

    /// Total number of matches, ignoring pagination
    pub total_count: u64,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub per_page: u32,

    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(items: Vec<T>, pagination: Pagination, total_count: u64) -> Self {
        Self {
            items,
            total_count,
            page: pagination.page,
            per_page: pagination.per_page,
            total_pages: Self::calculate_total_pages(total_count, pagination.per_page),
        }
    }

    /// Create an empty paginated response
    pub fn empty(pagination: Pagination) -> Self {
        Self::new(Vec::new(), pagination, 0)
    }

    fn calculate_total_pages(total: u64, per_page: u32) -> u32 {
        if total == 0 {
            return 0;
        }
        ((total + per_page as u64 - 1) / per_page as u64) as u32
    }

    /// Transform the items using a function, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }

    /// Check if the response has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

// Constants
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PER_PAGE: u32 = 10;
const MIN_PER_PAGE: u32 = 1;
const MAX_PER_PAGE: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 10);
    }

    #[test]
    fn test_clamping() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(3, 1000);
        assert_eq!(p.page, 3);
        assert_eq!(p.per_page, 100);
    }

    #[test]
    fn test_offset() {
        let p = Pagination::new(1, 10);
        assert_eq!(p.offset(), 0);

        let p = Pagination::new(4, 25);
        assert_eq!(p.offset(), 75);
        assert_eq!(p.limit(), 25);
    }

    #[test]
    fn test_offset_does_not_overflow_on_huge_page() {
        let p = Pagination::new(u32::MAX, 100);
        assert_eq!(p.offset(), (u32::MAX as u64 - 1) * 100);
        assert_eq!(p.offset_i64(), ((u32::MAX as u64 - 1) * 100) as i64);
    }

    #[test]
    fn test_total_pages() {
        let resp = PaginatedResponse::new(vec![1, 2, 3], Pagination::new(1, 10), 23);
        assert_eq!(resp.total_pages, 3);

        let resp = PaginatedResponse::new(vec![1], Pagination::new(1, 10), 20);
        assert_eq!(resp.total_pages, 2);

        let resp: PaginatedResponse<i32> = PaginatedResponse::empty(Pagination::default());
        assert_eq!(resp.total_pages, 0);
        assert!(resp.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let resp = PaginatedResponse::new(vec![1, 2], Pagination::new(2, 2), 5);
        let mapped = resp.map(|n| n.to_string());
        assert_eq!(mapped.items, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_count, 5);
        assert_eq!(mapped.page, 2);
        assert_eq!(mapped.total_pages, 3);
    }
}
