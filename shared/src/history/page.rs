//! History pagination

use serde::{Deserialize, Serialize};

use super::display::EnrichedChangeRecord;

/// Default page size
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Normalized page request (1-based page, bounded limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryPageRequest {
    pub page: u32,
    pub limit: u32,
}

impl HistoryPageRequest {
    /// Page 0 is treated as page 1; limit is clamped into `1..=max_limit`
    pub fn new(page: u32, limit: u32, max_limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit.max(1)),
        }
    }

    /// Number of records to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for HistoryPageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// One page of enriched history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub items: Vec<EnrichedChangeRecord>,
    pub total_count: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl HistoryPage {
    pub fn new(items: Vec<EnrichedChangeRecord>, total_count: u64, request: HistoryPageRequest) -> Self {
        let pages = total_count.div_ceil(u64::from(request.limit.max(1)));
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        Self {
            items,
            total_count,
            page: request.page,
            limit: request.limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_normalization() {
        let req = HistoryPageRequest::new(0, 500, 50);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 50);
        assert_eq!(req.offset(), 0);

        let req = HistoryPageRequest::new(3, 0, 50);
        assert_eq!(req.limit, 1);
        assert_eq!(req.offset(), 2);

        let req = HistoryPageRequest::new(2, 10, 50);
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn test_total_pages() {
        let page = HistoryPage::new(vec![], 21, HistoryPageRequest::new(1, 10, 50));
        assert_eq!(page.total_pages, 3);

        let page = HistoryPage::new(vec![], 0, HistoryPageRequest::new(1, 10, 50));
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_total_pages_saturates() {
        let page = HistoryPage::new(vec![], u64::MAX, HistoryPageRequest::new(1, 1, 50));
        assert_eq!(page.total_pages, u32::MAX);

        let page = HistoryPage::new(vec![], u64::from(u32::MAX) + 1, HistoryPageRequest::new(1, 1, 50));
        assert_eq!(page.total_pages, u32::MAX);
        assert_eq!(page.total_count, u64::from(u32::MAX) + 1);
    }
}
