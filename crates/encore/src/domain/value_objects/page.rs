//! Pagination for curation listings

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Normalized page request (1-based page, bounded limit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Build from optional query values; out-of-range values fall back to defaults/caps
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = limit
            .filter(|l| *l >= 1)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of items plus totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    pub fn pages(&self) -> u64 {
        self.total.div_ceil(self.limit as u64)
    }

    pub fn has_next(&self) -> bool {
        (self.page as u64) < self.pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_caps() {
        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, MAX_PAGE_LIMIT);
        assert_eq!(PageRequest::default().limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_page_math() {
        let req = PageRequest::new(Some(2), Some(10));
        assert_eq!(req.offset(), 10);

        let page = Page::new(vec![1, 2, 3], req, 23);
        assert_eq!(page.pages(), 3);
        assert!(page.has_next());
        assert!(page.has_prev());

        let last = Page::new(vec![1], PageRequest::new(Some(3), Some(10)), 23);
        assert!(!last.has_next());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u8> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.pages(), 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }
}
