use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page window resolved from optional `page` / `limit` query values.
/// Pages are 1-based; out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    pub fn with_total(&self, total: i64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            pages: (total + self.limit - 1) / self.limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        assert_eq!(PageWindow::new(None, None), PageWindow { page: 1, limit: 10 });
        assert_eq!(PageWindow::new(Some(0), Some(500)), PageWindow { page: 1, limit: 100 });
        assert_eq!(PageWindow::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn test_page_count_rounds_up() {
        let window = PageWindow::new(Some(1), Some(10));
        assert_eq!(window.with_total(0).pages, 0);
        assert_eq!(window.with_total(10).pages, 1);
        assert_eq!(window.with_total(11).pages, 2);
    }
}
