//! Page request/response types shared by every list surface.

use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrors, Result};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// 1-indexed page request with a bounded page size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, limit: i64) -> Self {
        PageRequest { page, limit }
    }

    /// Rejects out-of-range values rather than clamping them.
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.page < 1 {
            errors.push_with_value("page", "Page must be a positive integer", self.page.into());
        }
        if self.limit < 1 || self.limit > MAX_LIMIT {
            errors.push_with_value(
                "limit",
                "Limit must be between 1 and 100",
                self.limit.into(),
            );
        }
        errors.into_result()
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of results plus the bookkeeping the API envelope exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Paginated {
            data,
            total,
            page: request.page,
            // ceil(total / limit); limit is validated >= 1
            pages: (total + request.limit - 1) / request.limit,
        }
    }

    /// Number of items on this page.
    pub fn count(&self) -> i64 {
        self.data.len() as i64
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
    }

    #[test]
    fn test_validate_rejects_out_of_range_limit() {
        assert!(PageRequest::new(1, 0).validate().is_err());
        assert!(PageRequest::new(1, 101).validate().is_err());
        assert!(PageRequest::new(0, 10).validate().is_err());
        assert!(PageRequest::new(1, 100).validate().is_ok());
    }

    #[test]
    fn test_pages_is_ceiling() {
        let req = PageRequest::new(1, 10);
        assert_eq!(Paginated::new(vec![1, 2, 3], 21, &req).pages, 3);
        assert_eq!(Paginated::new(vec![1], 20, &req).pages, 2);
        assert_eq!(Paginated::<i32>::new(vec![], 0, &req).pages, 0);
    }
}
