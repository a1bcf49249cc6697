use serde::Deserialize;
use thiserror::Error;

pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1, got {0}")]
    Page(i64),
    #[error("page_size must be between 1 and {MAX_PAGE_SIZE}, got {0}")]
    PageSize(i64),
}

/// Page-number pagination as it arrives on the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    pub fn is_requested(&self) -> bool {
        self.page.is_some() || self.page_size.is_some()
    }

    pub fn validate(&self) -> Result<(), PaginationError> {
        match (self.page, self.page_size) {
            (Some(page), _) if page < 1 => Err(PaginationError::Page(page)),
            (_, Some(size)) if !(1..=MAX_PAGE_SIZE).contains(&size) => {
                Err(PaginationError::PageSize(size))
            }
            _ => Ok(()),
        }
    }

    /// `(page - 1) * page_size` when both are given, otherwise 0. Saturates
    /// at `i64::MAX`, past the end of any listing.
    pub fn offset(&self) -> i64 {
        match (self.page, self.page_size) {
            (Some(page), Some(size)) => {
                page.saturating_sub(1).saturating_mul(size)
            }
            _ => 0,
        }
    }

    pub fn limit(&self) -> Option<i64> { self.page_size }
}
