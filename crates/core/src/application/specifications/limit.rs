// Result Window Specifications

use crate::application::Specification;
use crate::error::{AppError, Result};
use crate::port::Query;

/// Cap the number of returned rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitResultsMaxCount {
    count: u64,
}

impl LimitResultsMaxCount {
    /// # Errors
    /// `InvalidArgument` when `count <= 0`
    pub fn new(count: i64) -> Result<Self> {
        if count <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "Max result count must be positive, got {}",
                count
            )));
        }
        Ok(Self {
            count: count as u64,
        })
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Specification for LimitResultsMaxCount {
    fn modify_query(&self, query: &mut dyn Query) {
        query.set_max_results(Some(self.count));
    }
}

/// Skip the first `offset` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitResultsOffset {
    offset: u64,
}

impl LimitResultsOffset {
    /// # Errors
    /// `InvalidArgument` when `offset < 0`
    pub fn new(offset: i64) -> Result<Self> {
        if offset < 0 {
            return Err(AppError::InvalidArgument(format!(
                "Result offset must not be negative, got {}",
                offset
            )));
        }
        Ok(Self {
            offset: offset as u64,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Specification for LimitResultsOffset {
    fn modify_query(&self, query: &mut dyn Query) {
        query.set_first_result(self.offset);
    }
}

/// Page-based window: offset `(page - 1) * per_page`, max `per_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitResultsPaginate {
    page: u64,
    per_page: u64,
}

impl LimitResultsPaginate {
    /// # Errors
    /// `InvalidArgument` when `page < 1`, `per_page <= 0`, or the offset overflows
    pub fn new(page: i64, per_page: i64) -> Result<Self> {
        if page < 1 {
            return Err(AppError::InvalidArgument(format!(
                "Page must be at least 1, got {}",
                page
            )));
        }
        if per_page <= 0 {
            return Err(AppError::InvalidArgument(format!(
                "Page size must be positive, got {}",
                per_page
            )));
        }

        let (page, per_page) = (page as u64, per_page as u64);
        if (page - 1).checked_mul(per_page).is_none() {
            return Err(AppError::InvalidArgument(format!(
                "Page {} of size {} overflows the result offset",
                page, per_page
            )));
        }

        Ok(Self { page, per_page })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// First row of the page (checked at construction)
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }
}

impl Specification for LimitResultsPaginate {
    fn modify_query(&self, query: &mut dyn Query) {
        query.set_first_result(self.offset());
        query.set_max_results(Some(self.per_page));
    }
}
