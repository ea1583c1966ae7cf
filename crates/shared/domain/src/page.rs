//! Pagination types for paged reads.

use serde::Serialize;

use crate::constants::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{DomainError, DomainResult};
use crate::sort::Sort;

/// Validated page descriptor: an element offset, a page size and a sort.
///
/// Only constructible through the checked constructors, so a `PageRequest`
/// in hand always has `size` in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    offset: u64,
    size: u64,
    sort: Sort,
}

impl PageRequest {
    /// Zero-based page number and page size.
    pub fn of(page: i64, size: i64) -> DomainResult<Self> {
        if page < 0 {
            return Err(DomainError::validation("page number must not be negative"));
        }
        let size = checked_size(size)?;
        let offset = (page as u64)
            .checked_mul(size)
            .ok_or_else(|| DomainError::validation("page offset overflows"))?;

        Ok(Self {
            offset,
            size,
            sort: Sort::unsorted(),
        })
    }

    /// Raw element offset and page size.
    pub fn at_offset(offset: i64, size: i64) -> DomainResult<Self> {
        if offset < 0 {
            return Err(DomainError::validation("offset must not be negative"));
        }

        Ok(Self {
            offset: offset as u64,
            size: checked_size(size)?,
            sort: Sort::unsorted(),
        })
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    /// Page number this request starts in (offset / size).
    pub fn page_number(&self) -> u64 {
        self.offset / self.size
    }

    /// Request for the following page, same size and sort.
    pub fn next(&self) -> Self {
        Self {
            offset: self.offset.saturating_add(self.size),
            size: self.size,
            sort: self.sort.clone(),
        }
    }

    /// Request for the preceding page, clamped at the start.
    pub fn previous_or_first(&self) -> Self {
        Self {
            offset: self.offset.saturating_sub(self.size),
            size: self.size,
            sort: self.sort.clone(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE_NUMBER * DEFAULT_PAGE_SIZE,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::unsorted(),
        }
    }
}

fn checked_size(size: i64) -> DomainResult<u64> {
    if size < 1 {
        return Err(DomainError::validation("page size must be at least 1"));
    }
    let size = size as u64;
    if size > MAX_PAGE_SIZE {
        return Err(DomainError::validation(format!(
            "page size must not exceed {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(size)
}

/// One page of results plus total-count metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub offset: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            offset: request.offset(),
            size: request.size(),
            total_elements,
        }
    }

    /// Number of pages of `size` needed to hold every element
    pub fn total_pages(&self) -> u64 {
        if self.size > 0 {
            self.total_elements.div_ceil(self.size)
        } else {
            0
        }
    }

    /// Zero-based number of this page
    pub fn number(&self) -> u64 {
        if self.size > 0 {
            self.offset / self.size
        } else {
            0
        }
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.content.len() as u64) < self.total_elements
    }

    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Convert the content while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            offset: self.offset,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_maps_to_offset() {
        let request = PageRequest::of(2, 10).unwrap();
        assert_eq!(request.offset(), 20);
        assert_eq!(request.page_number(), 2);
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(PageRequest::of(-1, 10).is_err());
        assert!(PageRequest::at_offset(-5, 10).is_err());
        assert!(PageRequest::at_offset(0, -1).is_err());
    }

    #[test]
    fn size_bounds_are_enforced() {
        assert!(PageRequest::of(0, 0).is_err());
        assert!(PageRequest::of(0, MAX_PAGE_SIZE as i64).is_ok());
        assert!(PageRequest::of(0, MAX_PAGE_SIZE as i64 + 1).is_err());
    }

    #[test]
    fn overflowing_offset_is_rejected() {
        assert!(PageRequest::of(i64::MAX, 50).is_err());
    }

    #[test]
    fn next_and_previous_move_by_size() {
        let request = PageRequest::at_offset(3, 2).unwrap();
        assert_eq!(request.next().offset(), 5);
        assert_eq!(request.previous_or_first().offset(), 1);
        assert_eq!(request.previous_or_first().previous_or_first().offset(), 0);
    }

    #[test]
    fn page_metadata() {
        let request = PageRequest::at_offset(0, 2).unwrap();
        let page = Page::new(vec![1, 2], &request, 5);
        assert_eq!(page.total_pages(), 3);
        assert!(page.is_first());
        assert!(page.has_next());

        let last = Page::new(vec![5], &PageRequest::at_offset(4, 2).unwrap(), 5);
        assert_eq!(last.number(), 2);
        assert!(last.is_last());
        assert!(last.has_previous());
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::of(1, 2).unwrap();
        let page = Page::new(vec![1, 2], &request, 4).map(|n| n * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.offset, 2);
    }
}
