//! Pagination bounds.

use crate::error::PageError;

/// Largest page size accepted by default.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A validated page request: `page >= 1`, `1 <= size <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Validate page parameters against `max_size`.
    pub fn new(number: u32, size: u32, max_size: u32) -> Result<Self, PageError> {
        if number < 1 {
            return Err(PageError::PageOutOfRange(number));
        }
        if size < 1 || size > max_size {
            return Err(PageError::PageSizeOutOfRange {
                got: size,
                max: max_size,
            });
        }
        Ok(Self { number, size })
    }

    /// Validate against [`MAX_PAGE_SIZE`].
    pub fn bounded(number: u32, size: u32) -> Result<Self, PageError> {
        Self::new(number, size, MAX_PAGE_SIZE)
    }

    /// The first page of [`DEFAULT_PAGE_SIZE`] rows.
    pub const fn first() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// 1-based page number.
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Rows per page; also the query limit.
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip.
    pub const fn offset(&self) -> u64 {
        (self.number as u64 - 1) * self.size as u64
    }

    /// The following page, or `None` past the last representable one.
    pub const fn next(&self) -> Option<Self> {
        match self.number.checked_add(1) {
            Some(number) => Some(Self {
                number,
                size: self.size,
            }),
            None => None,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_accepted() {
        assert!(Page::bounded(1, 1).is_ok());
        assert!(Page::bounded(1, MAX_PAGE_SIZE).is_ok());
        assert!(Page::bounded(u32::MAX, 1).is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Page::bounded(0, 10), Err(PageError::PageOutOfRange(0)));
        assert_eq!(
            Page::bounded(1, 0),
            Err(PageError::PageSizeOutOfRange { got: 0, max: 100 })
        );
        assert_eq!(
            Page::bounded(1, 101),
            Err(PageError::PageSizeOutOfRange { got: 101, max: 100 })
        );
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::bounded(1, 10).unwrap().offset(), 0);
        assert_eq!(Page::bounded(3, 10).unwrap().offset(), 20);
        let huge = Page::bounded(u32::MAX, MAX_PAGE_SIZE).unwrap();
        assert_eq!(huge.offset(), (u32::MAX as u64 - 1) * 100);
    }

    #[test]
    fn test_next_and_default() {
        let page = Page::default();
        assert_eq!(page.number(), 1);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE);
        let next = page.next().unwrap();
        assert_eq!(next.number(), 2);
        assert_eq!(next.offset(), DEFAULT_PAGE_SIZE as u64);
    }

    #[test]
    fn test_next_stops_at_last_page() {
        let last = Page::bounded(u32::MAX, 1).unwrap();
        assert_eq!(last.next(), None);
        assert_eq!(Page::bounded(u32::MAX - 1, 1).unwrap().next(), Some(last));
    }
}
