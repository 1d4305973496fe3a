//! Page slicing for search results.
//!
//! Rows come back from the data-storage service as one ordered sequence. This module cuts a
//! single page out of that sequence and computes the metadata a caller needs to walk the rest.
//!
//! Pages are 1-based. Out-of-range inputs are clamped instead of rejected: a page below 1 is
//! treated as page 1, and a page size is forced into `1..=MAX_PAGE_SIZE`. A page past the end of
//! the sequence is simply empty.
//!
//! # Example
//! ```rust
//! use sift::pagination::paginate;
//!
//! let rows: Vec<u32> = (0..25).collect();
//! let (slice, meta) = paginate(rows, 3, 10);
//! assert_eq!(slice, vec![20, 21, 22, 23, 24]);
//! assert_eq!(meta.total_pages, 3);
//! ```
use serde::{Deserialize, Serialize};

/// Page used when a request does not name one.
pub const DEFAULT_PAGE: i64 = 1;
/// Rows per page when a request does not name a size.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on rows per page; larger requests are silently reduced.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Where a page sits inside the full result set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total_records: usize,
    pub total_pages: usize,
}

/// Slice `rows` down to the requested page.
///
/// Returns the rows of that page together with its [`Pagination`] metadata. The page and page
/// size reported back are the clamped values actually used for slicing.
pub fn paginate<T>(rows: Vec<T>, page: i64, page_size: i64) -> (Vec<T>, Pagination) {
    let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE) as usize;

    let total_records = rows.len();
    let start = (page - 1).saturating_mul(page_size);

    let slice = rows.into_iter().skip(start).take(page_size).collect();

    (
        slice,
        Pagination {
            page,
            page_size,
            total_records,
            total_pages: total_records.div_ceil(page_size),
        },
    )
}
