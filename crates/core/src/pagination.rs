//! Page arithmetic for offset-based search
//!
//! The search endpoint reports a `total` and accepts `startAt`/`maxResults`.

/// Number of pages needed to fetch `total_count` results, `page_size` at a time.
///
/// # Panics
/// Panics if `page_size` is zero. A zero page size is a caller bug.
pub fn total_pages(total_count: u64, page_size: u64) -> u64 {
    assert!(page_size > 0, "page size must be greater than zero");
    total_count.div_ceil(page_size)
}
