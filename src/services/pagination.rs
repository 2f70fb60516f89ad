// src/services/pagination.rs

//! Client-side re-pagination over already-fetched collections.
//!
//! Pure slicing over a loaded item sequence; no network involved.

use crate::error::{AppError, Result};
use crate::models::{Item, PageView};

/// Compute the page view for a 1-based page number.
///
/// `total_pages` is at least 1: an empty sequence is page 1 of 1 with an
/// empty slice. An out-of-range page number fails with `InvalidPage`
/// instead of clamping, so off-by-one bugs surface in tests; callers clamp
/// (or no-op) before invoking.
pub fn paginate<'a>(
    items: &'a [Item],
    page_number: usize,
    page_size: usize,
) -> Result<PageView<'a>> {
    if page_size == 0 {
        return Err(AppError::config("page size must be > 0"));
    }

    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size).max(1);
    if page_number == 0 || page_number > total_pages {
        return Err(AppError::InvalidPage {
            requested: page_number,
            total_pages,
        });
    }

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(total_count);

    Ok(PageView {
        items: &items[start.min(total_count)..end],
        page_number,
        page_size,
        total_pages,
        total_count,
        has_previous: page_number > 1,
        has_next: page_number < total_pages,
    })
}
