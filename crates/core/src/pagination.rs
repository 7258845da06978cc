//! Page-based slicing of listing results.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Number of pages needed to cover `total` items (0 when `page_size` is 0).
    pub fn page_count(page_size: u64, total: u64) -> u64 {
        if page_size == 0 {
            return 0;
        }
        total.div_ceil(page_size)
    }
}

/// Slice `items` to the requested page.
///
/// - `page_size == 0` is `InvalidPayload`.
/// - A page starting at or past the end is `InvalidPayload`; this includes
///   page 0 of an empty set.
/// - The last page may be short.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> LedgerResult<Vec<T>> {
    if request.page_size == 0 {
        return Err(LedgerError::invalid("page size must be greater than 0"));
    }

    let total = items.len() as u64;
    let start = request
        .page
        .checked_mul(request.page_size)
        .ok_or_else(|| LedgerError::invalid("page number exceeds available data"))?;

    if start >= total {
        return Err(LedgerError::invalid(format!(
            "page number exceeds available data (page {}, page size {}, total {})",
            request.page, request.page_size, total
        )));
    }

    let end = start.saturating_add(request.page_size).min(total);
    // start < total <= usize::MAX, so both casts are lossless.
    Ok(items
        .into_iter()
        .skip(start as usize)
        .take((end - start) as usize)
        .collect())
}
