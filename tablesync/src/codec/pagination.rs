//! Pagination state and its query tokens.

use serde::{Deserialize, Serialize};

/// Pagination state for one table.
///
/// `page_index` is 0-based in memory; on the wire it becomes the 1-based
/// `page` token. `page_size` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page, 0-based.
    pub page_index: usize,
    /// Rows per page, at least 1.
    pub page_size: usize,
}

impl PageState {
    /// Create a pagination state, clamping `page_size` to at least 1.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// The same state moved back to the first page.
    pub fn first_page(self) -> Self {
        Self {
            page_index: 0,
            ..self
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
        }
    }
}

/// Encodes pagination as its `page` and `perPage` token values.
pub fn encode_pagination(state: &PageState) -> (String, String) {
    ((state.page_index + 1).to_string(), state.page_size.to_string())
}

/// Decodes `page`/`perPage` token values, falling back to `default`
/// field-by-field.
///
/// A missing token, a parse failure, a `page` below 1, or a non-positive
/// `perPage` substitutes the corresponding default field. Never panics.
pub fn decode_pagination(
    raw_page: Option<&str>,
    raw_per_page: Option<&str>,
    default: PageState,
) -> PageState {
    let page_index = raw_page
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .map(|page| (page - 1) as usize)
        .unwrap_or(default.page_index);
    let page_size = raw_per_page
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|size| *size >= 1)
        .map(|size| size as usize)
        .unwrap_or(default.page_size);
    PageState {
        page_index,
        page_size,
    }
}
