//! Page-navigation window for a result listing.

use gourmet_core::PAGE_SIZE;

/// Number of page links shown at once.
const WINDOW: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Total page count for `total_available` results.
#[must_use]
pub fn total_pages(total_available: u64) -> u32 {
    let pages = total_available.div_ceil(u64::from(PAGE_SIZE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pages to offer around `current`, or `None` when there is at most one page.
///
/// The window starts two pages before `current` (never below 1) and spans at
/// most five pages without running past `total`.
#[must_use]
pub fn page_window(current: u32, total: u32) -> Option<PageWindow> {
    if total <= 1 {
        return None;
    }

    let start = current.saturating_sub(2).max(1);
    let end = start.saturating_add(WINDOW - 1).min(total);

    Some(PageWindow {
        pages: (start..=end).collect(),
        has_prev: current > 1,
        has_next: current < total,
    })
}
