use serde::{Deserialize, Serialize};
use std::ops::Range;

mod store;
mod subscriber;
mod window;

pub use store::PaginationStore;
pub use subscriber::{PaginationSubscriber, SubscriptionHandle};
pub use window::{Affordance, PageWindow};

/// Snapshot of a store's pagination position
///
/// Snapshots are never mutated in place; the store swaps in a new one on
/// every change and hands out `Arc`s of the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    /// Zero-based index of the current page
    pub page: usize,
    /// Items per page, fixed when the store is created
    pub page_size: usize,
    /// Number of pages, `ceil(total_count / page_size)`
    pub pages: usize,
    /// Items in the collection as last reported by the data source
    pub total_count: usize,
}

impl PaginationState {
    /// Initial state for a freshly created store
    pub fn empty(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size,
            pages: 0,
            total_count: 0,
        }
    }

    /// Number of pages needed for `total_count` items
    pub fn page_count_for(total_count: usize, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        total_count.div_ceil(page_size)
    }

    /// Clamp a requested page into `[0, pages - 1]`
    pub fn clamp_page(&self, target: i64) -> usize {
        if self.pages == 0 || target <= 0 {
            return 0;
        }
        let last = self.pages - 1;
        usize::try_from(target).map_or(last, |t| t.min(last))
    }

    /// Index of the last page, or 0 when there are no pages
    pub fn last_page(&self) -> usize {
        self.pages.saturating_sub(1)
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.last_page()
    }

    /// Half-open range of item indices on the current page
    pub fn item_range(&self) -> Option<Range<usize>> {
        if self.total_count == 0 {
            return None;
        }
        let start = self.page.saturating_mul(self.page_size);
        let end = start.saturating_add(self.page_size).min(self.total_count);
        (start < end).then_some(start..end)
    }

    /// Query parameters a data source expects for the current page
    pub fn query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_count: self.page_size,
        }
    }
}

/// Request parameters sent to the collection endpoint
///
/// `page_count` is the number of items per page, matching the server's
/// `page` / `page_count` query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: usize,
    pub page_count: usize,
}
