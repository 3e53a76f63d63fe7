//! Page window calculation
//!
//! Maps `(page, pages)` to the run of page links a pager shows, plus the
//! state of its first / previous / next / last controls. The window looks
//! back at most `LOOKBEHIND` pages and shows at most `MAX_LINKS` links, so
//! the current page sits near the start of the window.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Pages shown before the current one
pub const LOOKBEHIND: usize = 7;

/// Maximum number of page links in a window
pub const MAX_LINKS: usize = 15;

/// Collections with at least this many pages reserve the first and last
/// page for the jump controls
pub const EDGE_THRESHOLD: usize = 5;

/// Visibility and enabled state of a navigation control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Affordance {
    pub visible: bool,
    pub enabled: bool,
}

impl Affordance {
    pub const HIDDEN: Self = Self {
        visible: false,
        enabled: false,
    };

    fn shown(visible: bool, enabled: bool) -> Self {
        Self {
            visible,
            enabled: visible && enabled,
        }
    }
}

/// The run of page indices to render and the edge controls around it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page indices to render, in order
    pub range: Range<usize>,
    /// Margin reserved at each end (0 or 1)
    pub offset: usize,
    /// Page the window was computed for
    pub current: usize,
    pub first: Affordance,
    pub previous: Affordance,
    pub next: Affordance,
    pub last: Affordance,
}

impl PageWindow {
    /// Window for a collection with nothing to paginate
    pub fn empty(current: usize) -> Self {
        Self {
            range: 0..0,
            offset: 0,
            current,
            first: Affordance::HIDDEN,
            previous: Affordance::HIDDEN,
            next: Affordance::HIDDEN,
            last: Affordance::HIDDEN,
        }
    }

    /// Compute the window for `page` out of `pages`
    pub fn compute(page: usize, pages: usize) -> Self {
        if pages <= 1 {
            return Self::empty(page);
        }

        let offset = usize::from(pages >= EDGE_THRESHOLD);
        let start = offset.max(page.saturating_sub(LOOKBEHIND));
        let end = (pages - offset).min(start.saturating_add(MAX_LINKS)).max(start);

        let edges = offset == 1;
        let can_go_back = page > 0;
        let can_go_forward = page.saturating_add(1) < pages;

        Self {
            range: start..end,
            offset,
            current: page,
            first: Affordance::shown(edges, can_go_back),
            previous: Affordance::shown(edges, can_go_back),
            next: Affordance::shown(edges, can_go_forward),
            last: Affordance::shown(edges, can_go_forward),
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn contains(&self, page: usize) -> bool {
        self.range.contains(&page)
    }

    pub fn is_current(&self, page: usize) -> bool {
        page == self.current
    }

    /// Whether any edge control is shown at all
    pub fn shows_edges(&self) -> bool {
        self.offset == 1
    }

    pub fn iter(&self) -> Range<usize> {
        self.range.clone()
    }
}
