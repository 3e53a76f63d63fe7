//! egui components for paginated collections

pub mod pager_bar;
pub mod widget_utils;

pub use pager_bar::{bar_items, caption, BarItem, PagerBar, PagerBarStyle, PagerControls};
pub use widget_utils::{page_link_id, pager_widget_id, WidgetId};

// Common icon definitions
pub mod icons {
    pub const FIRST: &str = "⏮";
    pub const PREVIOUS: &str = "◀";
    pub const NEXT: &str = "▶";
    pub const LAST: &str = "⏭";
}
