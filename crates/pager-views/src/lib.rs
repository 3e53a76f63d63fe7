//! View layer for paginated collections
//!
//! A `PagerView` binds one pagination store to a rendered pager. It is
//! independent of the UI toolkit; `pager-ui` draws it with egui.

mod pager_view;

pub use pager_view::{OnPage, PagerAction, PagerFrame, PagerView, RepaintHook, ViewId};
