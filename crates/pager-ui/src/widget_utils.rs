//! Widget utilities for keeping pager widget IDs unique
//!
//! Several pagers for the same resource can be on screen at once (a table
//! footer and a popover, say), so their egui IDs combine the resource name
//! with the view's own id.

use egui::Id;
use pager_views::PagerView;
use std::fmt::Display;

/// Widget ID builder that ensures unique IDs by combining multiple components
pub struct WidgetId {
    components: Vec<String>,
}

impl WidgetId {
    /// Create a new widget ID builder
    pub fn new(base: impl Display) -> Self {
        Self {
            components: vec![base.to_string()],
        }
    }

    /// Add a component to the ID
    pub fn with(mut self, component: impl Display) -> Self {
        self.components.push(component.to_string());
        self
    }

    /// Add a page index to the ID
    pub fn page(self, page: usize) -> Self {
        self.with(format!("page_{}", page))
    }

    /// Build the final ID string
    pub fn build(&self) -> String {
        self.components.join("_")
    }

    /// Create an egui ID from this widget ID
    pub fn id(&self) -> Id {
        Id::new(self.build())
    }
}

/// ID builder rooted at a pager view
pub fn pager_widget_id(view: &PagerView) -> WidgetId {
    WidgetId::new("pager").with(view.resource()).with(view.id().simple())
}

/// ID for the link to `page` within one pager bar
pub fn page_link_id(page: usize) -> Id {
    WidgetId::new("page_link").page(page).id()
}
