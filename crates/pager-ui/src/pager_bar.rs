//! Pager bar widget
//! Draws a `PagerView` frame as a row of page links between jump and step buttons

use egui::{Button, Color32, RichText, SelectableLabel, Ui, Vec2};
use pager_core::Affordance;
use pager_views::{PagerAction, PagerFrame, PagerView};
use tracing::trace;

use crate::icons;
use crate::widget_utils::{page_link_id, pager_widget_id};

/// Which optional controls the embedding page wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerControls {
    /// "First" / "last" jump buttons
    pub edge_jumps: bool,
    /// "Previous" / "next" step buttons
    pub single_steps: bool,
    /// "Showing a-b of n" caption under the bar
    pub caption: bool,
}

impl Default for PagerControls {
    fn default() -> Self {
        Self {
            edge_jumps: true,
            single_steps: true,
            caption: false,
        }
    }
}

/// Visual settings for the pager bar
#[derive(Debug, Clone)]
pub struct PagerBarStyle {
    /// Size of the jump and step buttons
    pub button_size: Vec2,
    /// Spacing between items
    pub item_spacing: f32,
    /// Color of the current page link
    pub current_page_color: Option<Color32>,
}

impl Default for PagerBarStyle {
    fn default() -> Self {
        Self {
            button_size: Vec2::new(28.0, 24.0),
            item_spacing: 5.0,
            current_page_color: None,
        }
    }
}

/// One item of a pager bar, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarItem {
    Control {
        action: PagerAction,
        label: &'static str,
        enabled: bool,
    },
    Page {
        index: usize,
        current: bool,
    },
}

/// Lay out the items of a pager bar for `frame`
///
/// Empty when there is nothing to paginate.
pub fn bar_items(frame: &PagerFrame, controls: PagerControls) -> Vec<BarItem> {
    let window = &frame.window;
    if window.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::with_capacity(window.len() + 4);
    let control = |shown: bool, affordance: Affordance, action, label| {
        if shown && affordance.visible {
            Some(BarItem::Control {
                action,
                label,
                enabled: affordance.enabled,
            })
        } else {
            None
        }
    };

    let leading = [
        control(controls.edge_jumps, window.first, PagerAction::First, icons::FIRST),
        control(controls.single_steps, window.previous, PagerAction::Previous, icons::PREVIOUS),
    ];
    let trailing = [
        control(controls.single_steps, window.next, PagerAction::Next, icons::NEXT),
        control(controls.edge_jumps, window.last, PagerAction::Last, icons::LAST),
    ];

    items.extend(leading.into_iter().flatten());
    items.extend(window.iter().map(|index| BarItem::Page {
        index,
        current: window.is_current(index),
    }));
    items.extend(trailing.into_iter().flatten());
    items
}

/// Pager bar widget
pub struct PagerBar<'a> {
    view: &'a PagerView,
    controls: PagerControls,
    style: PagerBarStyle,
}

impl<'a> PagerBar<'a> {
    pub fn new(view: &'a PagerView) -> Self {
        Self {
            view,
            controls: PagerControls::default(),
            style: PagerBarStyle::default(),
        }
    }

    pub fn controls(mut self, controls: PagerControls) -> Self {
        self.controls = controls;
        self
    }

    pub fn style(mut self, style: PagerBarStyle) -> Self {
        self.style = style;
        self
    }

    /// Draw the bar and dispatch whatever was clicked
    pub fn show(self, ui: &mut Ui) -> Option<PagerAction> {
        let frame = self.view.frame();
        let items = bar_items(&frame, self.controls);
        let mut clicked = None;

        ui.push_id(pager_widget_id(self.view).id(), |ui| {
            if !items.is_empty() {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = self.style.item_spacing;
                    for item in &items {
                        if let Some(action) = self.item_ui(ui, item) {
                            clicked = Some(action);
                        }
                    }
                });
            }

            if self.controls.caption {
                ui.label(caption(&frame));
            }
        });

        if let Some(action) = clicked {
            trace!(view = %self.view.id(), ?action, "pager bar clicked");
            self.view.dispatch(action);
        }
        clicked
    }

    fn item_ui(&self, ui: &mut Ui, item: &BarItem) -> Option<PagerAction> {
        match item {
            BarItem::Control { action, label, enabled } => {
                let response = ui
                    .add_enabled(*enabled, Button::new(*label).min_size(self.style.button_size))
                    .on_hover_text(hover_text(*action));
                response.clicked().then_some(*action)
            }
            BarItem::Page { index, current } => {
                let mut text = RichText::new((index + 1).to_string());
                if *current {
                    text = match self.style.current_page_color {
                        Some(color) => text.color(color),
                        None => text.weak(),
                    };
                }
                let response = ui
                    .push_id(page_link_id(*index), |ui| ui.add(SelectableLabel::new(*current, text)))
                    .inner;
                response.clicked().then_some(PagerAction::Page(*index))
            }
        }
    }
}

fn hover_text(action: PagerAction) -> &'static str {
    match action {
        PagerAction::First => "First page",
        PagerAction::Previous => "Previous page",
        PagerAction::Next => "Next page",
        PagerAction::Last => "Last page",
        PagerAction::Page(_) => "Go to page",
    }
}

/// "Showing a-b of n" text for a frame
pub fn caption(frame: &PagerFrame) -> String {
    match frame.state.item_range() {
        Some(range) => format!(
            "Showing {}-{} of {}",
            range.start + 1,
            range.end,
            frame.state.total_count
        ),
        None => "No items".to_string(),
    }
}
