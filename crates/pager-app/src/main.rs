//! Demo window with one pager per resource

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use pager_core::{
    refresh_from, ListenerId, PagerConfig, PaginationStore, ResourceKind, StoreEvent,
    StoreRegistry,
};
use pager_ui::{PagerBar, PagerControls};
use pager_views::PagerView;

mod source;

use source::SimulatedSource;

/// One resource shown in the demo: its store, source and views
struct ResourcePanel {
    store: Arc<PaginationStore>,
    source: Arc<SimulatedSource>,
    view: PagerView,
    /// Second view on the same store, shown in a popover
    popover: Option<PagerView>,
    popover_open: Arc<AtomicBool>,
}

impl ResourcePanel {
    fn new(store: Arc<PaginationStore>, source: Arc<SimulatedSource>, ctx: &egui::Context) -> Self {
        let view = PagerView::mount(&store);
        let ctx = ctx.clone();
        view.set_repaint_hook(Arc::new(move || ctx.request_repaint()));
        Self {
            store,
            source,
            view,
            popover: None,
            popover_open: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Main application state
struct PagerDemoApp {
    registry: Arc<StoreRegistry>,
    panels: Vec<ResourcePanel>,
    controls: PagerControls,
    runtime: tokio::runtime::Runtime,
    ctx: egui::Context,
    /// Resources whose store was disposed and needs a fresh panel
    disposed: Arc<Mutex<Vec<ResourceKind>>>,
    lifecycle_listener: ListenerId,
}

impl PagerDemoApp {
    fn new(cc: &eframe::CreationContext<'_>, config: &PagerConfig) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let registry = Arc::new(StoreRegistry::from_config(config)?);

        let disposed = Arc::new(Mutex::new(Vec::new()));
        let lifecycle_listener = {
            let disposed = disposed.clone();
            let ctx = cc.egui_ctx.clone();
            registry.events().listen(move |event| {
                if let StoreEvent::Disposed { resource, .. } = event {
                    disposed.lock().push(resource.clone());
                    ctx.request_repaint();
                }
            })
        };

        let panels: Vec<ResourcePanel> = registry
            .resources()
            .into_iter()
            .filter_map(|resource| registry.get(&resource))
            .enumerate()
            .map(|(i, store)| {
                let source = Arc::new(SimulatedSource::new(
                    store.resource().as_str(),
                    180 * (i as i64 + 1),
                ));
                ResourcePanel::new(store, source, &cc.egui_ctx)
            })
            .collect();

        let app = Self {
            registry,
            panels,
            controls: PagerControls {
                caption: true,
                ..Default::default()
            },
            runtime,
            ctx: cc.egui_ctx.clone(),
            disposed,
            lifecycle_listener,
        };
        for panel in &app.panels {
            app.spawn_refresh(panel);
        }
        Ok(app)
    }

    /// Fetch a fresh total in the background and apply it to the store
    fn spawn_refresh(&self, panel: &ResourcePanel) {
        let source = panel.source.clone();
        let store = panel.store.clone();
        self.runtime.spawn(async move {
            if let Err(e) = refresh_from(source.as_ref(), &store).await {
                error!(resource = %store.resource(), "refresh failed: {e:#}");
            }
        });
    }

    /// Give every disposed resource a new store and a freshly mounted panel
    fn rebuild_disposed(&mut self) {
        let disposed: Vec<ResourceKind> = std::mem::take(&mut *self.disposed.lock());
        for resource in disposed {
            let Some(index) = self.panels.iter().position(|p| p.store.resource() == &resource) else {
                continue;
            };
            let page_size = self.panels[index].store.get_state().page_size;
            let store = match self.registry.create(resource.clone(), page_size) {
                Ok(store) => store,
                Err(e) => {
                    warn!(%resource, "could not recreate store: {e}");
                    continue;
                }
            };

            let source = self.panels[index].source.clone();
            let panel = ResourcePanel::new(store, source, &self.ctx);
            self.spawn_refresh(&panel);
            self.panels[index] = panel;
        }
    }

    fn panel_ui(&self, ui: &mut egui::Ui, panel: &mut ResourcePanel) {
        let state = panel.store.get_state();

        ui.heading(panel.store.resource().as_str());
        ui.horizontal(|ui| {
            let mut total = panel.source.total();
            ui.label("Server total:");
            if ui
                .add(egui::DragValue::new(&mut total).clamp_range(0..=100_000))
                .changed()
            {
                panel.source.set_total(total);
            }

            let mut failing = panel.source.is_failing();
            if ui.checkbox(&mut failing, "Fail fetches").changed() {
                panel.source.set_failing(failing);
            }

            if ui.button("Refresh").clicked() {
                self.spawn_refresh(panel);
            }

            if ui
                .button("Reset")
                .on_hover_text("Dispose the store and start over on page 1")
                .clicked()
            {
                self.registry.dispose(panel.store.resource());
            }
        });

        ui.label(format!(
            "page {} of {} ({} per page, {} subscribers)",
            state.page + 1,
            state.pages.max(1),
            state.page_size,
            panel.store.subscriber_count()
        ));

        PagerBar::new(&panel.view).controls(self.controls).show(ui);

        if ui.button("Jump to page…").clicked() && panel.popover.is_none() {
            let open = panel.popover_open.clone();
            open.store(true, Ordering::Relaxed);
            let view = PagerView::mount(&panel.store).with_on_page(move || {
                open.store(false, Ordering::Relaxed);
            });
            panel.popover = Some(view);
        }

        if let Some(view) = &panel.popover {
            let mut open = panel.popover_open.load(Ordering::Relaxed);
            egui::Window::new(format!("Jump: {}", panel.store.resource()))
                .id(pager_ui::pager_widget_id(view).with("popover").id())
                .open(&mut open)
                .collapsible(false)
                .show(ui.ctx(), |ui| {
                    PagerBar::new(view)
                        .controls(PagerControls {
                            single_steps: false,
                            ..Default::default()
                        })
                        .show(ui);
                });
            if !open || !panel.popover_open.load(Ordering::Relaxed) {
                // Dropping the view unsubscribes it
                panel.popover = None;
            }
        }

        ui.separator();
    }
}

impl eframe::App for PagerDemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.rebuild_disposed();

        egui::TopBottomPanel::top("pager_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.controls.edge_jumps, "First / last");
                ui.checkbox(&mut self.controls.single_steps, "Previous / next");
                ui.checkbox(&mut self.controls.caption, "Caption");
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let mut panels = std::mem::take(&mut self.panels);
            for panel in panels.iter_mut() {
                self.panel_ui(ui, panel);
            }
            self.panels = panels;
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.registry.events().unlisten(self.lifecycle_listener);
        self.panels.clear();
        for resource in self.registry.resources() {
            self.registry.dispose(&resource);
        }
    }
}

fn load_config() -> Result<PagerConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!(%path, "loading pager configuration");
            Ok(PagerConfig::from_path(&path)?)
        }
        None => Ok(PagerConfig::default()),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = load_config()?;
    info!(resources = config.resources.len(), "Starting pager demo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pager Demo",
        options,
        Box::new(move |cc| match PagerDemoApp::new(cc, &config) {
            Ok(app) => Box::new(app) as Box<dyn eframe::App>,
            Err(e) => {
                error!("failed to start: {e:#}");
                std::process::exit(1);
            }
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
