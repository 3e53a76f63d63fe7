//! Pager view - binds a pagination store to a rendered pager

use pager_core::{PageWindow, PaginationState, PaginationStore, ResourceKind, SubscriptionHandle};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};
use uuid::Uuid;

/// Unique identifier for a pager view
pub type ViewId = Uuid;

/// Callback run after every dispatched action
pub type OnPage = Box<dyn Fn() + Send + Sync>;

/// Callback asking the host UI to redraw
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// Navigation requested by a pager control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PagerAction {
    /// A page link in the window
    Page(usize),
    First,
    Previous,
    Next,
    Last,
}

impl PagerAction {
    /// Page to traverse to, computed from the snapshot the control was drawn with
    pub fn target(self, state: &PaginationState) -> i64 {
        let page = match self {
            PagerAction::Page(page) => page,
            PagerAction::First => 0,
            PagerAction::Previous => state.page.saturating_sub(1),
            PagerAction::Next => state.page.saturating_add(1).min(state.last_page()),
            PagerAction::Last => state.last_page(),
        };
        i64::try_from(page).unwrap_or(i64::MAX)
    }
}

/// What a pager draws for one render cycle
#[derive(Debug, Clone, PartialEq)]
pub struct PagerFrame {
    pub state: Arc<PaginationState>,
    pub window: PageWindow,
}

impl PagerFrame {
    pub fn from_state(state: Arc<PaginationState>) -> Self {
        let window = PageWindow::compute(state.page, state.pages);
        Self { state, window }
    }
}

/// State shared between the view and its store subscription
struct ViewShared {
    frame: RwLock<PagerFrame>,
    renders: AtomicUsize,
    repaint: RwLock<Option<RepaintHook>>,
}

impl ViewShared {
    fn refresh(&self, store: &PaginationStore) {
        *self.frame.write() = PagerFrame::from_state(store.get_state());
        self.renders.fetch_add(1, Ordering::Relaxed);

        let repaint = self.repaint.read().clone();
        if let Some(repaint) = repaint {
            repaint();
        }
    }
}

/// Generic pagination widget state
///
/// Mounting subscribes to the store, unmounting (or dropping the view)
/// unsubscribes.
pub struct PagerView {
    id: ViewId,
    store: Arc<PaginationStore>,
    shared: Arc<ViewShared>,
    handle: Option<SubscriptionHandle>,
    on_page: Option<OnPage>,
}

impl PagerView {
    /// Mount a view on `store`
    pub fn mount(store: &Arc<PaginationStore>) -> Self {
        let id = Uuid::new_v4();
        let shared = Arc::new(ViewShared {
            frame: RwLock::new(PagerFrame::from_state(store.get_state())),
            renders: AtomicUsize::new(1),
            repaint: RwLock::new(None),
        });

        let weak_shared: Weak<ViewShared> = Arc::downgrade(&shared);
        let weak_store: Weak<PaginationStore> = Arc::downgrade(store);
        let handle = store.subscribe(move || {
            if let (Some(shared), Some(store)) = (weak_shared.upgrade(), weak_store.upgrade()) {
                shared.refresh(&store);
            }
        });

        debug!(view = %id, resource = %store.resource(), %handle, "pager view mounted");

        Self {
            id,
            store: store.clone(),
            shared,
            handle: Some(handle),
            on_page: None,
        }
    }

    /// Set the callback run after every dispatch
    pub fn with_on_page(mut self, on_page: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_page = Some(Box::new(on_page));
        self
    }

    /// Set the hook used to request a redraw after a store notification
    pub fn set_repaint_hook(&self, hook: RepaintHook) {
        *self.shared.repaint.write() = Some(hook);
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn resource(&self) -> &ResourceKind {
        self.store.resource()
    }

    /// The frame to draw
    pub fn frame(&self) -> PagerFrame {
        self.shared.frame.read().clone()
    }

    /// Number of frames computed so far, including the initial one
    pub fn render_count(&self) -> usize {
        self.shared.renders.load(Ordering::Relaxed)
    }

    pub fn is_mounted(&self) -> bool {
        self.handle.is_some()
    }

    /// Detach from the store. Safe to call more than once.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.store.unsubscribe(handle);
            debug!(view = %self.id, resource = %self.store.resource(), %handle, "pager view unmounted");
        }
    }

    /// Dispatch a navigation action to the store
    ///
    /// The `on_page` callback runs afterwards even if the store did not move.
    pub fn dispatch(&self, action: PagerAction) {
        let state = self.shared.frame.read().state.clone();
        let target = action.target(&state);
        trace!(view = %self.id, ?action, target, "dispatch");

        self.store.traverse(target);

        if let Some(on_page) = &self.on_page {
            on_page();
        }
    }
}

impl Drop for PagerView {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for PagerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerView")
            .field("id", &self.id)
            .field("resource", self.store.resource())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
