//! Store lifecycle notifications
//!
//! The registry reports stores being created and disposed so hosts can
//! rebuild the views bound to them.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::registry::ResourceKind;

/// Something that happened to a registered store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created {
        resource: ResourceKind,
        page_size: usize,
    },
    Disposed {
        resource: ResourceKind,
        /// Listeners still attached when the store was dropped
        dropped_subscribers: usize,
    },
}

impl StoreEvent {
    pub fn resource(&self) -> &ResourceKind {
        match self {
            StoreEvent::Created { resource, .. } | StoreEvent::Disposed { resource, .. } => resource,
        }
    }
}

/// Handle returned by `StoreEvents::listen`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Listeners for store lifecycle events
///
/// Listeners run after the list lock is released, so a listener may call
/// back into the registry (recreating a disposed store, say) or remove
/// itself.
#[derive(Default)]
pub struct StoreEvents {
    listeners: RwLock<Vec<(ListenerId, Listener)>>,
    next_id: AtomicU64,
}

impl StoreEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every lifecycle event
    pub fn listen(&self, listener: impl Fn(&StoreEvent) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(l, _)| *l != id);
        listeners.len() != before
    }

    pub(crate) fn publish(&self, event: StoreEvent) {
        let listeners: Vec<Listener> = self.listeners.read().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(&event);
        }
    }
}
