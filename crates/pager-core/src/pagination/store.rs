//! Pagination store implementation

use super::{PaginationState, PaginationSubscriber, SubscriptionHandle};
use crate::registry::ResourceKind;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace};

type SubscriberList = Vec<(SubscriptionHandle, Arc<dyn PaginationSubscriber>)>;

/// Owns the authoritative pagination snapshot for one resource
pub struct PaginationStore {
    resource: ResourceKind,
    state: RwLock<Arc<PaginationState>>,
    subscribers: RwLock<SubscriberList>,
    next_handle: AtomicU64,
}

impl PaginationStore {
    /// Create a new store with an empty collection
    pub fn new(resource: ResourceKind, page_size: NonZeroUsize) -> Self {
        Self {
            resource,
            state: RwLock::new(Arc::new(PaginationState::empty(page_size.get()))),
            subscribers: RwLock::new(Vec::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    pub fn resource(&self) -> &ResourceKind {
        &self.resource
    }

    /// Get the current snapshot
    pub fn get_state(&self) -> Arc<PaginationState> {
        self.state.read().clone()
    }

    /// Register a callback invoked after every state change
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.add_subscriber(Arc::new(listener))
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn PaginationSubscriber>) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((handle, subscriber));
        trace!(resource = %self.resource, %handle, "subscribed");
        handle
    }

    /// Remove a subscriber. Returns false if the handle was not registered.
    pub fn unsubscribe(&self, handle: SubscriptionHandle) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(h, _)| *h != handle);
        let removed = subscribers.len() != before;
        trace!(resource = %self.resource, %handle, removed, "unsubscribed");
        removed
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    /// Drop every subscriber, used when the store is disposed
    pub fn clear_subscribers(&self) {
        self.subscribers.write().clear();
    }

    /// Navigate to a page
    ///
    /// The target is clamped into range. Nothing is notified when the
    /// clamped page is already the current one.
    pub fn traverse(&self, target: i64) {
        {
            let mut state = self.state.write();
            let page = state.clamp_page(target);
            if page == state.page {
                trace!(resource = %self.resource, target, page, "traverse is a no-op");
                return;
            }

            debug!(resource = %self.resource, from = state.page, to = page, "traverse");
            *state = Arc::new(PaginationState { page, ..**state });
        }

        self.notify_subscribers();
    }

    /// Apply a fresh total from the data source
    ///
    /// Always notifies, since `pages` and `total_count` may have changed even
    /// when the page did not. A page past the new end moves to the last page.
    pub fn apply_collection_refresh(&self, total_count: i64) {
        {
            let mut state = self.state.write();
            let total_count = usize::try_from(total_count).unwrap_or(0);
            let pages = PaginationState::page_count_for(total_count, state.page_size);
            let page = state.page.min(pages.saturating_sub(1));

            debug!(
                resource = %self.resource,
                total_count,
                pages,
                page,
                "collection refresh"
            );
            *state = Arc::new(PaginationState {
                page,
                page_size: state.page_size,
                pages,
                total_count,
            });
        }

        self.notify_subscribers();
    }

    /// Notify all subscribers of a state change
    fn notify_subscribers(&self) {
        // Copy the list so subscribers may unsubscribe or dispatch while notified
        let subscribers: Vec<Arc<dyn PaginationSubscriber>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, s)| s.clone())
            .collect();

        for subscriber in subscribers {
            subscriber.on_pagination_change();
        }
    }
}

impl std::fmt::Debug for PaginationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationStore")
            .field("resource", &self.resource)
            .field("state", &*self.get_state())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageWindow;
    use std::sync::atomic::AtomicUsize;

    fn store(page_size: usize) -> Arc<PaginationStore> {
        Arc::new(PaginationStore::new(
            ResourceKind::new("audits"),
            NonZeroUsize::new(page_size).unwrap(),
        ))
    }

    fn counter(store: &PaginationStore) -> (Arc<AtomicUsize>, SubscriptionHandle) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let handle = store.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        (count, handle)
    }

    #[test]
    fn test_initial_state() {
        let store = store(20);
        let state = store.get_state();
        assert_eq!(*state, PaginationState::empty(20));
    }

    #[test]
    fn test_traverse_to_current_page_is_noop() {
        let store = store(10);
        store.apply_collection_refresh(100);
        let (count, _) = counter(&store);

        let before = store.get_state();
        store.traverse(0);
        store.traverse(-5);

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert!(Arc::ptr_eq(&before, &store.get_state()));
    }

    #[test]
    fn test_traverse_notifies_once() {
        let store = store(10);
        store.apply_collection_refresh(100);
        let (count, _) = counter(&store);

        store.traverse(4);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.get_state().page, 4);

        store.traverse(250);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(store.get_state().page, 9);
    }

    #[test]
    fn test_traverse_without_pages_stays_at_zero() {
        let store = store(10);
        let (count, _) = counter(&store);
        store.traverse(3);
        assert_eq!(store.get_state().page, 0);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_refresh_always_notifies() {
        let store = store(10);
        let (count, _) = counter(&store);

        store.apply_collection_refresh(50);
        store.apply_collection_refresh(50);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(store.get_state().pages, 5);
        assert_eq!(store.get_state().total_count, 50);
    }

    #[test]
    fn test_refresh_clamps_to_last_page() {
        let store = store(10);
        store.apply_collection_refresh(100);
        store.traverse(9);

        let (count, _) = counter(&store);
        store.traverse(20);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(store.get_state().page, 9);

        store.apply_collection_refresh(50);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        let state = store.get_state();
        assert_eq!(state.page, 4);
        assert_eq!(state.pages, 5);

        let window = PageWindow::compute(state.page, state.pages);
        assert_eq!(window.offset, 1);
        assert_eq!(window.start(), 1);
        assert_eq!(window.end(), 4);
    }

    #[test]
    fn test_refresh_keeps_page_in_range() {
        let store = store(10);
        store.apply_collection_refresh(100);
        store.traverse(3);

        store.apply_collection_refresh(200);
        assert_eq!(store.get_state().page, 3);

        store.apply_collection_refresh(0);
        let state = store.get_state();
        assert_eq!(state.page, 0);
        assert_eq!(state.pages, 0);
    }

    #[test]
    fn test_negative_total_treated_as_empty() {
        let store = store(10);
        store.apply_collection_refresh(-12);
        assert_eq!(store.get_state().total_count, 0);
        assert_eq!(store.get_state().pages, 0);
    }

    #[test]
    fn test_unsubscribe_twice() {
        let store = store(10);
        store.apply_collection_refresh(100);
        let (first, first_handle) = counter(&store);
        let (second, _) = counter(&store);

        assert!(store.unsubscribe(first_handle));
        assert!(!store.unsubscribe(first_handle));

        store.traverse(2);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(store.subscriber_count(), 1);
    }

    #[test]
    fn test_subscriber_can_unsubscribe_itself() {
        let store = store(10);
        store.apply_collection_refresh(100);

        let handle_slot: Arc<parking_lot::Mutex<Option<SubscriptionHandle>>> = Default::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let (other, _) = counter(&store);

        let weak_store = Arc::downgrade(&store);
        let slot = handle_slot.clone();
        let c = calls.clone();
        let handle = store.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
            if let (Some(store), Some(handle)) = (weak_store.upgrade(), *slot.lock()) {
                store.unsubscribe(handle);
            }
        });
        *handle_slot.lock() = Some(handle);

        store.traverse(1);
        store.traverse(2);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(other.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subscribers_see_full_snapshot() {
        let store = store(10);
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));

        let weak_store = Arc::downgrade(&store);
        let s = seen.clone();
        store.subscribe(move || {
            if let Some(store) = weak_store.upgrade() {
                s.lock().push(*store.get_state());
            }
        });

        store.apply_collection_refresh(35);
        store.traverse(3);

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].pages, 4);
        assert_eq!(seen[0].total_count, 35);
        assert_eq!(seen[1].page, 3);
        assert_eq!(seen[1].pages, 4);
    }
}
