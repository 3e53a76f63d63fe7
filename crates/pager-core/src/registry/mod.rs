//! Per-resource store registry
//!
//! Holds one `PaginationStore` per resource kind. Code that needs a store is
//! handed the registry instead of reaching for a global, so tests can build
//! isolated registries.

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::info;

use crate::config::PagerConfig;
use crate::events::{StoreEvent, StoreEvents};
use crate::pagination::PaginationStore;
use crate::PagerError;

/// Name of a paginated resource, e.g. `audits` or `users`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKind(String);

impl ResourceKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Registry of pagination stores, one per resource
pub struct StoreRegistry {
    stores: RwLock<AHashMap<ResourceKind, Arc<PaginationStore>>>,
    events: StoreEvents,
}

impl StoreRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            stores: RwLock::new(AHashMap::new()),
            events: StoreEvents::new(),
        }
    }

    /// Create a registry with a store for every configured resource
    pub fn from_config(config: &PagerConfig) -> Result<Self, PagerError> {
        config.validate()?;
        let registry = Self::new();
        for resource in &config.resources {
            registry.create(ResourceKind::new(resource.name.as_str()), resource.page_size)?;
        }
        Ok(registry)
    }

    /// Create the store for `resource`
    pub fn create(
        &self,
        resource: ResourceKind,
        page_size: usize,
    ) -> Result<Arc<PaginationStore>, PagerError> {
        let size = NonZeroUsize::new(page_size).ok_or_else(|| PagerError::InvalidPageSize {
            resource: resource.clone(),
            page_size,
        })?;

        let store = {
            let mut stores = self.stores.write();
            if stores.contains_key(&resource) {
                return Err(PagerError::AlreadyRegistered(resource));
            }
            let store = Arc::new(PaginationStore::new(resource.clone(), size));
            stores.insert(resource.clone(), store.clone());
            store
        };

        info!(%resource, page_size, "pagination store created");
        self.events.publish(StoreEvent::Created {
            resource,
            page_size,
        });

        Ok(store)
    }

    /// Get the store for `resource`
    pub fn get(&self, resource: &ResourceKind) -> Option<Arc<PaginationStore>> {
        self.stores.read().get(resource).cloned()
    }

    /// Registered resources, sorted by name
    pub fn resources(&self) -> Vec<ResourceKind> {
        let mut resources: Vec<_> = self.stores.read().keys().cloned().collect();
        resources.sort();
        resources
    }

    /// Remove the store for `resource` and detach its listeners
    ///
    /// Returns false if no store was registered.
    pub fn dispose(&self, resource: &ResourceKind) -> bool {
        let Some(store) = self.stores.write().remove(resource) else {
            return false;
        };

        let dropped_subscribers = store.subscriber_count();
        store.clear_subscribers();

        info!(%resource, dropped_subscribers, "pagination store disposed");
        self.events.publish(StoreEvent::Disposed {
            resource: resource.clone(),
            dropped_subscribers,
        });
        true
    }

    /// Lifecycle events for stores in this registry
    pub fn events(&self) -> &StoreEvents {
        &self.events
    }
}

impl Default for StoreRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_create_and_get() {
        let registry = StoreRegistry::new();
        let store = registry.create("audits".into(), 25).unwrap();

        let fetched = registry.get(&"audits".into()).unwrap();
        assert!(Arc::ptr_eq(&store, &fetched));
        assert_eq!(fetched.get_state().page_size, 25);
        assert!(registry.get(&"users".into()).is_none());
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let registry = StoreRegistry::new();
        registry.create("users".into(), 20).unwrap();
        let err = registry.create("users".into(), 20).unwrap_err();
        assert!(matches!(err, PagerError::AlreadyRegistered(r) if r.as_str() == "users"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let registry = StoreRegistry::new();
        let err = registry.create("users".into(), 0).unwrap_err();
        assert!(matches!(err, PagerError::InvalidPageSize { page_size: 0, .. }));
        assert!(registry.resources().is_empty());
    }

    #[test]
    fn test_stores_are_independent() {
        let registry = StoreRegistry::new();
        let audits = registry.create("audits".into(), 10).unwrap();
        let users = registry.create("users".into(), 10).unwrap();

        audits.apply_collection_refresh(100);
        audits.traverse(5);

        assert_eq!(audits.get_state().page, 5);
        assert_eq!(users.get_state().page, 0);
        assert_eq!(users.get_state().total_count, 0);
    }

    #[test]
    fn test_dispose_detaches_listeners() {
        let registry = StoreRegistry::new();
        let disposed = Arc::new(AtomicUsize::new(0));
        let d = disposed.clone();
        registry.events().listen(move |event| {
            if let StoreEvent::Disposed { dropped_subscribers, .. } = event {
                assert_eq!(*dropped_subscribers, 1);
                d.fetch_add(1, Ordering::SeqCst);
            }
        });

        let store = registry.create("audits".into(), 10).unwrap();
        store.subscribe(|| {});

        assert!(registry.dispose(&"audits".into()));
        assert!(!registry.dispose(&"audits".into()));
        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(disposed.load(Ordering::SeqCst), 1);
        assert!(registry.get(&"audits".into()).is_none());
    }

    #[test]
    fn test_disposed_store_recreated_from_listener() {
        let registry = Arc::new(StoreRegistry::new());
        let weak = Arc::downgrade(&registry);
        registry.events().listen(move |event| {
            if let (StoreEvent::Disposed { resource, .. }, Some(registry)) = (event, weak.upgrade()) {
                registry.create(resource.clone(), 15).unwrap();
            }
        });

        let old = registry.create("audits".into(), 10).unwrap();
        assert!(registry.dispose(&"audits".into()));

        let fresh = registry.get(&"audits".into()).unwrap();
        assert!(!Arc::ptr_eq(&old, &fresh));
        assert_eq!(fresh.get_state().page_size, 15);
    }

    #[test]
    fn test_from_config() {
        let registry = StoreRegistry::from_config(&PagerConfig::default()).unwrap();
        assert_eq!(
            registry.resources(),
            vec![ResourceKind::new("audits"), ResourceKind::new("users")]
        );
    }
}
