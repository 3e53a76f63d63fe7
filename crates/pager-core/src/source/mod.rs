//! Seam for the data-fetch collaborator that keeps store totals fresh

use crate::pagination::{PageQuery, PaginationStore};
use tracing::{debug, warn};

/// Trait for sources that report the size of a paginated collection
#[async_trait::async_trait]
pub trait CollectionSource: Send + Sync {
    /// Get the source name, for logging
    fn source_name(&self) -> &str;

    /// Fetch the total item count, given the page currently shown
    async fn total_count(&self, query: &PageQuery) -> anyhow::Result<i64>;
}

/// Refresh `store` from `source`
///
/// On failure the store is left untouched and the error is returned to the
/// caller after being logged.
pub async fn refresh_from(source: &dyn CollectionSource, store: &PaginationStore) -> anyhow::Result<()> {
    let query = store.get_state().query();

    match source.total_count(&query).await {
        Ok(total) => {
            debug!(source = source.source_name(), resource = %store.resource(), total, "refreshed total");
            store.apply_collection_refresh(total);
            Ok(())
        }
        Err(e) => {
            warn!(source = source.source_name(), resource = %store.resource(), "refresh failed: {e:#}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ResourceKind;
    use parking_lot::Mutex;
    use std::num::NonZeroUsize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedSource {
        total: i64,
        queries: Mutex<Vec<PageQuery>>,
    }

    #[async_trait::async_trait]
    impl CollectionSource for FixedSource {
        fn source_name(&self) -> &str {
            "fixed"
        }

        async fn total_count(&self, query: &PageQuery) -> anyhow::Result<i64> {
            self.queries.lock().push(*query);
            Ok(self.total)
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl CollectionSource for FailingSource {
        fn source_name(&self) -> &str {
            "failing"
        }

        async fn total_count(&self, _query: &PageQuery) -> anyhow::Result<i64> {
            anyhow::bail!("connection refused")
        }
    }

    fn store() -> PaginationStore {
        PaginationStore::new(ResourceKind::new("users"), NonZeroUsize::new(20).unwrap())
    }

    #[tokio::test]
    async fn test_refresh_applies_total() {
        let store = store();
        let source = FixedSource {
            total: 95,
            queries: Mutex::new(Vec::new()),
        };

        refresh_from(&source, &store).await.unwrap();

        let state = store.get_state();
        assert_eq!(state.total_count, 95);
        assert_eq!(state.pages, 5);
        assert_eq!(
            *source.queries.lock(),
            vec![PageQuery {
                page: 0,
                page_count: 20
            }]
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_store_untouched() {
        let store = store();
        store.apply_collection_refresh(40);

        let notified = Arc::new(AtomicUsize::new(0));
        let n = notified.clone();
        store.subscribe(move || {
            n.fetch_add(1, Ordering::SeqCst);
        });

        let before = store.get_state();
        assert!(refresh_from(&FailingSource, &store).await.is_err());
        assert!(Arc::ptr_eq(&before, &store.get_state()));
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }
}
