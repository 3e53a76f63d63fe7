//! Pagination subscriber trait

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for components that need to respond to pagination changes
///
/// Subscribers receive no payload. They re-read the store's snapshot, so
/// being notified twice for the same state must be harmless.
pub trait PaginationSubscriber: Send + Sync {
    /// Called after the store has swapped in a new snapshot
    fn on_pagination_change(&self);
}

impl<F> PaginationSubscriber for F
where
    F: Fn() + Send + Sync,
{
    fn on_pagination_change(&self) {
        self()
    }
}

/// Handle returned by `subscribe`, used to remove the listener again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionHandle(pub(crate) u64);

impl fmt::Display for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}
