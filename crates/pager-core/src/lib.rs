//! Core functionality for paginated collection views
//!
//! This crate provides the pagination state, the per-resource stores that
//! own it, and the window calculation shared by every pager widget.

pub mod config;
pub mod events;
pub mod pagination;
pub mod registry;
pub mod source;

use thiserror::Error;

// Re-export commonly used types
pub use config::{PagerConfig, ResourceConfig};
pub use events::{ListenerId, StoreEvent, StoreEvents};
pub use pagination::{
    Affordance, PageQuery, PageWindow, PaginationState, PaginationStore,
    PaginationSubscriber, SubscriptionHandle,
};
pub use registry::{ResourceKind, StoreRegistry};
pub use source::{refresh_from, CollectionSource};

/// Errors raised at the edges of the pager core
///
/// Navigation and refresh never fail; these only come from configuration
/// and store registration.
#[derive(Error, Debug)]
pub enum PagerError {
    #[error("a store for resource '{0}' is already registered")]
    AlreadyRegistered(ResourceKind),

    #[error("invalid page size {page_size} for resource '{resource}'")]
    InvalidPageSize {
        resource: ResourceKind,
        page_size: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
