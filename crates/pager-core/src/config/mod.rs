//! Pager configuration

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::PagerError;

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Configuration for every paginated resource in the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    pub resources: Vec<ResourceConfig>,
}

/// Configuration for a single resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Resource name, used as the store key
    pub name: String,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl ResourceConfig {
    pub fn new(name: impl Into<String>, page_size: usize) -> Self {
        Self {
            name: name.into(),
            page_size,
        }
    }
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            resources: vec![
                ResourceConfig::new("audits", DEFAULT_PAGE_SIZE),
                ResourceConfig::new("users", DEFAULT_PAGE_SIZE),
            ],
        }
    }
}

impl PagerConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, PagerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PagerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check names are unique and non-empty and page sizes are positive
    pub fn validate(&self) -> Result<(), PagerError> {
        let mut seen = HashSet::new();
        for resource in &self.resources {
            let name = resource.name.trim();
            if name.is_empty() {
                return Err(PagerError::Config("resource name must not be empty".to_string()));
            }
            if resource.page_size == 0 {
                return Err(PagerError::InvalidPageSize {
                    resource: name.into(),
                    page_size: 0,
                });
            }
            if !seen.insert(name) {
                return Err(PagerError::Config(format!("duplicate resource '{}'", name)));
            }
        }
        Ok(())
    }

    /// Page size configured for `name`
    pub fn page_size(&self, name: &str) -> Option<usize> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.page_size)
    }
}
