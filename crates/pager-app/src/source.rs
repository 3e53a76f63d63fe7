//! Simulated collection sources for the demo window

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use pager_core::{CollectionSource, PageQuery};

/// Source whose total is set from the UI
pub struct SimulatedSource {
    name: String,
    total: AtomicI64,
    failing: AtomicBool,
    latency: Duration,
}

impl SimulatedSource {
    pub fn new(name: impl Into<String>, total: i64) -> Self {
        Self {
            name: name.into(),
            total: AtomicI64::new(total),
            failing: AtomicBool::new(false),
            latency: Duration::from_millis(150),
        }
    }

    pub fn total(&self) -> i64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn set_total(&self, total: i64) {
        self.total.store(total, Ordering::Relaxed);
    }

    pub fn is_failing(&self) -> bool {
        self.failing.load(Ordering::Relaxed)
    }

    /// Make subsequent fetches fail, to exercise the error path
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl CollectionSource for SimulatedSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn total_count(&self, _query: &PageQuery) -> anyhow::Result<i64> {
        tokio::time::sleep(self.latency).await;
        if self.is_failing() {
            anyhow::bail!("{} is unavailable", self.name);
        }
        Ok(self.total())
    }
}
