//! History backends for URL pushes

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Destination of URLs pushed after id-based navigation
///
/// A browser binding pushes onto the History API; [`MemoryHistory`] keeps entries in process.
#[async_trait]
pub trait History: Send + Sync {
    /// Push `url` as the newest entry
    async fn push(&self, url: &str) -> Result<()>;

    /// Get history backend name
    fn name(&self) -> &'static str;
}

/// In-memory history
///
/// Clones share the same entry list.
#[derive(Clone, Default)]
pub struct MemoryHistory {
    entries: Arc<RwLock<Vec<String>>>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushed URLs, oldest first
    pub async fn entries(&self) -> Vec<String> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl History for MemoryHistory {
    async fn push(&self, url: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.push(url.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
