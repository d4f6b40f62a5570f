//! Single-slot holder for the most recent query result.
//!
//! The dispatcher is the only writer; readers (the result views) clone the
//! current value. Concurrent dispatches race and the last one to finish wins.

use models::QueryResult;

use log::debug;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct ResultCache {
    slot: RwLock<Option<QueryResult>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached result unconditionally.
    pub async fn set(&self, result: QueryResult) {
        let mut slot = self.slot.write().await;
        if slot.is_some() {
            debug!("Replacing cached query result");
        }
        *slot = Some(result);
    }

    pub async fn get(&self) -> Option<QueryResult> {
        self.slot.read().await.clone()
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    pub async fn is_empty(&self) -> bool {
        self.slot.read().await.is_none()
    }
}
