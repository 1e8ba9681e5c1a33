use std::sync::Arc;

use tracing::info;

use crate::db::{KeyValueStore, RepositoryError, update_json};

pub const USAGE_COUNT_KEY: &str = "usage_count";

/// Value the counter starts from on first read.
pub const INITIAL_USAGE_COUNT: u64 = 14520;

/// Number of calculations performed.
pub struct UsageCounter {
    store: Arc<dyn KeyValueStore>,
}

impl UsageCounter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current count, initialised to [`INITIAL_USAGE_COUNT`] when unset.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        self.apply(0).await
    }

    /// Returns the new count.
    pub async fn increment(&self) -> Result<u64, RepositoryError> {
        let next = self.apply(1).await?;
        info!(count = next, "Usage counter incremented");
        Ok(next)
    }

    async fn apply(
        &self,
        step: u64,
    ) -> Result<u64, RepositoryError> {
        update_json(self.store.as_ref(), USAGE_COUNT_KEY, move |current: Option<u64>| {
            let next = current.unwrap_or(INITIAL_USAGE_COUNT) + step;
            Ok((next, next))
        })
        .await
    }
}
