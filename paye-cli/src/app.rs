use std::sync::Arc;

use anyhow::{Context, Result};
use paye_core::db::{KeyValueStore, MemoryStoreFactory, RepositoryRegistry};
use paye_core::services::{HistoryService, ReminderService, UsageCounter};
use paye_db_sqlite::SqliteStoreFactory;
use tracing::debug;

use crate::config::Settings;

/// Builds the repository registry with all available backends.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(MemoryStoreFactory));
    registry.register(Box::new(SqliteStoreFactory));
    registry
}

/// Open store plus the settings every command reads.
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub settings: Settings,
}

impl AppContext {
    pub async fn open(settings: Settings) -> Result<Self> {
        debug!("connecting to {} backend", settings.db.backend);

        let store = build_registry()
            .create(&settings.db)
            .await
            .with_context(|| format!("Failed to open '{}' store", settings.db.backend))?;

        Ok(Self {
            store: Arc::from(store),
            settings,
        })
    }

    pub fn history(&self) -> HistoryService {
        HistoryService::new(Arc::clone(&self.store))
    }

    pub fn usage(&self) -> UsageCounter {
        UsageCounter::new(Arc::clone(&self.store))
    }

    pub fn reminders(&self) -> ReminderService {
        ReminderService::new(Arc::clone(&self.store))
    }
}
