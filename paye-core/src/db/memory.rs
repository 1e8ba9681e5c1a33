//! Process-local store, used for ad-hoc runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::factory::{DbConfig, RepositoryFactory};
use super::store::{KeyValueStore, Mutation, RepositoryError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(
        &self,
        key: &str,
    ) -> Result<bool, RepositoryError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn update(
        &self,
        key: &str,
        mutation: Mutation<'_>,
    ) -> Result<(), RepositoryError> {
        // The write guard spans the read and the write
        let mut entries = self.entries.write().await;
        let next = mutation(entries.get(key).cloned())?;
        entries.insert(key.to_string(), next);
        Ok(())
    }
}

pub struct MemoryStoreFactory;

#[async_trait]
impl RepositoryFactory for MemoryStoreFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn KeyValueStore>, RepositoryError> {
        Ok(Box::new(MemoryStore::new()))
    }
}
