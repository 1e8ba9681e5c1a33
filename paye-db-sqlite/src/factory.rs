use async_trait::async_trait;
use paye_core::db::{DbConfig, KeyValueStore, RepositoryError, RepositoryFactory};

use crate::repository::SqliteStore;

/// Maps a user-supplied connection string to a sqlx URL.
///
/// * `""` or `":memory:"` become `sqlite::memory:`.
/// * Strings already starting with `sqlite:` pass through.
/// * Anything else is treated as a file path.
pub fn database_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();

    if trimmed.is_empty() || trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else {
        format!("sqlite://{trimmed}")
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// ```rust,no_run
/// use paye_core::db::RepositoryRegistry;
/// use paye_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl RepositoryFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn KeyValueStore>, RepositoryError> {
        let store = SqliteStore::new(&database_url(&config.connection_string)).await?;
        store.run_migrations().await?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use paye_core::db::{DbConfig, RepositoryFactory};
    use pretty_assertions::assert_eq;

    use super::{SqliteStoreFactory, database_url};

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[test]
    fn memory_strings_map_to_memory_url() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url(""), "sqlite::memory:");
    }

    #[test]
    fn urls_pass_through() {
        assert_eq!(database_url("sqlite://data/paye.db"), "sqlite://data/paye.db");
    }

    #[test]
    fn bare_paths_become_urls() {
        assert_eq!(database_url("paye.db"), "sqlite://paye.db");
        assert_eq!(database_url("/var/lib/paye.db"), "sqlite:///var/lib/paye.db");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = DbConfig::new("sqlite", ":memory:");

        let store = SqliteStoreFactory
            .create(&config)
            .await
            .expect("failed to create in-memory store");

        store.set("k", "v").await.expect("set");
        assert_eq!(store.get("k").await.expect("get"), Some("v".to_string()));
    }
}
