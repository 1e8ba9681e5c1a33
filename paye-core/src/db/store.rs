use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Computes the next value of a key from its current one.
pub type Mutation<'a> = Box<dyn FnOnce(Option<String>) -> Result<String, RepositoryError> + Send + 'a>;

/// String key-value persistence shared by history, usage and reminders.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, RepositoryError>;

    /// Inserts or overwrites `key`.
    async fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), RepositoryError>;

    /// Returns `true` when a value was removed.
    async fn delete(
        &self,
        key: &str,
    ) -> Result<bool, RepositoryError>;

    /// Replaces `key` with `mutation(current)` as one atomic step: no other
    /// write to `key` lands between the read and the write, across store
    /// handles and, for shared backends, across processes. Nothing is written
    /// when `mutation` fails.
    async fn update(
        &self,
        key: &str,
        mutation: Mutation<'_>,
    ) -> Result<(), RepositoryError>;
}

/// Reads and decodes a JSON document, `None` when the key is absent.
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, RepositoryError> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Atomically decodes the document under `key`, hands it to `f`, and stores
/// the document `f` returns. Yields the second half of `f`'s output.
pub async fn update_json<T, R, F>(
    store: &dyn KeyValueStore,
    key: &str,
    f: F,
) -> Result<R, RepositoryError>
where
    T: DeserializeOwned + Serialize,
    R: Send,
    F: FnOnce(Option<T>) -> Result<(T, R), RepositoryError> + Send,
{
    let mut output = None;
    let slot = &mut output;

    store
        .update(
            key,
            Box::new(move |current: Option<String>| -> Result<String, RepositoryError> {
                let current = current
                    .map(|raw| serde_json::from_str::<T>(&raw))
                    .transpose()?;
                let (next, out) = f(current)?;
                *slot = Some(out);
                Ok(serde_json::to_string(&next)?)
            }),
        )
        .await?;

    output.ok_or_else(|| RepositoryError::Database(format!("update of '{key}' did not run")))
}
