use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::next_id;
use crate::db::{KeyValueStore, RepositoryError, load_json, update_json};
use crate::models::{SavedCalculation, TaxResult};

pub const HISTORY_KEY: &str = "paye_history";
const HISTORY_SEQUENCE_KEY: &str = "paye_history:next_id";

/// Only the most recent calculations are kept.
pub const HISTORY_LIMIT: usize = 10;

/// Saved calculations, newest first.
pub struct HistoryService {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stores `result` at the front of the history and drops anything past
    /// [`HISTORY_LIMIT`].
    pub async fn save(
        &self,
        result: TaxResult,
    ) -> Result<SavedCalculation, RepositoryError> {
        let saved = SavedCalculation {
            id: next_id(self.store.as_ref(), HISTORY_SEQUENCE_KEY).await?,
            timestamp: Utc::now(),
            result,
        };

        let entry = saved.clone();
        let kept = update_json(
            self.store.as_ref(),
            HISTORY_KEY,
            move |current: Option<Vec<SavedCalculation>>| {
                let mut entries = current.unwrap_or_default();
                entries.insert(0, entry);
                entries.truncate(HISTORY_LIMIT);
                let kept = entries.len();
                Ok((entries, kept))
            },
        )
        .await?;

        info!(id = saved.id, kept, "Saved calculation to history");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<SavedCalculation>, RepositoryError> {
        self.load().await
    }

    pub async fn get(
        &self,
        id: i64,
    ) -> Result<SavedCalculation, RepositoryError> {
        self.load()
            .await?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or(RepositoryError::NotFound)
    }

    /// Returns `true` when an entry was removed.
    pub async fn delete(
        &self,
        id: i64,
    ) -> Result<bool, RepositoryError> {
        let removed = update_json(
            self.store.as_ref(),
            HISTORY_KEY,
            |current: Option<Vec<SavedCalculation>>| {
                let mut entries = current.unwrap_or_default();
                let before = entries.len();
                entries.retain(|entry| entry.id != id);
                let removed = entries.len() < before;
                Ok((entries, removed))
            },
        )
        .await?;

        if removed {
            info!(id, "Deleted calculation from history");
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.store.delete(HISTORY_KEY).await?;
        info!("Cleared calculation history");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<SavedCalculation>, RepositoryError> {
        Ok(load_json(self.store.as_ref(), HISTORY_KEY)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::compute;
    use crate::db::MemoryStore;
    use crate::models::{IncomeSource, Month, PeriodInput};

    fn result_for(amount: Decimal) -> TaxResult {
        let period = PeriodInput::monthly(
            Month::January,
            vec![IncomeSource::new("Jan-1", "Salary", amount)],
            vec![],
        );
        compute(&[period], None)
    }

    fn service() -> HistoryService {
        HistoryService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn save_assigns_increasing_ids() {
        let history = service();

        let first = history.save(result_for(dec!(100000))).await.unwrap();
        let second = history.save(result_for(dec!(200000))).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let history = service();
        history.save(result_for(dec!(100000))).await.unwrap();
        history.save(result_for(dec!(200000))).await.unwrap();

        let entries = history.list().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].result.gross_income, dec!(200000));
        assert_eq!(entries[1].result.gross_income, dec!(100000));
    }

    #[tokio::test]
    async fn keeps_only_ten_most_recent() {
        let history = service();
        for i in 1..=12 {
            history.save(result_for(Decimal::from(i * 1000))).await.unwrap();
        }

        let entries = history.list().await.unwrap();

        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].id, 12);
        assert_eq!(entries[9].id, 3);
    }

    #[tokio::test]
    async fn saved_result_round_trips_unchanged() {
        let history = service();
        let result = result_for(dec!(500000));

        let saved = history.save(result.clone()).await.unwrap();

        assert_eq!(history.get(saved.id).await.unwrap().result, result);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        assert_eq!(service().get(42).await, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_single_entry() {
        let history = service();
        let a = history.save(result_for(dec!(1000))).await.unwrap();
        let b = history.save(result_for(dec!(2000))).await.unwrap();

        assert!(history.delete(a.id).await.unwrap());
        assert!(!history.delete(a.id).await.unwrap());

        let ids: Vec<i64> = history.list().await.unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![b.id]);
    }

    #[tokio::test]
    async fn clear_empties_history_but_ids_keep_increasing() {
        let history = service();
        history.save(result_for(dec!(1000))).await.unwrap();

        history.clear().await.unwrap();
        let next = history.save(result_for(dec!(1000))).await.unwrap();

        assert_eq!(history.list().await.unwrap().len(), 1);
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn separate_services_on_one_store_never_share_ids() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let tasks: Vec<_> = (1..=8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    HistoryService::new(store)
                        .save(result_for(Decimal::from(i * 1000)))
                        .await
                })
            })
            .collect();
        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=8).collect::<Vec<i64>>());
        assert_eq!(HistoryService::new(store).list().await.unwrap().len(), 8);
    }
}
