//! Persistence-backed services built on a [`KeyValueStore`].

mod history;
mod reminders;
mod stats;

pub use history::{HISTORY_KEY, HISTORY_LIMIT, HistoryService};
pub use reminders::{REMINDER_TAX_TYPES, REMINDERS_KEY, ReminderService, suggest_due_date};
pub use stats::{INITIAL_USAGE_COUNT, USAGE_COUNT_KEY, UsageCounter};

use crate::db::{KeyValueStore, RepositoryError, update_json};

/// Allocates the next id from a counter stored under `key`. Each id is
/// handed out once, however many handles share the store.
async fn next_id(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<i64, RepositoryError> {
    update_json(store, key, |current: Option<i64>| {
        let next = current.unwrap_or(0) + 1;
        Ok((next, next))
    })
    .await
}
