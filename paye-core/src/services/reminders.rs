use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use super::next_id;
use crate::db::{KeyValueStore, RepositoryError, load_json, update_json};
use crate::models::{NewTaxReminder, TaxReminder};

pub const REMINDERS_KEY: &str = "tax_reminders";
const REMINDERS_SEQUENCE_KEY: &str = "tax_reminders:next_id";

pub const REMINDER_TAX_TYPES: [&str; 8] = [
    "PAYE Tax",
    "VAT (Sales Tax)",
    "WHT (Rent)",
    "WHT (Contract)",
    "CIT (Company)",
    "Capital Gains Tax",
    "Development Levy",
    "Stamp Duty",
];

const DEFAULT_FILING_DAY: u32 = 10;
const VAT_FILING_DAY: u32 = 21;

/// Filing deadline in the month after `today`: the 21st for VAT, the 10th
/// for everything else.
pub fn suggest_due_date(
    tax_type: &str,
    today: NaiveDate,
) -> NaiveDate {
    let day = if tax_type.contains("VAT") {
        VAT_FILING_DAY
    } else {
        DEFAULT_FILING_DAY
    };

    today
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next_month| next_month.with_day(day))
        .unwrap_or(today)
}

/// Filing reminders, stored as one document for all users.
pub struct ReminderService {
    store: Arc<dyn KeyValueStore>,
}

impl ReminderService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn add(
        &self,
        new: NewTaxReminder,
    ) -> Result<TaxReminder, RepositoryError> {
        let reminder = TaxReminder {
            id: next_id(self.store.as_ref(), REMINDERS_SEQUENCE_KEY).await?,
            user_id: new.user_id,
            tax_type: new.tax_type,
            due_date: new.due_date,
            amount: new.amount,
            notes: new.notes,
            is_completed: false,
            created_at: Utc::now(),
        };

        let entry = reminder.clone();
        update_json(
            self.store.as_ref(),
            REMINDERS_KEY,
            move |current: Option<Vec<TaxReminder>>| {
                let mut reminders = current.unwrap_or_default();
                reminders.push(entry);
                Ok((reminders, ()))
            },
        )
        .await?;

        info!(
            id = reminder.id,
            tax_type = %reminder.tax_type,
            due = %reminder.due_date,
            "Added tax reminder"
        );
        Ok(reminder)
    }

    /// Reminders owned by `user_id`, earliest due date first.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TaxReminder>, RepositoryError> {
        let mut reminders: Vec<_> = self
            .load()
            .await?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        reminders.sort_by_key(|r| (r.due_date, r.id));
        Ok(reminders)
    }

    pub async fn set_completed(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<TaxReminder, RepositoryError> {
        let updated = update_json(
            self.store.as_ref(),
            REMINDERS_KEY,
            |current: Option<Vec<TaxReminder>>| {
                let mut reminders = current.unwrap_or_default();
                let reminder = reminders
                    .iter_mut()
                    .find(|r| r.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                reminder.is_completed = is_completed;
                let updated = reminder.clone();
                Ok((reminders, updated))
            },
        )
        .await?;

        info!(id, is_completed, "Updated tax reminder");
        Ok(updated)
    }

    /// Returns `true` when a reminder was removed.
    pub async fn delete(
        &self,
        id: i64,
    ) -> Result<bool, RepositoryError> {
        let removed = update_json(
            self.store.as_ref(),
            REMINDERS_KEY,
            |current: Option<Vec<TaxReminder>>| {
                let mut reminders = current.unwrap_or_default();
                let before = reminders.len();
                reminders.retain(|r| r.id != id);
                let removed = reminders.len() < before;
                Ok((reminders, removed))
            },
        )
        .await?;

        if removed {
            info!(id, "Deleted tax reminder");
        }
        Ok(removed)
    }

    /// Sum of amounts on the user's incomplete reminders.
    pub async fn outstanding_total(
        &self,
        user_id: &str,
    ) -> Result<Decimal, RepositoryError> {
        Ok(self
            .list_for_user(user_id)
            .await?
            .iter()
            .filter(|r| !r.is_completed)
            .filter_map(|r| r.amount)
            .sum())
    }

    async fn load(&self) -> Result<Vec<TaxReminder>, RepositoryError> {
        Ok(load_json(self.store.as_ref(), REMINDERS_KEY)
            .await?
            .unwrap_or_default())
    }
}
