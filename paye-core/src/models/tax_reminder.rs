use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxReminder {
    pub id: i64,
    pub user_id: String,
    pub tax_type: String,
    pub due_date: NaiveDate,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

/// For creating new reminders (no id or timestamps)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaxReminder {
    pub user_id: String,
    pub tax_type: String,
    pub due_date: NaiveDate,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
}
