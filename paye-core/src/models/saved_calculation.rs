use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaxResult;

/// A calculation stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub result: TaxResult,
}
