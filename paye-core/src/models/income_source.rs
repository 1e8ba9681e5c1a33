use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One income line for a period. `amount` is period-local: a monthly figure
/// for monthly periods, an annual total for the full-year period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub bank: Option<String>,
    pub date: Option<String>,
    pub receipt_ref: Option<String>,
}

impl IncomeSource {
    /// Creates an income line with no bank, date or receipt metadata.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            amount,
            bank: None,
            date: None,
            receipt_ref: None,
        }
    }
}
