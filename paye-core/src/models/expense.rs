use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub category: String,
    pub amount: Decimal,

    /// Statutory exemptions (NHF, NHIS, life assurance) reduce taxable
    /// income; everything else is personal spending.
    pub is_tax_deductible: bool,

    pub bank: Option<String>,
    pub date: Option<String>,
    pub receipt_ref: Option<String>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
        is_tax_deductible: bool,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            amount,
            is_tax_deductible,
            bank: None,
            date: None,
            receipt_ref: None,
        }
    }
}
