use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// Ledger entry derived from one income source or expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub period: String,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub bank: Option<String>,
    pub date: Option<String>,
    pub receipt_ref: Option<String>,

    // Only set for expenses
    pub is_tax_deductible: Option<bool>,
}
