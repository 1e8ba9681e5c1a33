use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{TaxBandEntry, TransactionRecord};

/// Aggregate output of a calculation.
///
/// Monetary fields are annual totals for a full-year request and the
/// combined total of the selected months otherwise. They are never an
/// annual projection of a partial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub consolidated_relief: Decimal,
    pub pension: Decimal,
    pub taxable_income: Decimal,
    pub paye_tax: Decimal,
    pub net_income: Decimal,
    pub breakdown: Vec<TaxBandEntry>,

    pub period_label: String,
    pub duration_months: u32,
    pub selected_periods: Vec<String>,

    /// Percentage, 0 when gross income is 0.
    pub effective_tax_rate: Decimal,
    /// Net income over a 30-day month approximation.
    pub average_daily_net: Decimal,

    pub total_tax_deductible: Decimal,
    pub total_personal_expenses: Decimal,
    pub final_balance: Decimal,

    pub transactions: Vec<TransactionRecord>,
}
