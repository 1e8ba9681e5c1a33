mod expense;
mod income_source;
mod period_input;
mod saved_calculation;
mod tax_band;
mod tax_reminder;
mod tax_result;
mod transaction;

pub use expense::Expense;
pub use income_source::IncomeSource;
pub use period_input::{FULL_YEAR_LABEL, Month, PeriodInput};
pub use saved_calculation::SavedCalculation;
pub use tax_band::{TaxBand, TaxBandEntry};
pub use tax_reminder::{NewTaxReminder, TaxReminder};
pub use tax_result::TaxResult;
pub use transaction::{TransactionKind, TransactionRecord};
