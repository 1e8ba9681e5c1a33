use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of a progressive schedule.
///
/// `width` is the slice of taxable income the band covers; `None` means the
/// band absorbs everything that remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxBand {
    pub label: &'static str,
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

/// Tax attributed to one band in a result, denominated per output period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBandEntry {
    pub band: String,
    pub rate: Decimal,
    pub amount: Decimal,
}
