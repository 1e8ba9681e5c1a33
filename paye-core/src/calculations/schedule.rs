//! The statutory PAYE band schedule and the progressive band walk.
//!
//! | Band          | Width       | Rate |
//! |---------------|-------------|------|
//! | First ₦800k   | 800,000     | 0%   |
//! | ₦800k - ₦3M   | 2,200,000   | 15%  |
//! | ₦3M - ₦12M    | 9,000,000   | 18%  |
//! | ₦12M - ₦50M   | 38,000,000  | 21%  |
//! | Above ₦50M    | remainder   | 23%  |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{TaxBand, TaxBandEntry};

pub static STATUTORY_BANDS: [TaxBand; 5] = [
    TaxBand {
        label: "First ₦800k",
        width: Some(dec!(800000)),
        rate: dec!(0.00),
    },
    TaxBand {
        label: "₦800k - ₦3M",
        width: Some(dec!(2200000)),
        rate: dec!(0.15),
    },
    TaxBand {
        label: "₦3M - ₦12M",
        width: Some(dec!(9000000)),
        rate: dec!(0.18),
    },
    TaxBand {
        label: "₦12M - ₦50M",
        width: Some(dec!(38000000)),
        rate: dec!(0.21),
    },
    TaxBand {
        label: "Above ₦50M",
        width: None,
        rate: dec!(0.23),
    },
];

/// Annual tax produced by walking a band schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTax {
    pub total: Decimal,
    pub breakdown: Vec<TaxBandEntry>,
}

/// Applies `bands` in order, each consuming up to its width of the remaining
/// taxable income at its marginal rate.
///
/// Only bands that produce tax appear in the breakdown, so the 0% band and
/// bands never reached are left out.
pub fn progressive_tax(
    bands: &[TaxBand],
    taxable_income: Decimal,
) -> BandTax {
    let mut remaining = taxable_income;
    let mut total = Decimal::ZERO;
    let mut breakdown = Vec::new();

    for band in bands {
        if remaining <= Decimal::ZERO {
            break;
        }

        let slice = match band.width {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = slice * band.rate;
        total += tax;
        remaining -= slice;

        if tax > Decimal::ZERO {
            breakdown.push(TaxBandEntry {
                band: band.label.to_string(),
                rate: band.rate,
                amount: tax,
            });
        }
    }

    BandTax { total, breakdown }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn labels(result: &BandTax) -> Vec<&str> {
        result.breakdown.iter().map(|e| e.band.as_str()).collect()
    }

    #[test]
    fn zero_income_has_no_tax() {
        let result = progressive_tax(&STATUTORY_BANDS, Decimal::ZERO);

        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn income_inside_tax_free_band_has_no_tax() {
        let result = progressive_tax(&STATUTORY_BANDS, dec!(800000));

        assert_eq!(result.total, Decimal::ZERO);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn second_band_taxed_at_fifteen_percent() {
        let result = progressive_tax(&STATUTORY_BANDS, dec!(1800000));

        // 1,000,000 above the tax-free band at 15%
        assert_eq!(result.total, dec!(150000));
        assert_eq!(labels(&result), vec!["₦800k - ₦3M"]);
    }

    #[test]
    fn spans_three_bands() {
        let result = progressive_tax(&STATUTORY_BANDS, dec!(4120000));

        // 2,200,000 * 0.15 = 330,000; 1,120,000 * 0.18 = 201,600
        assert_eq!(result.total, dec!(531600));
        assert_eq!(result.breakdown[0].amount, dec!(330000));
        assert_eq!(result.breakdown[1].amount, dec!(201600));
        assert_eq!(result.breakdown[1].rate, dec!(0.18));
    }

    #[test]
    fn top_band_absorbs_remainder() {
        let result = progressive_tax(&STATUTORY_BANDS, dec!(60000000));

        // 330,000 + 1,620,000 + 7,980,000 + 10,000,000 * 0.23
        assert_eq!(result.total, dec!(12230000));
        assert_eq!(
            labels(&result),
            vec!["₦800k - ₦3M", "₦3M - ₦12M", "₦12M - ₦50M", "Above ₦50M"]
        );
    }

    #[test]
    fn breakdown_sums_to_total() {
        for income in [dec!(950000), dec!(3000000), dec!(12500000), dec!(75000000)] {
            let result = progressive_tax(&STATUTORY_BANDS, income);
            let sum: Decimal = result.breakdown.iter().map(|e| e.amount).sum();

            assert_eq!(sum, result.total, "band sum mismatch for {income}");
        }
    }

    #[test]
    fn empty_schedule_yields_no_tax() {
        let result = progressive_tax(&[], dec!(5000000));

        assert_eq!(result.total, Decimal::ZERO);
    }
}
