//! Single-period annualizer.
//!
//! Every period is taxed as if its amounts repeated for a full year, then
//! scaled back down to the period it came from. Monthly periods are
//! multiplied by 12 on the way in and divided by 12 on the way out; the
//! full-year period passes through unchanged.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::{floor_at_zero, max};
use crate::calculations::schedule::{BandTax, progressive_tax};
use crate::models::{PeriodInput, TaxBand, TaxBandEntry};

/// Flat pension contribution, applied to annual gross with no cap.
pub const PENSION_RATE: Decimal = dec!(0.08);
/// Fixed floor of the consolidated relief allowance.
pub const CRA_FIXED_FLOOR: Decimal = dec!(200000);
/// Share of gross compared against the fixed floor.
pub const CRA_GROSS_FLOOR_RATE: Decimal = dec!(0.01);
/// Share of gross always added on top of the floor.
pub const CRA_GROSS_RATE: Decimal = dec!(0.20);

pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Breakdown label used when a flat override rate replaces the schedule.
pub const SPECIALIZED_RATE_LABEL: &str = "Specialized Rate";

/// Annual-scale values kept alongside the per-period ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnualFigures {
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
    pub final_balance: Decimal,
}

/// One period's contribution to a result, in per-output-period terms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeriodContribution {
    pub gross: Decimal,
    pub pension: Decimal,
    pub consolidated_relief: Decimal,
    pub taxable_income: Decimal,
    pub tax: Decimal,
    pub tax_deductible: Decimal,
    pub personal_expenses: Decimal,
    pub net: Decimal,
    pub final_balance: Decimal,
    pub breakdown: Vec<TaxBandEntry>,
    pub annual: AnnualFigures,
}

pub struct PeriodAnnualizer<'a> {
    bands: &'a [TaxBand],
}

impl<'a> PeriodAnnualizer<'a> {
    pub fn new(bands: &'a [TaxBand]) -> Self {
        Self { bands }
    }

    /// Computes the contribution of `period`.
    ///
    /// `override_rate` is a percentage. When present it replaces the
    /// progressive schedule and is applied to annual gross, not to taxable
    /// income. Pension and relief are still computed and reported.
    pub fn contribution(
        &self,
        period: &PeriodInput,
        override_rate: Option<Decimal>,
    ) -> PeriodContribution {
        let factor = Self::annualization_factor(period);

        let period_gross = Self::sum_income(period);
        let (period_deductible, period_personal) = Self::partition_expenses(period);

        let annual_gross = period_gross * factor;
        let annual_deductible = period_deductible * factor;
        let annual_personal = period_personal * factor;

        let pension = Self::pension(annual_gross);
        let relief = Self::consolidated_relief(annual_gross);
        let taxable = Self::taxable_income(annual_gross, relief, pension, annual_deductible);

        let band_tax = match override_rate {
            Some(rate) => Self::override_tax(annual_gross, rate),
            None => progressive_tax(self.bands, taxable),
        };

        let annual_tax = band_tax.total;
        let annual_net = annual_gross - pension - annual_tax - annual_deductible;
        let annual_final = annual_net - annual_personal;

        let breakdown = band_tax
            .breakdown
            .into_iter()
            .map(|entry| TaxBandEntry {
                amount: entry.amount / factor,
                ..entry
            })
            .collect();

        PeriodContribution {
            gross: annual_gross / factor,
            pension: pension / factor,
            consolidated_relief: relief / factor,
            taxable_income: taxable / factor,
            tax: annual_tax / factor,
            tax_deductible: annual_deductible / factor,
            personal_expenses: annual_personal / factor,
            net: annual_net / factor,
            final_balance: annual_final / factor,
            breakdown,
            annual: AnnualFigures {
                gross: annual_gross,
                tax: annual_tax,
                net: annual_net,
                final_balance: annual_final,
            },
        }
    }

    fn annualization_factor(period: &PeriodInput) -> Decimal {
        if period.is_annual {
            Decimal::ONE
        } else {
            MONTHS_PER_YEAR
        }
    }

    fn sum_income(period: &PeriodInput) -> Decimal {
        period.income_sources.iter().map(|s| s.amount).sum()
    }

    /// Returns `(deductible, personal)` expense sums.
    fn partition_expenses(period: &PeriodInput) -> (Decimal, Decimal) {
        period
            .expenses
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(deductible, personal), e| {
                if e.is_tax_deductible {
                    (deductible + e.amount, personal)
                } else {
                    (deductible, personal + e.amount)
                }
            })
    }

    fn pension(annual_gross: Decimal) -> Decimal {
        annual_gross * PENSION_RATE
    }

    /// max(₦200,000, 1% of gross) + 20% of gross.
    fn consolidated_relief(annual_gross: Decimal) -> Decimal {
        max(CRA_FIXED_FLOOR, annual_gross * CRA_GROSS_FLOOR_RATE) + annual_gross * CRA_GROSS_RATE
    }

    fn taxable_income(
        annual_gross: Decimal,
        relief: Decimal,
        pension: Decimal,
        annual_deductible: Decimal,
    ) -> Decimal {
        floor_at_zero(annual_gross - relief - pension - annual_deductible)
    }

    fn override_tax(
        annual_gross: Decimal,
        rate_percent: Decimal,
    ) -> BandTax {
        let rate = rate_percent / dec!(100);
        let total = annual_gross * rate;

        BandTax {
            total,
            breakdown: vec![TaxBandEntry {
                band: SPECIALIZED_RATE_LABEL.to_string(),
                rate,
                amount: total,
            }],
        }
    }
}
