//! Combines per-period contributions into one [`TaxResult`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::common::safe_div;
use crate::calculations::period::{PeriodAnnualizer, PeriodContribution};
use crate::calculations::schedule::STATUTORY_BANDS;
use crate::models::{
    FULL_YEAR_LABEL, PeriodInput, TaxBand, TaxBandEntry, TaxResult, TransactionKind,
    TransactionRecord,
};
use crate::validation::{ValidationError, validate_request};

const DAYS_PER_MONTH: Decimal = dec!(30);

pub struct PayeCalculator<'a> {
    bands: &'a [TaxBand],
}

impl<'a> PayeCalculator<'a> {
    pub fn new(bands: &'a [TaxBand]) -> Self {
        Self { bands }
    }

    /// Calculator using the statutory band schedule.
    pub fn statutory() -> PayeCalculator<'static> {
        PayeCalculator::new(&STATUTORY_BANDS)
    }

    /// Computes a result for one annual period or up to twelve monthly ones.
    ///
    /// Input is not validated here; see [`PayeCalculator::compute_checked`].
    pub fn compute(
        &self,
        periods: &[PeriodInput],
        override_rate: Option<Decimal>,
    ) -> TaxResult {
        let annualizer = PeriodAnnualizer::new(self.bands);
        let contributions: Vec<PeriodContribution> = periods
            .iter()
            .map(|p| annualizer.contribution(p, override_rate))
            .collect();

        let totals = Self::totals(periods, &contributions);
        let breakdown = Self::merge_breakdowns(&contributions);
        let duration_months = Self::duration_months(periods);
        let period_label = Self::period_label(periods);

        let effective_tax_rate = if totals.gross > Decimal::ZERO {
            totals.tax / totals.gross * dec!(100)
        } else {
            Decimal::ZERO
        };
        let average_daily_net = safe_div(
            totals.net,
            Decimal::from(duration_months) * DAYS_PER_MONTH,
        );

        debug!(
            periods = periods.len(),
            label = %period_label,
            gross = %totals.gross,
            tax = %totals.tax,
            "PAYE calculation complete"
        );

        TaxResult {
            gross_income: totals.gross,
            consolidated_relief: totals.consolidated_relief,
            pension: totals.pension,
            taxable_income: totals.taxable_income,
            paye_tax: totals.tax,
            net_income: totals.net,
            breakdown,
            period_label,
            duration_months,
            selected_periods: periods.iter().map(|p| p.label.clone()).collect(),
            effective_tax_rate,
            average_daily_net,
            total_tax_deductible: totals.tax_deductible,
            total_personal_expenses: totals.personal_expenses,
            final_balance: totals.final_balance,
            transactions: Self::build_ledger(periods),
        }
    }

    /// Validates the request before computing.
    pub fn compute_checked(
        &self,
        periods: &[PeriodInput],
        override_rate: Option<Decimal>,
    ) -> Result<TaxResult, ValidationError> {
        validate_request(periods, override_rate)?;
        Ok(self.compute(periods, override_rate))
    }

    fn sum_contributions(contributions: &[PeriodContribution]) -> PeriodContribution {
        contributions
            .iter()
            .fold(PeriodContribution::default(), |mut acc, c| {
                acc.gross += c.gross;
                acc.pension += c.pension;
                acc.consolidated_relief += c.consolidated_relief;
                acc.taxable_income += c.taxable_income;
                acc.tax += c.tax;
                acc.tax_deductible += c.tax_deductible;
                acc.personal_expenses += c.personal_expenses;
                acc.net += c.net;
                acc.final_balance += c.final_balance;
                acc
            })
    }

    /// Summed contributions, except that a lone full-year period reports its
    /// annual-scale gross, tax, net and balance directly.
    fn totals(
        periods: &[PeriodInput],
        contributions: &[PeriodContribution],
    ) -> PeriodContribution {
        let mut totals = Self::sum_contributions(contributions);

        if let (true, [only]) = (Self::is_single_annual(periods), contributions) {
            totals.gross = only.annual.gross;
            totals.tax = only.annual.tax;
            totals.net = only.annual.net;
            totals.final_balance = only.annual.final_balance;
        }

        totals
    }

    /// Sums band amounts by label, keeping the order labels first appear in.
    fn merge_breakdowns(contributions: &[PeriodContribution]) -> Vec<TaxBandEntry> {
        let mut merged: Vec<TaxBandEntry> = Vec::new();

        for entry in contributions.iter().flat_map(|c| &c.breakdown) {
            match merged.iter_mut().find(|m| m.band == entry.band) {
                Some(existing) => existing.amount += entry.amount,
                None => merged.push(entry.clone()),
            }
        }

        merged
    }

    fn build_ledger(periods: &[PeriodInput]) -> Vec<TransactionRecord> {
        let mut ledger = Vec::with_capacity(periods.iter().map(PeriodInput::entry_count).sum());

        for period in periods {
            ledger.extend(period.income_sources.iter().map(|income| TransactionRecord {
                id: income.id.clone(),
                period: period.label.clone(),
                kind: TransactionKind::Income,
                description: income.description.clone(),
                amount: income.amount,
                bank: income.bank.clone(),
                date: income.date.clone(),
                receipt_ref: income.receipt_ref.clone(),
                is_tax_deductible: None,
            }));
            ledger.extend(period.expenses.iter().map(|expense| TransactionRecord {
                id: expense.id.clone(),
                period: period.label.clone(),
                kind: TransactionKind::Expense,
                description: expense.category.clone(),
                amount: expense.amount,
                bank: expense.bank.clone(),
                date: expense.date.clone(),
                receipt_ref: expense.receipt_ref.clone(),
                is_tax_deductible: Some(expense.is_tax_deductible),
            }));
        }

        ledger
    }

    fn is_single_annual(periods: &[PeriodInput]) -> bool {
        matches!(periods, [only] if only.is_annual)
    }

    fn period_label(periods: &[PeriodInput]) -> String {
        if Self::is_single_annual(periods) {
            return format!("Annual ({FULL_YEAR_LABEL})");
        }

        match periods {
            [only] => only.label.clone(),
            _ if periods.len() == 12 => "Annual (Breakdown)".to_string(),
            _ => format!("{} Selected Months", periods.len()),
        }
    }

    fn duration_months(periods: &[PeriodInput]) -> u32 {
        if Self::is_single_annual(periods) {
            12
        } else {
            periods.len() as u32
        }
    }
}

impl Default for PayeCalculator<'static> {
    fn default() -> Self {
        Self::statutory()
    }
}

/// Computes with the statutory schedule.
pub fn compute(
    periods: &[PeriodInput],
    override_rate: Option<Decimal>,
) -> TaxResult {
    PayeCalculator::statutory().compute(periods, override_rate)
}

/// Validates, then computes with the statutory schedule.
pub fn compute_checked(
    periods: &[PeriodInput],
    override_rate: Option<Decimal>,
) -> Result<TaxResult, ValidationError> {
    PayeCalculator::statutory().compute_checked(periods, override_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::calculations::period::AnnualFigures;
    use crate::models::{Expense, IncomeSource, Month};

    fn salary_month(
        month: Month,
        amount: Decimal,
    ) -> PeriodInput {
        let id = format!("{}-1", month.as_str());
        PeriodInput::monthly(month, vec![IncomeSource::new(id, "Salary", amount)], vec![])
    }

    fn contribution_with(breakdown: Vec<(&str, Decimal)>) -> PeriodContribution {
        PeriodContribution {
            breakdown: breakdown
                .into_iter()
                .map(|(band, amount)| TaxBandEntry {
                    band: band.to_string(),
                    rate: dec!(0.15),
                    amount,
                })
                .collect(),
            ..PeriodContribution::default()
        }
    }

    // =========================================================================
    // period_label tests
    // =========================================================================

    #[test]
    fn label_for_full_year() {
        let periods = vec![PeriodInput::full_year(vec![], vec![])];

        assert_eq!(PayeCalculator::period_label(&periods), "Annual (Full Year)");
        assert_eq!(PayeCalculator::duration_months(&periods), 12);
    }

    #[test]
    fn label_for_single_month_is_month() {
        let periods = vec![salary_month(Month::March, dec!(1))];

        assert_eq!(PayeCalculator::period_label(&periods), "Mar");
        assert_eq!(PayeCalculator::duration_months(&periods), 1);
    }

    #[test]
    fn label_for_twelve_months() {
        let periods: Vec<_> = Month::ALL.iter().map(|m| salary_month(*m, dec!(1))).collect();

        assert_eq!(PayeCalculator::period_label(&periods), "Annual (Breakdown)");
        assert_eq!(PayeCalculator::duration_months(&periods), 12);
    }

    #[test]
    fn label_for_some_months() {
        let periods = vec![
            salary_month(Month::January, dec!(1)),
            salary_month(Month::February, dec!(1)),
            salary_month(Month::March, dec!(1)),
        ];

        assert_eq!(PayeCalculator::period_label(&periods), "3 Selected Months");
        assert_eq!(PayeCalculator::duration_months(&periods), 3);
    }

    // =========================================================================
    // totals tests
    // =========================================================================

    fn contribution_scaled(
        per_period: Decimal,
        annual: Decimal,
    ) -> PeriodContribution {
        PeriodContribution {
            gross: per_period,
            tax: per_period,
            net: per_period,
            final_balance: per_period,
            annual: AnnualFigures {
                gross: annual,
                tax: annual,
                net: annual,
                final_balance: annual,
            },
            ..PeriodContribution::default()
        }
    }

    #[test]
    fn full_year_totals_use_annual_figures() {
        let periods = vec![PeriodInput::full_year(vec![], vec![])];
        let contributions = vec![contribution_scaled(dec!(1), dec!(12))];

        let totals = PayeCalculator::totals(&periods, &contributions);

        assert_eq!(totals.gross, dec!(12));
        assert_eq!(totals.tax, dec!(12));
        assert_eq!(totals.net, dec!(12));
        assert_eq!(totals.final_balance, dec!(12));
    }

    #[test]
    fn monthly_totals_sum_per_period_figures() {
        let periods = vec![
            salary_month(Month::January, dec!(1)),
            salary_month(Month::February, dec!(1)),
        ];
        let contributions = vec![
            contribution_scaled(dec!(1), dec!(12)),
            contribution_scaled(dec!(2), dec!(24)),
        ];

        let totals = PayeCalculator::totals(&periods, &contributions);

        assert_eq!(totals.gross, dec!(3));
        assert_eq!(totals.final_balance, dec!(3));
    }

    // =========================================================================
    // merge_breakdowns tests
    // =========================================================================

    #[test]
    fn merge_sums_matching_labels_in_first_seen_order() {
        let contributions = vec![
            contribution_with(vec![("₦800k - ₦3M", dec!(100))]),
            contribution_with(vec![("₦800k - ₦3M", dec!(50)), ("₦3M - ₦12M", dec!(20))]),
        ];

        let merged = PayeCalculator::merge_breakdowns(&contributions);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].band, "₦800k - ₦3M");
        assert_eq!(merged[0].amount, dec!(150));
        assert_eq!(merged[1].band, "₦3M - ₦12M");
        assert_eq!(merged[1].amount, dec!(20));
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        assert!(PayeCalculator::merge_breakdowns(&[]).is_empty());
    }

    // =========================================================================
    // build_ledger tests
    // =========================================================================

    #[test]
    fn ledger_lists_income_before_expenses_per_period() {
        let mut jan = salary_month(Month::January, dec!(300000));
        jan.expenses.push(Expense::new("Jan-2", "Rent", dec!(100000), false));
        let mut feb = salary_month(Month::February, dec!(300000));
        feb.income_sources[0].bank = Some("Zenith".to_string());

        let ledger = PayeCalculator::build_ledger(&[jan, feb]);

        let ids: Vec<&str> = ledger.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["Jan-1", "Jan-2", "Feb-1"]);
        assert_eq!(ledger[0].kind, TransactionKind::Income);
        assert_eq!(ledger[0].is_tax_deductible, None);
        assert_eq!(ledger[1].kind, TransactionKind::Expense);
        assert_eq!(ledger[1].is_tax_deductible, Some(false));
        assert_eq!(ledger[2].bank.as_deref(), Some("Zenith"));
        assert_eq!(ledger[2].period, "Feb");
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn compute_sums_months() {
        let periods = vec![
            salary_month(Month::January, dec!(500000)),
            salary_month(Month::February, dec!(500000)),
        ];

        let result = compute(&periods, None);

        assert_eq!(result.gross_income, dec!(1000000));
        assert_eq!(result.paye_tax, dec!(88600));
        assert_eq!(result.selected_periods, vec!["Jan", "Feb"]);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].amount, dec!(55000));
    }

    #[test]
    fn compute_with_no_gross_has_zero_effective_rate() {
        let periods = vec![PeriodInput::monthly(Month::July, vec![], vec![])];

        let result = compute(&periods, None);

        assert_eq!(result.effective_tax_rate, Decimal::ZERO);
        assert_eq!(result.paye_tax, Decimal::ZERO);
    }

    #[test]
    fn compute_on_empty_request_does_not_panic() {
        let result = compute(&[], None);

        assert_eq!(result.duration_months, 0);
        assert_eq!(result.average_daily_net, Decimal::ZERO);
    }

    #[test]
    fn compute_checked_rejects_empty_request() {
        assert_eq!(compute_checked(&[], None), Err(ValidationError::NoPeriods));
    }

    #[test]
    fn default_calculator_is_statutory() {
        let periods = vec![salary_month(Month::January, dec!(500000))];

        assert_eq!(
            PayeCalculator::default().compute(&periods, None),
            compute(&periods, None)
        );
    }
}
