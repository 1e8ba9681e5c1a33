//! Request checks applied before a calculation.
//!
//! The engine accepts anything; these rules are what a caller must enforce
//! for the result to be meaningful.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::models::{FULL_YEAR_LABEL, PeriodInput};

pub const MAX_MONTHLY_PERIODS: usize = 12;

/// Largest single income or expense amount accepted (one quadrillion).
/// Keeps annualised totals and band arithmetic inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No periods selected")]
    NoPeriods,

    #[error("At most {MAX_MONTHLY_PERIODS} monthly periods can be combined, got {0}")]
    TooManyPeriods(usize),

    #[error("A full-year period cannot be combined with other periods")]
    MixedPeriods,

    #[error("Period {0} appears more than once")]
    DuplicatePeriod(String),

    #[error("{}", missing_income_message(.period))]
    MissingIncome { period: String },

    #[error("Negative amount in period {period} (entry {id})")]
    NegativeAmount { period: String, id: String },

    #[error("Amount in period {period} (entry {id}) exceeds {MAX_AMOUNT}")]
    AmountTooLarge { period: String, id: String },

    #[error("Override rate {0}% is outside 0-100")]
    OverrideRateOutOfRange(Decimal),
}

fn missing_income_message(period: &str) -> String {
    if period == FULL_YEAR_LABEL {
        "Enter your total annual earnings".to_string()
    } else {
        format!("Enter your income for {period}")
    }
}

/// Checks the shape of a request and the range of every amount.
pub fn validate_request(
    periods: &[PeriodInput],
    override_rate: Option<Decimal>,
) -> Result<(), ValidationError> {
    validate_shape(periods)?;

    for period in periods {
        validate_period(period)?;
    }

    if let Some(rate) = override_rate {
        validate_override_rate(rate)?;
    }

    Ok(())
}

fn validate_shape(periods: &[PeriodInput]) -> Result<(), ValidationError> {
    if periods.is_empty() {
        return Err(ValidationError::NoPeriods);
    }

    let annual_count = periods.iter().filter(|p| p.is_annual).count();
    if annual_count > 0 && periods.len() > 1 {
        return Err(ValidationError::MixedPeriods);
    }

    if periods.len() > MAX_MONTHLY_PERIODS {
        return Err(ValidationError::TooManyPeriods(periods.len()));
    }

    let mut seen = HashSet::new();
    for period in periods {
        if !seen.insert(period.label.as_str()) {
            return Err(ValidationError::DuplicatePeriod(period.label.clone()));
        }
    }

    Ok(())
}

fn validate_period(period: &PeriodInput) -> Result<(), ValidationError> {
    if period.income_sources.is_empty() {
        return Err(ValidationError::MissingIncome {
            period: period.label.clone(),
        });
    }

    let amounts = period
        .income_sources
        .iter()
        .map(|s| (&s.id, s.amount))
        .chain(period.expenses.iter().map(|e| (&e.id, e.amount)));

    for (id, amount) in amounts {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount {
                period: period.label.clone(),
                id: id.clone(),
            });
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge {
                period: period.label.clone(),
                id: id.clone(),
            });
        }
    }

    Ok(())
}

fn validate_override_rate(rate: Decimal) -> Result<(), ValidationError> {
    if rate < Decimal::ZERO || rate > dec!(100) {
        return Err(ValidationError::OverrideRateOutOfRange(rate));
    }
    Ok(())
}
