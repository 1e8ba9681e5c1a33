use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Earnings bracket shown next to a result, keyed on monthly income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SalaryTier {
    Starter,
    Professional,
    Executive,
    Tycoon,
}

impl SalaryTier {
    pub fn from_monthly_income(amount: Decimal) -> Self {
        if amount < dec!(200000) {
            Self::Starter
        } else if amount < dec!(1000000) {
            Self::Professional
        } else if amount < dec!(5000000) {
            Self::Executive
        } else {
            Self::Tycoon
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "Starter",
            Self::Professional => "Professional",
            Self::Executive => "Executive",
            Self::Tycoon => "Tycoon",
        }
    }
}

impl fmt::Display for SalaryTier {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tier_boundaries_are_exclusive() {
        assert_eq!(SalaryTier::from_monthly_income(dec!(199999)), SalaryTier::Starter);
        assert_eq!(SalaryTier::from_monthly_income(dec!(200000)), SalaryTier::Professional);
        assert_eq!(SalaryTier::from_monthly_income(dec!(1000000)), SalaryTier::Executive);
        assert_eq!(SalaryTier::from_monthly_income(dec!(5000000)), SalaryTier::Tycoon);
    }

    #[test]
    fn tier_displays_name() {
        assert_eq!(SalaryTier::Executive.to_string(), "Executive");
    }
}
