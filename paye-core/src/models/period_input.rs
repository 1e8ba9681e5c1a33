use serde::{Deserialize, Serialize};

use super::{Expense, IncomeSource};

/// Label used for the single annual period.
pub const FULL_YEAR_LABEL: &str = "Full Year";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
            Self::May => "May",
            Self::June => "Jun",
            Self::July => "Jul",
            Self::August => "Aug",
            Self::September => "Sep",
            Self::October => "Oct",
            Self::November => "Nov",
            Self::December => "Dec",
        }
    }

    /// Accepts short (`Jan`) or full (`January`) names, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| {
            let short = m.as_str().to_ascii_lowercase();
            lower == short || lower == m.full_name().to_ascii_lowercase()
        })
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Self::January => "January",
            Self::February => "February",
            Self::March => "March",
            Self::April => "April",
            Self::May => "May",
            Self::June => "June",
            Self::July => "July",
            Self::August => "August",
            Self::September => "September",
            Self::October => "October",
            Self::November => "November",
            Self::December => "December",
        }
    }

    /// 1-based calendar position.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }
}

/// One unit of calculation: a named period with its income and expenses.
///
/// `is_annual` marks amounts that are already annual totals. A request holds
/// either exactly one annual period or one to twelve distinct monthly ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInput {
    pub label: String,
    pub income_sources: Vec<IncomeSource>,
    pub expenses: Vec<Expense>,
    pub is_annual: bool,
}

impl PeriodInput {
    pub fn monthly(
        month: Month,
        income_sources: Vec<IncomeSource>,
        expenses: Vec<Expense>,
    ) -> Self {
        Self {
            label: month.as_str().to_string(),
            income_sources,
            expenses,
            is_annual: false,
        }
    }

    pub fn full_year(
        income_sources: Vec<IncomeSource>,
        expenses: Vec<Expense>,
    ) -> Self {
        Self {
            label: FULL_YEAR_LABEL.to_string(),
            income_sources,
            expenses,
            is_annual: true,
        }
    }

    /// Number of ledger entries this period contributes.
    pub fn entry_count(&self) -> usize {
        self.income_sources.len() + self.expenses.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn month_parse_accepts_short_and_full_names() {
        assert_eq!(Month::parse("Jan"), Some(Month::January));
        assert_eq!(Month::parse("january"), Some(Month::January));
        assert_eq!(Month::parse("  SEP "), Some(Month::September));
        assert_eq!(Month::parse("Sept"), None);
    }

    #[test]
    fn month_number_is_one_based() {
        assert_eq!(Month::January.number(), 1);
        assert_eq!(Month::December.number(), 12);
    }

    #[test]
    fn monthly_constructor_uses_short_label() {
        let period = PeriodInput::monthly(Month::March, vec![], vec![]);

        assert_eq!(period.label, "Mar");
        assert!(!period.is_annual);
    }

    #[test]
    fn full_year_constructor_is_annual() {
        let period = PeriodInput::full_year(vec![], vec![]);

        assert_eq!(period.label, FULL_YEAR_LABEL);
        assert!(period.is_annual);
    }
}
