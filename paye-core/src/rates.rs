//! Flat rates for non-PAYE taxes, usable as an override of the schedule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecializedRate {
    pub label: &'static str,
    /// Percentage.
    pub rate: Decimal,
    pub category: &'static str,
}

pub static SPECIALIZED_TAX_RATES: [SpecializedRate; 7] = [
    SpecializedRate {
        label: "VAT (Sales Tax)",
        rate: dec!(7.5),
        category: "Indirect",
    },
    SpecializedRate {
        label: "WHT (Rent)",
        rate: dec!(10),
        category: "Withholding",
    },
    SpecializedRate {
        label: "WHT (Professional/Contract)",
        rate: dec!(5),
        category: "Withholding",
    },
    SpecializedRate {
        label: "CIT (Large Company)",
        rate: dec!(30),
        category: "Company",
    },
    SpecializedRate {
        label: "Development Levy",
        rate: dec!(4),
        category: "Company",
    },
    SpecializedRate {
        label: "CGT (Assets)",
        rate: dec!(30),
        category: "Capital Gains",
    },
    SpecializedRate {
        label: "Stamp Duty (Proxy)",
        rate: dec!(0.5),
        category: "Stamp",
    },
];

/// Case-insensitive lookup by label.
pub fn find_specialized_rate(label: &str) -> Option<&'static SpecializedRate> {
    let wanted = label.trim();
    SPECIALIZED_TAX_RATES
        .iter()
        .find(|r| r.label.eq_ignore_ascii_case(wanted))
}

/// How tax is computed for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxMode {
    /// Progressive statutory bands.
    Statutory,
    /// A caller-supplied percentage.
    Flat(Decimal),
    /// A named entry of [`SPECIALIZED_TAX_RATES`].
    Special(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown specialized rate: {0}")]
pub struct UnknownRateError(pub String);

impl TaxMode {
    /// The override percentage handed to the engine, `None` for statutory.
    pub fn override_rate(&self) -> Result<Option<Decimal>, UnknownRateError> {
        match self {
            Self::Statutory => Ok(None),
            Self::Flat(rate) => Ok(Some(*rate)),
            Self::Special(label) => find_specialized_rate(label)
                .map(|r| Some(r.rate))
                .ok_or_else(|| UnknownRateError(label.clone())),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Statutory => "Statutory PAYE bands".to_string(),
            Self::Flat(rate) => format!("Flat {rate}% of gross"),
            Self::Special(label) => label.clone(),
        }
    }
}
