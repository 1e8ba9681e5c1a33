//! Display currencies. Amounts are shown whole, with thousands separators.

use std::fmt;
use std::str::FromStr;

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Ngn,
    Usd,
    Gbp,
    Eur,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown currency '{0}'; expected one of NGN, USD, GBP, EUR")]
pub struct UnknownCurrencyError(pub String);

impl Currency {
    pub const ALL: [Currency; 4] = [Self::Ngn, Self::Usd, Self::Gbp, Self::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Ngn => "NGN",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Ngn => "₦",
            Self::Usd => "$",
            Self::Gbp => "£",
            Self::Eur => "€",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ngn => "Naira",
            Self::Usd => "Dollar",
            Self::Gbp => "Pound",
            Self::Eur => "Euro",
        }
    }

    /// Digit grouping for amounts in this currency.
    fn locale(&self) -> Locale {
        match self {
            Self::Ngn => Locale::en_NG,
            Self::Usd => Locale::en,
            Self::Gbp => Locale::en_GB,
            Self::Eur => Locale::en_IE,
        }
    }

    /// `₦1,234,567`; halves round away from zero.
    pub fn format(
        &self,
        amount: Decimal,
    ) -> String {
        let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let sign = if whole.is_sign_negative() && !whole.is_zero() {
            "-"
        } else {
            ""
        };
        // Every whole Decimal fits in an i128
        let digits = match whole.abs().to_i128() {
            Some(units) => units.to_formatted_string(&self.locale()),
            None => whole.abs().to_string(),
        };
        format!("{sign}{}{digits}", self.symbol())
    }
}

impl FromStr for Currency {
    type Err = UnknownCurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCurrencyError(s.to_string()))
    }
}

impl TryFrom<String> for Currency {
    type Error = UnknownCurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn formats_naira_with_separators() {
        assert_eq!(Currency::Ngn.format(dec!(531600)), "₦531,600");
        assert_eq!(Currency::Ngn.format(dec!(12230000)), "₦12,230,000");
    }

    #[test]
    fn formats_small_amounts_without_separator() {
        assert_eq!(Currency::Usd.format(dec!(999)), "$999");
        assert_eq!(Currency::Gbp.format(Decimal::ZERO), "£0");
    }

    #[test]
    fn rounds_to_whole_units() {
        assert_eq!(Currency::Eur.format(dec!(116666.666)), "€116,667");
        assert_eq!(Currency::Ngn.format(dec!(1000.5)), "₦1,001");
        assert_eq!(Currency::Ngn.format(dec!(1000.49)), "₦1,000");
    }

    #[test]
    fn formats_amounts_beyond_i64() {
        assert_eq!(
            Currency::Usd.format(dec!(12345678901234567890123)),
            "$12,345,678,901,234,567,890,123"
        );
    }

    #[test]
    fn negative_amounts_lead_with_sign() {
        assert_eq!(Currency::Ngn.format(dec!(-25000)), "-₦25,000");
        assert_eq!(Currency::Ngn.format(dec!(-0.2)), "₦0");
    }

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!("ngn".parse::<Currency>(), Ok(Currency::Ngn));
        assert_eq!(" GBP ".parse::<Currency>(), Ok(Currency::Gbp));
        assert_eq!(
            "JPY".parse::<Currency>(),
            Err(UnknownCurrencyError("JPY".to_string()))
        );
    }
}
