use std::collections::BTreeMap;
use std::io::Read;

use paye_core::{CategoryTable, Expense, IncomeSource, Month, PeriodInput, TransactionKind};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while turning a ledger CSV into periods.
///
/// Row numbers count data rows from 1, excluding the header.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Row {row}: unknown month '{period}'")]
    UnknownPeriod { row: usize, period: String },

    #[error("Row {row}: kind must be 'income' or 'expense', got '{kind}'")]
    InvalidKind { row: usize, kind: String },

    #[error("Row {row}: amount {amount} is negative")]
    NegativeAmount { row: usize, amount: Decimal },
}

impl From<csv::Error> for LedgerLoaderError {
    fn from(err: csv::Error) -> Self {
        LedgerLoaderError::CsvParse(err.to_string())
    }
}

/// How rows are grouped into periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMode {
    /// One period per month named in the `period` column.
    Monthly,
    /// Every row lands in a single full-year period; `period` is ignored.
    Annual,
}

/// A single row of a ledger CSV file.
///
/// - `period`: month name, short (`Jan`) or full (`January`)
/// - `kind`: `income` or `expense`
/// - `description`: income description or expense category
/// - `amount`: may contain thousands separators (`"150,000"`)
/// - `tax_deductible`: optional; blank means "look up the category"
/// - `bank`, `date`, `receipt_ref`: optional metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LedgerRecord {
    #[serde(default)]
    pub period: String,
    pub kind: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_bool")]
    pub tax_deductible: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub bank: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub receipt_ref: Option<String>,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let cleaned = s.trim().replace(',', "");
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    cleaned.parse::<Decimal>().map_err(serde::de::Error::custom)
}

fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "yes" | "y" | "1" => Ok(Some(true)),
            "false" | "no" | "n" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid tax_deductible value '{other}'"
            ))),
        },
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn parse_kind(
    row: usize,
    kind: &str,
) -> Result<TransactionKind, LedgerLoaderError> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        _ => Err(LedgerLoaderError::InvalidKind {
            row,
            kind: kind.to_string(),
        }),
    }
}

/// Loader for income and expense ledgers.
///
/// Produces the `PeriodInput`s the calculator consumes, in calendar order.
pub struct LedgerLoader;

impl LedgerLoader {
    /// Parse ledger records from a CSV reader.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<LedgerRecord>, LedgerLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: LedgerRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Groups records into periods.
    ///
    /// Zero amounts are skipped. Expenses without an explicit
    /// `tax_deductible` value take their deductibility from `categories`,
    /// defaulting to personal spending.
    pub fn into_periods(
        records: &[LedgerRecord],
        mode: PeriodMode,
        categories: &CategoryTable,
    ) -> Result<Vec<PeriodInput>, LedgerLoaderError> {
        let mut months: BTreeMap<Month, PeriodInput> = BTreeMap::new();
        let mut annual = PeriodInput::full_year(Vec::new(), Vec::new());

        for (idx, record) in records.iter().enumerate() {
            let row = idx + 1;

            let month = match mode {
                PeriodMode::Annual => None,
                PeriodMode::Monthly => Some(Month::parse(&record.period).ok_or_else(|| {
                    warn!(row, period = %record.period, "Rejected ledger row with unknown month");
                    LedgerLoaderError::UnknownPeriod {
                        row,
                        period: record.period.clone(),
                    }
                })?),
            };

            let kind = parse_kind(row, &record.kind)?;

            if record.amount < Decimal::ZERO {
                warn!(row, amount = %record.amount, "Rejected ledger row with negative amount");
                return Err(LedgerLoaderError::NegativeAmount {
                    row,
                    amount: record.amount,
                });
            }
            if record.amount.is_zero() {
                debug!(row, "Skipping zero-amount ledger row");
                continue;
            }

            let period = match month {
                Some(month) => months
                    .entry(month)
                    .or_insert_with(|| PeriodInput::monthly(month, Vec::new(), Vec::new())),
                None => &mut annual,
            };

            let id = format!("{}-{}", period.label, row);
            match kind {
                TransactionKind::Income => period.income_sources.push(IncomeSource {
                    id,
                    description: record.description.clone(),
                    amount: record.amount,
                    bank: record.bank.clone(),
                    date: record.date.clone(),
                    receipt_ref: record.receipt_ref.clone(),
                }),
                TransactionKind::Expense => {
                    let is_tax_deductible = record
                        .tax_deductible
                        .unwrap_or_else(|| categories.is_tax_deductible(&record.description, false));
                    period.expenses.push(Expense {
                        id,
                        category: record.description.clone(),
                        amount: record.amount,
                        is_tax_deductible,
                        bank: record.bank.clone(),
                        date: record.date.clone(),
                        receipt_ref: record.receipt_ref.clone(),
                    });
                }
            }
        }

        let periods: Vec<PeriodInput> = match mode {
            PeriodMode::Annual => vec![annual],
            PeriodMode::Monthly => months.into_values().collect(),
        };

        debug!(periods = periods.len(), rows = records.len(), "Grouped ledger rows");
        Ok(periods)
    }

    /// Parses and groups in one step.
    pub fn load<R: Read>(
        reader: R,
        mode: PeriodMode,
        categories: &CategoryTable,
    ) -> Result<Vec<PeriodInput>, LedgerLoaderError> {
        let records = Self::parse(reader)?;
        Self::into_periods(&records, mode, categories)
    }
}

#[cfg(test)]
mod tests {
    use paye_core::CustomCategory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const HEADER: &str = "period,kind,description,amount,tax_deductible,bank,date,receipt_ref\n";

    fn csv(rows: &str) -> String {
        format!("{HEADER}{rows}")
    }

    fn load_monthly(rows: &str) -> Result<Vec<PeriodInput>, LedgerLoaderError> {
        LedgerLoader::load(csv(rows).as_bytes(), PeriodMode::Monthly, &CategoryTable::common())
    }

    // =========================================================================
    // parse tests
    // =========================================================================

    #[test]
    fn test_parse_single_row() {
        let records =
            LedgerLoader::parse(csv("Jan,income,Salary,\"500,000\",,GTBank,2026-01-28,PAY-1").as_bytes())
                .expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![LedgerRecord {
                period: "Jan".to_string(),
                kind: "income".to_string(),
                description: "Salary".to_string(),
                amount: dec!(500000),
                tax_deductible: None,
                bank: Some("GTBank".to_string()),
                date: Some("2026-01-28".to_string()),
                receipt_ref: Some("PAY-1".to_string()),
            }]
        );
    }

    #[test]
    fn test_parse_minimal_columns() {
        let data = "period,kind,description,amount\nFeb,expense,Rent,150000\n";

        let records = LedgerLoader::parse(data.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].tax_deductible, None);
        assert_eq!(records[0].bank, None);
        assert_eq!(records[0].amount, dec!(150000));
    }

    #[test]
    fn test_parse_blank_amount_is_zero() {
        let records = LedgerLoader::parse(csv("Jan,income,Bonus,,,,,").as_bytes())
            .expect("Failed to parse CSV");

        assert_eq!(records[0].amount, Decimal::ZERO);
    }

    #[test]
    fn test_parse_deductible_flags() {
        let records = LedgerLoader::parse(
            csv("Jan,expense,A,1,yes,,,\nJan,expense,B,1,FALSE,,,\nJan,expense,C,1,,,,").as_bytes(),
        )
        .expect("Failed to parse CSV");

        let flags: Vec<Option<bool>> = records.iter().map(|r| r.tax_deductible).collect();
        assert_eq!(flags, vec![Some(true), Some(false), None]);
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        let result = LedgerLoader::parse(csv("Jan,income,Salary,lots,,,,").as_bytes());

        assert!(matches!(result, Err(LedgerLoaderError::CsvParse(_))));
    }

    // =========================================================================
    // into_periods tests
    // =========================================================================

    #[test]
    fn test_monthly_groups_in_calendar_order() {
        let periods = load_monthly(
            "March,income,Salary,300000,,,,\nJan,income,Salary,200000,,,,\nmar,expense,Rent,50000,,,,",
        )
        .expect("Failed to load");

        let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan", "Mar"]);
        assert_eq!(periods[1].income_sources[0].id, "Mar-1");
        assert_eq!(periods[1].expenses[0].id, "Mar-3");
        assert!(!periods[1].is_annual);
    }

    #[test]
    fn test_annual_collapses_all_rows() {
        let periods = LedgerLoader::load(
            csv("Jan,income,Salary,3000000,,,,\n,income,Dividends,500000,,,,").as_bytes(),
            PeriodMode::Annual,
            &CategoryTable::common(),
        )
        .expect("Failed to load");

        assert_eq!(periods.len(), 1);
        assert!(periods[0].is_annual);
        assert_eq!(periods[0].income_sources.len(), 2);
        assert_eq!(periods[0].income_sources[1].id, "Full Year-2");
    }

    #[test]
    fn test_unknown_month_is_rejected() {
        assert_eq!(
            load_monthly("Jan,income,Salary,1,,,,\nSmarch,income,Salary,1,,,,"),
            Err(LedgerLoaderError::UnknownPeriod {
                row: 2,
                period: "Smarch".to_string(),
            })
        );
    }

    #[test]
    fn test_invalid_kind_is_rejected() {
        assert_eq!(
            load_monthly("Jan,refund,Overpayment,100,,,,"),
            Err(LedgerLoaderError::InvalidKind {
                row: 1,
                kind: "refund".to_string(),
            })
        );
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        assert_eq!(
            load_monthly("Jan,income,Salary,100,,,,\nJan,expense,Rent,-50,,,,"),
            Err(LedgerLoaderError::NegativeAmount {
                row: 2,
                amount: dec!(-50),
            })
        );
    }

    #[test]
    fn test_zero_amounts_are_dropped() {
        let periods = load_monthly("Jan,income,Salary,100,,,,\nJan,expense,Rent,0,,,,")
            .expect("Failed to load");

        assert_eq!(periods[0].entry_count(), 1);
    }

    #[test]
    fn test_month_with_only_zero_rows_is_not_selected() {
        let periods = load_monthly("Jan,income,Salary,100,,,,\nFeb,income,Salary,0,,,,")
            .expect("Failed to load");

        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].label, "Jan");
    }

    #[test]
    fn test_deductibility_from_category_table() {
        let periods = load_monthly(
            "Jan,expense,national housing fund (nhf),10000,,,,\nJan,expense,Rent,1,,,,\nJan,expense,Gym,1,,,,\nJan,expense,Rent,1,true,,,",
        )
        .expect("Failed to load");

        let flags: Vec<bool> = periods[0].expenses.iter().map(|e| e.is_tax_deductible).collect();
        assert_eq!(flags, vec![true, false, false, true]);
    }

    #[test]
    fn test_custom_categories_apply() {
        let table = CategoryTable::common().with_custom(vec![CustomCategory {
            label: "Gym".to_string(),
            is_tax_deductible: true,
        }]);

        let periods = LedgerLoader::load(
            csv("Jan,expense,Gym,1,,,,").as_bytes(),
            PeriodMode::Monthly,
            &table,
        )
        .expect("Failed to load");

        assert!(periods[0].expenses[0].is_tax_deductible);
    }

    #[test]
    fn test_empty_file_yields_no_monthly_periods() {
        assert_eq!(load_monthly(""), Ok(vec![]));
    }
}
