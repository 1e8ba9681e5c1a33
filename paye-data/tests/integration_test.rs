//! End-to-end: ledger CSV through the loader into the calculator.

use paye_core::{CategoryTable, compute_checked};
use paye_data::{LedgerLoader, PeriodMode};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const LEDGER_2026: &str = include_str!("../test-data/ledger_2026.csv");

#[test]
fn test_monthly_ledger_loads_three_months() {
    let periods = LedgerLoader::load(LEDGER_2026.as_bytes(), PeriodMode::Monthly, &CategoryTable::common())
        .expect("Failed to load ledger");

    let labels: Vec<&str> = periods.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["Jan", "Feb", "Mar"]);

    // Feb's zero-amount freelance row is dropped
    assert_eq!(periods[1].income_sources.len(), 1);
    assert_eq!(periods[2].income_sources[1].amount, dec!(120000.50));
    assert_eq!(periods[0].income_sources[0].bank.as_deref(), Some("GTBank"));
    assert_eq!(periods[0].income_sources[0].receipt_ref.as_deref(), Some("PAY-0126"));
}

#[test]
fn test_monthly_ledger_computes() {
    let periods = LedgerLoader::load(LEDGER_2026.as_bytes(), PeriodMode::Monthly, &CategoryTable::common())
        .expect("Failed to load ledger");

    let result = compute_checked(&periods, None).expect("Ledger should validate");

    assert_eq!(result.period_label, "3 Selected Months");
    assert_eq!(result.gross_income, dec!(1570000.50));
    assert_eq!(result.transactions.len(), 8);
    assert_eq!(result.total_personal_expenses, dec!(165000));
    // NHF from the category table plus the explicitly flagged union dues
    assert_eq!(result.total_tax_deductible, dec!(15000));
}

#[test]
fn test_annual_ledger_is_one_full_year_period() {
    let periods = LedgerLoader::load(LEDGER_2026.as_bytes(), PeriodMode::Annual, &CategoryTable::common())
        .expect("Failed to load ledger");

    let result = compute_checked(&periods, None).expect("Ledger should validate");

    assert_eq!(periods.len(), 1);
    assert_eq!(result.period_label, "Annual (Full Year)");
    assert_eq!(result.duration_months, 12);
    assert_eq!(result.transactions.len(), 8);
}
