//! Table rendering for command output.

use paye_core::calculations::common::{round_half_up, safe_div};
use paye_core::calculations::STATUTORY_BANDS;
use paye_core::{SPECIALIZED_TAX_RATES, SalaryTier, SavedCalculation, TaxReminder, TaxResult};
use rust_decimal::Decimal;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::currency::Currency;
use crate::utils::opt_display;

fn render<T: Tabled>(rows: Vec<T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::new(1..)).with(Alignment::right()))
        .to_string()
}

fn percent(value: Decimal) -> String {
    format!("{}%", round_half_up(value).normalize())
}

/// Monthly income used to pick the salary tier.
pub fn monthly_income(result: &TaxResult) -> Decimal {
    safe_div(result.gross_income, Decimal::from(result.duration_months))
}

#[derive(Debug, Tabled)]
struct SummaryRow {
    #[tabled(rename = "Item")]
    item: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Headline figures. `mode` describes how tax was computed; saved results
/// don't record it, so history passes `None` and the row is left out.
pub fn summary_table(
    result: &TaxResult,
    currency: Currency,
    mode: Option<&str>,
) -> String {
    let money = |amount| currency.format(amount);
    let tier = SalaryTier::from_monthly_income(monthly_income(result));

    let mut rows = vec![
        SummaryRow {
            item: "Period",
            value: result.period_label.clone(),
        },
        SummaryRow {
            item: "Months",
            value: result.duration_months.to_string(),
        },
    ];
    if let Some(mode) = mode {
        rows.push(SummaryRow {
            item: "Tax mode",
            value: mode.to_string(),
        });
    }
    rows.extend([
        SummaryRow {
            item: "Currency",
            value: format!("{} ({})", currency.code(), currency.name()),
        },
        SummaryRow {
            item: "Gross income",
            value: money(result.gross_income),
        },
        SummaryRow {
            item: "Pension (8%)",
            value: money(result.pension),
        },
        SummaryRow {
            item: "Consolidated relief",
            value: money(result.consolidated_relief),
        },
        SummaryRow {
            item: "Tax-deductible expenses",
            value: money(result.total_tax_deductible),
        },
        SummaryRow {
            item: "Taxable income",
            value: money(result.taxable_income),
        },
        SummaryRow {
            item: "PAYE tax",
            value: money(result.paye_tax),
        },
        SummaryRow {
            item: "Net income",
            value: money(result.net_income),
        },
        SummaryRow {
            item: "Personal expenses",
            value: money(result.total_personal_expenses),
        },
        SummaryRow {
            item: "Final balance",
            value: money(result.final_balance),
        },
        SummaryRow {
            item: "Effective rate",
            value: percent(result.effective_tax_rate),
        },
        SummaryRow {
            item: "Average daily net",
            value: money(result.average_daily_net),
        },
        SummaryRow {
            item: "Salary tier",
            value: tier.to_string(),
        },
    ]);
    render(rows)
}

#[derive(Debug, Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Band")]
    band: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "Tax")]
    amount: String,
}

pub fn breakdown_table(
    result: &TaxResult,
    currency: Currency,
) -> String {
    if result.breakdown.is_empty() {
        return "No tax due in any band".to_string();
    }

    let rows = result
        .breakdown
        .iter()
        .map(|entry| BreakdownRow {
            band: entry.band.clone(),
            rate: percent(entry.rate * Decimal::ONE_HUNDRED),
            amount: currency.format(entry.amount),
        })
        .collect();
    render(rows)
}

#[derive(Debug, Tabled)]
struct LedgerRow {
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Deductible")]
    deductible: String,
    #[tabled(rename = "Bank")]
    bank: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Receipt")]
    receipt_ref: String,
}

pub fn ledger_table(
    result: &TaxResult,
    currency: Currency,
) -> String {
    if result.transactions.is_empty() {
        return "No ledger entries".to_string();
    }

    let rows = result
        .transactions
        .iter()
        .map(|t| LedgerRow {
            period: t.period.clone(),
            kind: t.kind.as_str(),
            description: t.description.clone(),
            amount: currency.format(t.amount),
            deductible: match t.is_tax_deductible {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "—".to_string(),
            },
            bank: opt_display(&t.bank),
            date: opt_display(&t.date),
            receipt_ref: opt_display(&t.receipt_ref),
        })
        .collect();
    render(rows)
}

#[derive(Debug, Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "Saved")]
    timestamp: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Net")]
    net: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn history_table(
    entries: &[SavedCalculation],
    currency: Currency,
) -> String {
    if entries.is_empty() {
        return "No saved calculations".to_string();
    }

    let rows = entries
        .iter()
        .map(|entry| HistoryRow {
            id: entry.id,
            timestamp: entry.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            period: entry.result.period_label.clone(),
            gross: currency.format(entry.result.gross_income),
            tax: currency.format(entry.result.paye_tax),
            net: currency.format(entry.result.net_income),
            rate: percent(entry.result.effective_tax_rate),
        })
        .collect();
    render(rows)
}

#[derive(Debug, Tabled)]
struct ReminderRow {
    #[tabled(rename = "#")]
    id: i64,
    #[tabled(rename = "Tax")]
    tax_type: String,
    #[tabled(rename = "Due")]
    due_date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Notes")]
    notes: String,
}

pub fn reminders_table(
    reminders: &[TaxReminder],
    currency: Currency,
) -> String {
    if reminders.is_empty() {
        return "No reminders".to_string();
    }

    let rows = reminders
        .iter()
        .map(|r| ReminderRow {
            id: r.id,
            tax_type: r.tax_type.clone(),
            due_date: r.due_date.to_string(),
            amount: r
                .amount
                .map(|a| currency.format(a))
                .unwrap_or_else(|| "—".to_string()),
            status: if r.is_completed { "done" } else { "pending" },
            notes: opt_display(&r.notes),
        })
        .collect();
    render(rows)
}

#[derive(Debug, Tabled)]
struct BandRow {
    #[tabled(rename = "Band")]
    label: &'static str,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn bands_table(currency: Currency) -> String {
    let rows = STATUTORY_BANDS
        .iter()
        .map(|band| BandRow {
            label: band.label,
            width: band
                .width
                .map(|w| currency.format(w))
                .unwrap_or_else(|| "remainder".to_string()),
            rate: percent(band.rate * Decimal::ONE_HUNDRED),
        })
        .collect();
    render(rows)
}

#[derive(Debug, Tabled)]
struct RateRow {
    #[tabled(rename = "Tax")]
    label: &'static str,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Rate")]
    rate: String,
}

pub fn rates_table() -> String {
    let rows = SPECIALIZED_TAX_RATES
        .iter()
        .map(|r| RateRow {
            label: r.label,
            category: r.category,
            rate: percent(r.rate),
        })
        .collect();
    render(rows)
}
