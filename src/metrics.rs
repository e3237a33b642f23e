//! Pure aggregation from a transaction list to the derived period figures.
//!
//! Nothing here touches storage; callers pass the (already business-filtered)
//! transaction set and a reference date, and re-invoke with other sets for
//! their own derivations such as year-over-year comparisons.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::ledger::{Transaction, TransactionKind};

/// Derived figures for one business as of a reference date.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    pub monthly_profit: f64,
    pub ytd_profit: f64,
    /// Income change versus the previous calendar month, in percent.
    pub income_comparison: f64,
    /// Profit change versus the previous calendar month, in percent.
    pub profit_comparison: f64,
    /// This month's expense totals keyed by category. Categories with no
    /// expense this month are omitted, not zero-filled.
    pub expense_breakdown: BTreeMap<String, f64>,
    /// Net signed contribution per calendar month, aggregated across all
    /// years present in the set (January is bucket 0).
    pub net_by_month: [f64; 12],
    /// Same bucketing restricted to the tracked category's amounts.
    pub category_by_month: [f64; 12],
    /// The input set, kept so consumers can re-derive without another query.
    pub transactions: Vec<Transaction>,
}

/// Percentage change from `previous` to `current`.
///
/// A zero baseline reports `100` for any growth and `0` otherwise, rather
/// than an undefined or infinite ratio.
pub fn comparison_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current > 0.0 {
            100.0
        } else {
            0.0
        }
    } else {
        (current - previous) / previous * 100.0
    }
}

/// Computes the full summary for `transactions` as of `as_of`.
///
/// `tracked_category` selects the category for the recurring-cost series;
/// pass `None` to leave that series zeroed. Transactions without a parseable
/// date are excluded from every date-bucketed figure.
pub fn compute_metrics(
    transactions: &[Transaction],
    as_of: NaiveDate,
    tracked_category: Option<&str>,
) -> MetricsSummary {
    let year = as_of.year();
    let month = as_of.month();
    let (prev_year, prev_month) = previous_month(year, month);

    let this_month: Vec<&Transaction> = dated(transactions)
        .filter(|(date, _)| date.year() == year && date.month() == month)
        .map(|(_, tx)| tx)
        .collect();
    let last_month: Vec<&Transaction> = dated(transactions)
        .filter(|(date, _)| date.year() == prev_year && date.month() == prev_month)
        .map(|(_, tx)| tx)
        .collect();

    let monthly_income = sum_kind(&this_month, TransactionKind::Income);
    let monthly_expense = sum_kind(&this_month, TransactionKind::Expense);
    let monthly_profit = monthly_income - monthly_expense;

    let last_month_income = sum_kind(&last_month, TransactionKind::Income);
    let last_month_profit = last_month_income - sum_kind(&last_month, TransactionKind::Expense);

    let ytd_profit: f64 = dated(transactions)
        .filter(|(date, _)| date.year() == year)
        .map(|(_, tx)| signed_amount(tx))
        .sum();

    let mut expense_breakdown = BTreeMap::new();
    for tx in &this_month {
        if tx.kind == TransactionKind::Expense {
            *expense_breakdown.entry(tx.category.clone()).or_insert(0.0) += tx.amount;
        }
    }

    let mut net_by_month = [0.0; 12];
    let mut category_by_month = [0.0; 12];
    for (date, tx) in dated(transactions) {
        let bucket = date.month0() as usize;
        net_by_month[bucket] += signed_amount(tx);
        if tracked_category == Some(tx.category.as_str()) {
            category_by_month[bucket] += tx.amount;
        }
    }

    MetricsSummary {
        monthly_income,
        monthly_expense,
        monthly_profit,
        ytd_profit,
        income_comparison: comparison_percent(monthly_income, last_month_income),
        profit_comparison: comparison_percent(monthly_profit, last_month_profit),
        expense_breakdown,
        net_by_month,
        category_by_month,
        transactions: transactions.to_vec(),
    }
}

fn dated<'a>(
    transactions: &'a [Transaction],
) -> impl Iterator<Item = (NaiveDate, &'a Transaction)> + 'a {
    transactions.iter().filter_map(|tx| tx.date.map(|d| (d, tx)))
}

fn sum_kind(transactions: &[&Transaction], kind: TransactionKind) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount)
        .sum()
}

fn signed_amount(tx: &Transaction) -> f64 {
    match tx.kind {
        TransactionKind::Income => tx.amount,
        TransactionKind::Expense => -tx.amount,
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}
