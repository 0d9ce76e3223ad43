// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-only aggregation over ledger records: category breakdowns, the
//! monthly cash-flow series, and budget utilization. Nothing here mutates
//! state; callers fetch rows and hand them in.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Budget, Frequency};

/// A category/amount/date view of one expense or income row.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// The fields of an income row the cash-flow projection needs.
#[derive(Debug, Clone)]
pub struct IncomeEntry {
    pub amount: Decimal,
    pub date: NaiveDate,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStat {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    pub average: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthFlow {
    pub month: String, // YYYY-MM
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUsage {
    pub category: String,
    pub limit: Decimal,
    pub spent: Decimal,
    pub percent_used: Decimal,
    pub color: String,
}

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Groups entries by category and computes sum/count/average/share of the
/// grand total, sorted by total descending.
pub fn category_breakdown(entries: &[LedgerEntry]) -> (Vec<CategoryStat>, Decimal) {
    use std::collections::HashMap;
    let mut sums: HashMap<&str, (Decimal, usize)> = HashMap::new();
    for e in entries {
        let slot = sums.entry(&e.category).or_insert((Decimal::ZERO, 0));
        slot.0 += e.amount;
        slot.1 += 1;
    }
    let total: Decimal = sums.values().map(|(s, _)| *s).sum();
    let mut stats: Vec<CategoryStat> = sums
        .into_iter()
        .map(|(category, (sum, count))| CategoryStat {
            category: category.to_string(),
            total: sum,
            count,
            average: if count > 0 {
                sum / Decimal::from(count as i64)
            } else {
                Decimal::ZERO
            },
            percentage: if total > Decimal::ZERO {
                sum / total * HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect();
    stats.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));
    (stats, total)
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Projected contribution of a recurring income to the month containing
/// `month_start`. The multipliers are deliberately heuristic (weekly 4.33
/// per month, bi-weekly 2.17) rather than a calendar enumeration; quarterly
/// and yearly incomes land only in months aligned to their start month.
pub fn recurring_contribution(income: &IncomeEntry, month_start: NaiveDate) -> Decimal {
    let Some(frequency) = income.frequency else {
        return Decimal::ZERO;
    };
    if !income.recurring {
        return Decimal::ZERO;
    }
    let diff = months_between(income.date, month_start);
    if diff < 0 {
        return Decimal::ZERO;
    }
    match frequency {
        Frequency::Weekly => income.amount * Decimal::new(433, 2),
        Frequency::BiWeekly => income.amount * Decimal::new(217, 2),
        Frequency::Monthly => income.amount,
        Frequency::Quarterly => {
            if diff % 3 == 0 {
                income.amount
            } else {
                Decimal::ZERO
            }
        }
        Frequency::Yearly => {
            if month_start.month() == income.date.month() {
                income.amount
            } else {
                Decimal::ZERO
            }
        }
    }
}

/// The last `months_back` calendar months ending with the month of `today`,
/// oldest first. Each month's income is its dated income entries plus the
/// recurring projection; expenses are dated entries only.
pub fn cash_flow(
    incomes: &[IncomeEntry],
    expenses: &[LedgerEntry],
    months_back: u32,
    today: NaiveDate,
) -> Vec<MonthFlow> {
    let current = today.with_day(1).unwrap_or(today);
    let mut series = Vec::with_capacity(months_back as usize);
    for i in (0..months_back).rev() {
        let Some(month_start) = current.checked_sub_months(Months::new(i)) else {
            continue;
        };
        let key = month_key(month_start);

        let dated_income: Decimal = incomes
            .iter()
            .filter(|inc| month_key(inc.date) == key)
            .map(|inc| inc.amount)
            .sum();
        let projected: Decimal = incomes
            .iter()
            .map(|inc| recurring_contribution(inc, month_start))
            .sum();
        let month_expenses: Decimal = expenses
            .iter()
            .filter(|e| month_key(e.date) == key)
            .map(|e| e.amount)
            .sum();

        let income = dated_income + projected;
        series.push(MonthFlow {
            month: key,
            income,
            expenses: month_expenses,
            net: income - month_expenses,
        });
    }
    series
}

/// Limit vs spend per budgeted category. `expenses` should already be
/// filtered to the period under review.
pub fn budget_utilization(budgets: &[Budget], expenses: &[LedgerEntry]) -> Vec<BudgetUsage> {
    budgets
        .iter()
        .map(|b| {
            let spent: Decimal = expenses
                .iter()
                .filter(|e| e.category == b.category)
                .map(|e| e.amount)
                .sum();
            BudgetUsage {
                category: b.category.clone(),
                limit: b.limit_amount,
                spent,
                percent_used: if b.limit_amount > Decimal::ZERO {
                    spent / b.limit_amount * HUNDRED
                } else {
                    Decimal::ZERO
                },
                color: b.color.clone(),
            }
        })
        .collect()
}
