// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::analytics::{
    IncomeEntry, LedgerEntry, budget_utilization, cash_flow, category_breakdown,
    recurring_contribution,
};
use dompet::models::{Budget, Frequency};
use rust_decimal::Decimal;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn entry(category: &str, amount: &str, date: NaiveDate) -> LedgerEntry {
    LedgerEntry {
        category: category.into(),
        amount: amount.parse().unwrap(),
        date,
    }
}

fn recurring(amount: &str, date: NaiveDate, freq: Frequency) -> IncomeEntry {
    IncomeEntry {
        amount: amount.parse().unwrap(),
        date,
        recurring: true,
        frequency: Some(freq),
    }
}

#[test]
fn breakdown_sums_counts_and_percentages() {
    let entries = vec![
        entry("Food & Dining", "60", d(2025, 8, 1)),
        entry("Food & Dining", "40", d(2025, 8, 2)),
        entry("Transportation", "300", d(2025, 8, 3)),
    ];
    let (stats, total) = category_breakdown(&entries);
    assert_eq!(total, "400".parse().unwrap());
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].category, "Transportation");
    assert_eq!(stats[0].percentage, "75".parse().unwrap());
    assert_eq!(stats[1].category, "Food & Dining");
    assert_eq!(stats[1].total, "100".parse().unwrap());
    assert_eq!(stats[1].count, 2);
    assert_eq!(stats[1].average, "50".parse().unwrap());
    assert_eq!(stats[1].percentage, "25".parse().unwrap());
}

#[test]
fn breakdown_of_nothing_is_empty() {
    let (stats, total) = category_breakdown(&[]);
    assert!(stats.is_empty());
    assert_eq!(total, Decimal::ZERO);
}

#[test]
fn weekly_and_biweekly_use_fixed_multipliers() {
    let month = d(2025, 8, 1);
    let weekly = recurring("100", d(2025, 8, 1), Frequency::Weekly);
    assert_eq!(recurring_contribution(&weekly, month), "433.00".parse().unwrap());
    let biweekly = recurring("100", d(2025, 8, 1), Frequency::BiWeekly);
    assert_eq!(
        recurring_contribution(&biweekly, month),
        "217.00".parse().unwrap()
    );
}

#[test]
fn quarterly_lands_every_third_month_from_start() {
    let inc = recurring("500", d(2025, 1, 15), Frequency::Quarterly);
    assert_eq!(recurring_contribution(&inc, d(2025, 1, 1)), "500".parse().unwrap());
    assert_eq!(recurring_contribution(&inc, d(2025, 2, 1)), Decimal::ZERO);
    assert_eq!(recurring_contribution(&inc, d(2025, 4, 1)), "500".parse().unwrap());
    assert_eq!(recurring_contribution(&inc, d(2025, 7, 1)), "500".parse().unwrap());
    assert_eq!(recurring_contribution(&inc, d(2025, 8, 1)), Decimal::ZERO);
}

#[test]
fn yearly_lands_only_in_matching_month() {
    let inc = recurring("1200", d(2024, 8, 10), Frequency::Yearly);
    assert_eq!(recurring_contribution(&inc, d(2025, 8, 1)), "1200".parse().unwrap());
    assert_eq!(recurring_contribution(&inc, d(2025, 7, 1)), Decimal::ZERO);
}

#[test]
fn no_contribution_before_income_start() {
    let inc = recurring("100", d(2025, 8, 1), Frequency::Monthly);
    assert_eq!(recurring_contribution(&inc, d(2025, 7, 1)), Decimal::ZERO);
}

#[test]
fn non_recurring_never_projects() {
    let inc = IncomeEntry {
        amount: "100".parse().unwrap(),
        date: d(2025, 8, 1),
        recurring: false,
        frequency: Some(Frequency::Monthly),
    };
    assert_eq!(recurring_contribution(&inc, d(2025, 8, 1)), Decimal::ZERO);
}

#[test]
fn cash_flow_buckets_by_month_and_projects_recurrence() {
    let today = d(2025, 8, 30);
    let incomes = vec![
        IncomeEntry {
            amount: "100".parse().unwrap(),
            date: d(2025, 7, 10),
            recurring: false,
            frequency: None,
        },
        recurring("1000", d(2025, 6, 5), Frequency::Monthly),
    ];
    let expenses = vec![entry("Food & Dining", "300", d(2025, 8, 15))];

    let series = cash_flow(&incomes, &expenses, 3, today);
    assert_eq!(series.len(), 3);
    assert_eq!(series[0].month, "2025-06");
    assert_eq!(series[1].month, "2025-07");
    assert_eq!(series[2].month, "2025-08");

    // June: the recurring income is both dated there and projected there.
    assert_eq!(series[0].income, "2000".parse().unwrap());
    assert_eq!(series[1].income, "1100".parse().unwrap());
    assert_eq!(series[2].income, "1000".parse().unwrap());
    assert_eq!(series[2].expenses, "300".parse().unwrap());
    assert_eq!(series[2].net, "700".parse().unwrap());
}

#[test]
fn budget_utilization_compares_limits_to_spend() {
    let budgets = vec![
        Budget {
            id: 1,
            user_id: 1,
            category: "Food & Dining".into(),
            limit_amount: "200".parse().unwrap(),
            color: "#ef4444".into(),
        },
        Budget {
            id: 2,
            user_id: 1,
            category: "Travel".into(),
            limit_amount: "1000".parse().unwrap(),
            color: "#06b6d4".into(),
        },
    ];
    let expenses = vec![
        entry("Food & Dining", "50", d(2025, 8, 1)),
        entry("Food & Dining", "100", d(2025, 8, 9)),
        entry("Shopping", "999", d(2025, 8, 9)),
    ];
    let usage = budget_utilization(&budgets, &expenses);
    assert_eq!(usage.len(), 2);
    assert_eq!(usage[0].spent, "150".parse().unwrap());
    assert_eq!(usage[0].percent_used, "75".parse().unwrap());
    assert_eq!(usage[1].spent, Decimal::ZERO);
    assert_eq!(usage[1].percent_used, Decimal::ZERO);
}
