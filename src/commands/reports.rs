// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{self, IncomeEntry, LedgerEntry};
use crate::config;
use crate::models::{Budget, Frequency};
use crate::utils::{current_owner, fmt_amount, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};
use chrono::{Datelike, Months, NaiveDate, Utc};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("cashflow", sub)) => cashflow(conn, sub)?,
        Some(("categories", sub)) => categories(conn, sub)?,
        Some(("balances", sub)) => balances(conn, sub)?,
        Some(("budget", sub)) => budget(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn fetch_entries(
    conn: &Connection,
    owner: i64,
    table: &str,
    since: Option<NaiveDate>,
) -> Result<Vec<LedgerEntry>> {
    let mut sql = format!("SELECT category, amount, date FROM {} WHERE user_id=?1", table);
    if since.is_some() {
        sql.push_str(" AND date>=?2");
    }
    let mut stmt = conn.prepare(&sql)?;
    let map = |r: &rusqlite::Row| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    };
    let rows: Vec<(String, String, String)> = match since {
        Some(cutoff) => stmt
            .query_map(params![owner, cutoff.to_string()], map)?
            .collect::<rusqlite::Result<_>>()?,
        None => stmt
            .query_map(params![owner], map)?
            .collect::<rusqlite::Result<_>>()?,
    };
    let mut entries = Vec::with_capacity(rows.len());
    for (category, amount_s, date_s) in rows {
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in {}", amount_s, table))?;
        let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")?;
        entries.push(LedgerEntry {
            category,
            amount,
            date,
        });
    }
    Ok(entries)
}

fn fetch_income_entries(conn: &Connection, owner: i64) -> Result<Vec<IncomeEntry>> {
    let mut stmt = conn.prepare(
        "SELECT amount, date, recurring, frequency FROM incomes WHERE user_id=?1",
    )?;
    let rows: Vec<(String, String, bool, Option<String>)> = stmt
        .query_map(params![owner], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })?
        .collect::<rusqlite::Result<_>>()?;
    let mut entries = Vec::with_capacity(rows.len());
    for (amount_s, date_s, recurring, freq_s) in rows {
        let amount = amount_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid amount '{}' in incomes", amount_s))?;
        entries.push(IncomeEntry {
            amount,
            date: NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")?,
            recurring,
            frequency: freq_s.as_deref().and_then(Frequency::parse),
        });
    }
    Ok(entries)
}

fn cashflow(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<u32>("months").unwrap();

    let incomes = fetch_income_entries(conn, owner)?;
    let expenses = fetch_entries(conn, owner, "expenses", None)?;
    let today = Utc::now().date_naive();
    let series = analytics::cash_flow(&incomes, &expenses, months, today);

    if !maybe_print_json(json_flag, jsonl_flag, &series)? {
        let rows: Vec<Vec<String>> = series
            .iter()
            .map(|f| {
                vec![
                    f.month.clone(),
                    fmt_amount(&f.income),
                    fmt_amount(&f.expenses),
                    fmt_amount(&f.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn categories(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let months = *sub.get_one::<u32>("months").unwrap();
    let income_side = sub.get_flag("income");

    let today = Utc::now().date_naive();
    let cutoff = today
        .checked_sub_months(Months::new(months))
        .unwrap_or(today);
    let table = if income_side { "incomes" } else { "expenses" };
    let entries = fetch_entries(conn, owner, table, Some(cutoff))?;
    let (stats, total) = analytics::category_breakdown(&entries);

    if !maybe_print_json(json_flag, jsonl_flag, &stats)? {
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|s| {
                let color = if income_side {
                    config::income_color(&s.category)
                } else {
                    config::expense_color(&s.category)
                };
                vec![
                    s.category.clone(),
                    fmt_amount(&s.total),
                    s.count.to_string(),
                    fmt_amount(&s.average),
                    format!("{:.1}%", s.percentage),
                    color.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Category", "Total", "Count", "Average", "Share", "Color"],
                rows,
            )
        );
        println!("Total: {}", fmt_amount(&total));
    }
    Ok(())
}

fn balances(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT name, type, balance FROM accounts WHERE user_id=?1 AND active=1 ORDER BY name",
    )?;
    let rows: Vec<(String, String, String)> = stmt
        .query_map(params![owner], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })?
        .collect::<rusqlite::Result<_>>()?;

    let mut total = Decimal::ZERO;
    let mut data = Vec::new();
    for (name, typ, balance_s) in rows {
        let balance = balance_s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid balance '{}' for account {}", balance_s, name))?;
        total += balance;
        data.push(vec![name, typ, fmt_amount(&balance)]);
    }
    data.push(vec!["TOTAL".into(), "".into(), fmt_amount(&total)]);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Account", "Type", "Balance"], data));
    }
    Ok(())
}

fn budget(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = Utc::now().date_naive();
    let month = match sub.get_one::<String>("month") {
        Some(m) => parse_month(m)?,
        None => format!("{:04}-{:02}", today.year(), today.month()),
    };

    let mut stmt = conn.prepare(
        "SELECT id, category, limit_amount, color FROM budgets WHERE user_id=?1 ORDER BY category",
    )?;
    let rows: Vec<(i64, String, String, String)> = stmt
        .query_map(params![owner], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?))
        })?
        .collect::<rusqlite::Result<_>>()?;
    let mut budgets = Vec::with_capacity(rows.len());
    for (id, category, limit_s, color) in rows {
        budgets.push(Budget {
            id,
            user_id: owner,
            category,
            limit_amount: limit_s
                .parse::<Decimal>()
                .with_context(|| format!("Invalid budget limit '{}'", limit_s))?,
            color,
        });
    }

    let expenses: Vec<LedgerEntry> = fetch_entries(conn, owner, "expenses", None)?
        .into_iter()
        .filter(|e| format!("{:04}-{:02}", e.date.year(), e.date.month()) == month)
        .collect();
    let usage = analytics::budget_utilization(&budgets, &expenses);

    if !maybe_print_json(json_flag, jsonl_flag, &usage)? {
        let rows: Vec<Vec<String>> = usage
            .iter()
            .map(|u| {
                vec![
                    u.category.clone(),
                    fmt_amount(&u.limit),
                    fmt_amount(&u.spent),
                    format!("{:.1}%", u.percent_used),
                ]
            })
            .collect();
        println!("Budget utilization for {}", month);
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Spent", "Used"], rows)
        );
    }
    Ok(())
}
