// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, IncomeInput};
use crate::models::Frequency;
use crate::utils::{
    current_owner, id_for_account, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn input_from_matches(conn: &Connection, owner: i64, sub: &clap::ArgMatches) -> Result<IncomeInput> {
    let recurring = sub.get_flag("recurring");
    let frequency = match sub.get_one::<String>("frequency") {
        Some(s) => match Frequency::parse(s) {
            Some(f) => Some(f),
            None => bail!(
                "Unknown frequency '{}' (use weekly|bi-weekly|monthly|quarterly|yearly)",
                s
            ),
        },
        None => None,
    };
    if recurring && frequency.is_none() {
        bail!("--recurring requires --frequency");
    }
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(id_for_account(conn, owner, name)?),
        None => None,
    };
    Ok(IncomeInput {
        amount: parse_amount(sub.get_one::<String>("amount").unwrap()),
        source: sub.get_one::<String>("source").unwrap().to_string(),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        description: sub.get_one::<String>("desc").map(|s| s.to_string()),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        recurring,
        frequency,
        account_id,
    })
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let input = input_from_matches(conn, owner, sub)?;
    let id = ledger::income::create(conn, owner, &input)?;
    println!(
        "Recorded income #{}: {} from '{}' on {}",
        id, input.amount, input.source, input.date
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let input = input_from_matches(conn, owner, sub)?;
    ledger::income::update(conn, owner, id, &input)?;
    println!("Updated income #{}", id);
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::income::delete(conn, owner, id)?;
    println!("Deleted income #{}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct IncomeRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub source: String,
    pub category: String,
    pub recurring: bool,
    pub frequency: String,
    pub next_date: String,
    pub account: String,
}

pub fn query_rows(conn: &Connection, owner: i64, sub: &clap::ArgMatches) -> Result<Vec<IncomeRow>> {
    let mut sql = String::from(
        "SELECT i.id, i.date, i.amount, i.source, i.category, i.recurring, i.frequency,
                i.next_date, a.name
         FROM incomes i LEFT JOIN accounts a ON i.account_id=a.id
         WHERE i.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![owner.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(i.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND i.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY i.date DESC, i.id DESC");
    if let Some(limit) = sub.get_one::<usize>("limit") {
        sql.push_str(" LIMIT ?");
        params_vec.push(limit.to_string());
    }

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::ToSql> = params_vec
        .iter()
        .map(|s| s as &dyn rusqlite::ToSql)
        .collect();
    let mut rows = stmt.query(rusqlite::params_from_iter(params))?;

    let mut data = Vec::new();
    while let Some(r) = rows.next()? {
        data.push(IncomeRow {
            id: r.get(0)?,
            date: r.get(1)?,
            amount: r.get(2)?,
            source: r.get(3)?,
            category: r.get(4)?,
            recurring: r.get(5)?,
            frequency: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
            next_date: r.get::<_, Option<String>>(7)?.unwrap_or_default(),
            account: r.get::<_, Option<String>>(8)?.unwrap_or_default(),
        });
    }
    Ok(data)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, owner, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.amount.clone(),
                    r.source.clone(),
                    r.category.clone(),
                    if r.recurring {
                        format!("{} (next {})", r.frequency, r.next_date)
                    } else {
                        String::new()
                    },
                    r.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Amount", "Source", "Category", "Recurring", "Account"],
                rows,
            )
        );
    }
    Ok(())
}
