// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, ExpenseInput};
use crate::utils::{
    current_owner, id_for_account, maybe_print_json, parse_amount, parse_date, pretty_table,
    split_tags,
};
use anyhow::Result;
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

fn input_from_matches(conn: &Connection, owner: i64, sub: &clap::ArgMatches) -> Result<ExpenseInput> {
    let account_id = match sub.get_one::<String>("account") {
        Some(name) => Some(id_for_account(conn, owner, name)?),
        None => None,
    };
    Ok(ExpenseInput {
        amount: parse_amount(sub.get_one::<String>("amount").unwrap()),
        category: sub.get_one::<String>("category").unwrap().to_string(),
        description: sub.get_one::<String>("desc").unwrap().to_string(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        tags: split_tags(sub.get_one::<String>("tags").unwrap()),
        account_id,
    })
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let input = input_from_matches(conn, owner, sub)?;
    let id = ledger::expense::create(conn, owner, &input)?;
    println!(
        "Recorded expense #{}: {} on {} ({})",
        id, input.amount, input.date, input.category
    );
    Ok(())
}

fn edit(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let input = input_from_matches(conn, owner, sub)?;
    ledger::expense::update(conn, owner, id, &input)?;
    println!("Updated expense #{}", id);
    Ok(())
}

fn rm(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    ledger::expense::delete(conn, owner, id)?;
    println!("Deleted expense #{}", id);
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: i64,
    pub date: String,
    pub amount: String,
    pub category: String,
    pub description: String,
    pub tags: String,
    pub account: String,
}

pub fn query_rows(conn: &Connection, owner: i64, sub: &clap::ArgMatches) -> Result<Vec<ExpenseRow>> {
    let mut sql = String::from(
        "SELECT e.id, e.date, e.amount, e.category, e.description, e.tags, a.name
         FROM expenses e LEFT JOIN accounts a ON e.account_id=a.id
         WHERE e.user_id=?",
    );
    let mut params_vec: Vec<String> = vec![owner.to_string()];

    if let Some(month) = sub.get_one::<String>("month") {
        sql.push_str(" AND substr(e.date,1,7)=?");
        params_vec.push(month.into());
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        sql.push_str(" AND e.category=?");
        params_vec.push(cat.into());
    }
    sql.push_str(" ORDER BY e.date DESC, e.id DESC");
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
        data.push(ExpenseRow {
            id: r.get(0)?,
            date: r.get(1)?,
            amount: r.get(2)?,
            category: r.get(3)?,
            description: r.get(4)?,
            tags: r.get(5)?,
            account: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
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
                    r.category.clone(),
                    r.description.clone(),
                    r.tags.clone(),
                    r.account.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Amount", "Category", "Description", "Tags", "Account"],
                rows,
            )
        );
    }
    Ok(())
}
