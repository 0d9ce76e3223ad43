// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config;
use crate::utils::{current_owner, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if category.is_empty() {
        bail!("Category must not be empty");
    }
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let color = sub
        .get_one::<String>("color")
        .map(|s| s.to_string())
        .unwrap_or_else(|| config::expense_color(&category).to_string());
    conn.execute(
        "INSERT INTO budgets(user_id, category, limit_amount, color) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(user_id, category) DO UPDATE SET
           limit_amount=excluded.limit_amount, color=excluded.color",
        params![owner, category, limit.to_string(), color],
    )?;
    println!("Budget for {} = {}", category, limit);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let category = sub.get_one::<String>("category").unwrap();
    let n = conn.execute(
        "DELETE FROM budgets WHERE user_id=?1 AND category=?2",
        params![owner, category],
    )?;
    if n == 0 {
        bail!("No budget for category '{}'", category);
    }
    println!("Removed budget for {}", category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT category, limit_amount, color FROM budgets WHERE user_id=?1 ORDER BY category",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (c, l, col) = row?;
        data.push(vec![c, l, col]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&["Category", "Limit", "Color"], data));
    }
    Ok(())
}
