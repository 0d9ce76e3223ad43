// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::current_owner;
use anyhow::Result;
use rusqlite::{Connection, params};
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("expenses", sub)) => export_expenses(conn, sub),
        Some(("incomes", sub)) => export_incomes(conn, sub),
        Some(("transfers", sub)) => export_transfers(conn, sub),
        _ => Ok(()),
    }
}

fn export_expenses(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT e.date, e.amount, e.category, e.description, e.tags, a.name
         FROM expenses e LEFT JOIN accounts a ON e.account_id=a.id
         WHERE e.user_id=?1 ORDER BY e.date, e.id",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, Option<String>>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "amount", "category", "description", "tags", "account"])?;
            for row in rows {
                let (d, amt, cat, desc, tags, acct) = row?;
                wtr.write_record([d, amt, cat, desc, tags, acct.unwrap_or_default()])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, amt, cat, desc, tags, acct) = row?;
                items.push(json!({
                    "date": d, "amount": amt, "category": cat,
                    "description": desc, "tags": tags, "account": acct
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported expenses to {}", out);
    Ok(())
}

fn export_incomes(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT i.date, i.amount, i.source, i.category, i.recurring, i.frequency, a.name
         FROM incomes i LEFT JOIN accounts a ON i.account_id=a.id
         WHERE i.user_id=?1 ORDER BY i.date, i.id",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, bool>(4)?,
            r.get::<_, Option<String>>(5)?,
            r.get::<_, Option<String>>(6)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "date", "amount", "source", "category", "recurring", "frequency", "account",
            ])?;
            for row in rows {
                let (d, amt, src, cat, rec, freq, acct) = row?;
                wtr.write_record([
                    d,
                    amt,
                    src,
                    cat,
                    rec.to_string(),
                    freq.unwrap_or_default(),
                    acct.unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, amt, src, cat, rec, freq, acct) = row?;
                items.push(json!({
                    "date": d, "amount": amt, "source": src, "category": cat,
                    "recurring": rec, "frequency": freq, "account": acct
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported incomes to {}", out);
    Ok(())
}

fn export_transfers(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let mut stmt = conn.prepare(
        "SELECT date, from_account_name, to_account_name, amount, fee, description
         FROM transfers WHERE user_id=?1 ORDER BY date, id",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, String>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
        ))
    })?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "from", "to", "amount", "fee", "description"])?;
            for row in rows {
                let (d, from, to, amt, fee, desc) = row?;
                wtr.write_record([d, from, to, amt, fee, desc])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for row in rows {
                let (d, from, to, amt, fee, desc) = row?;
                items.push(json!({
                    "date": d, "from": from, "to": to,
                    "amount": amt, "fee": fee, "description": desc
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transfers to {}", out);
    Ok(())
}
