// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Investment tracking. Plain CRUD: buying or selling is not wired into the
//! balance engine, positions only carry manually-entered prices.

use crate::utils::{current_owner, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

struct Fields {
    symbol: String,
    name: String,
    r#type: String,
    quantity: Decimal,
    purchase_price: Decimal,
    current_price: Decimal,
    purchase_date: String,
}

fn fields_from_matches(sub: &clap::ArgMatches) -> Result<Fields> {
    Ok(Fields {
        symbol: sub.get_one::<String>("symbol").unwrap().trim().to_uppercase(),
        name: sub.get_one::<String>("name").unwrap().to_string(),
        r#type: sub.get_one::<String>("type").unwrap().to_string(),
        quantity: parse_decimal(sub.get_one::<String>("quantity").unwrap())?,
        purchase_price: parse_decimal(sub.get_one::<String>("price").unwrap())?,
        current_price: parse_decimal(sub.get_one::<String>("current").unwrap())?,
        purchase_date: parse_date(sub.get_one::<String>("date").unwrap())?.to_string(),
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let f = fields_from_matches(sub)?;
    conn.execute(
        "INSERT INTO investments(user_id, symbol, name, type, quantity, purchase_price,
         current_price, purchase_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            owner,
            f.symbol,
            f.name,
            f.r#type,
            f.quantity.to_string(),
            f.purchase_price.to_string(),
            f.current_price.to_string(),
            f.purchase_date,
        ],
    )?;
    println!("Added investment {} ({})", f.symbol, f.name);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let f = fields_from_matches(sub)?;
    let n = conn.execute(
        "UPDATE investments SET symbol=?1, name=?2, type=?3, quantity=?4, purchase_price=?5,
         current_price=?6, purchase_date=?7 WHERE id=?8 AND user_id=?9",
        params![
            f.symbol,
            f.name,
            f.r#type,
            f.quantity.to_string(),
            f.purchase_price.to_string(),
            f.current_price.to_string(),
            f.purchase_date,
            id,
            owner,
        ],
    )?;
    if n == 0 {
        bail!("Investment #{} not found", id);
    }
    println!("Updated investment #{}", id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let n = conn.execute(
        "DELETE FROM investments WHERE id=?1 AND user_id=?2",
        params![id, owner],
    )?;
    if n == 0 {
        bail!("Investment #{} not found", id);
    }
    println!("Removed investment #{}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT id, symbol, name, type, quantity, purchase_price, current_price, purchase_date
         FROM investments WHERE user_id=?1 ORDER BY symbol",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, String>(5)?,
            r.get::<_, String>(6)?,
            r.get::<_, String>(7)?,
        ))
    })?;
    let mut data = Vec::new();
    for row in rows {
        let (id, symbol, name, typ, qty_s, buy_s, cur_s, date) = row?;
        let qty = qty_s.parse::<Decimal>().unwrap_or(Decimal::ZERO);
        let buy = buy_s.parse::<Decimal>().unwrap_or(Decimal::ZERO);
        let cur = cur_s.parse::<Decimal>().unwrap_or(Decimal::ZERO);
        let value = qty * cur;
        let gain_pct = if buy > Decimal::ZERO {
            ((cur - buy) / buy * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };
        data.push(vec![
            id.to_string(),
            symbol,
            name,
            typ,
            qty_s,
            buy_s,
            cur_s,
            format!("{:.2}", value),
            format!("{}%", gain_pct),
            date,
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Id", "Symbol", "Name", "Type", "Qty", "Buy", "Now", "Value", "Gain", "Since"],
                data,
            )
        );
    }
    Ok(())
}
