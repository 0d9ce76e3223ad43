// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{self, TransferInput};
use crate::utils::{
    current_owner, id_for_account, maybe_print_json, parse_amount, parse_date, pretty_table,
};
use anyhow::Result;
use rusqlite::{Connection, params};
use serde::Serialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let from = sub.get_one::<String>("from").unwrap();
    let to = sub.get_one::<String>("to").unwrap();
    let input = TransferInput {
        from_account_id: id_for_account(conn, owner, from)?,
        to_account_id: id_for_account(conn, owner, to)?,
        amount: parse_amount(sub.get_one::<String>("amount").unwrap()),
        fee: parse_amount(sub.get_one::<String>("fee").unwrap()),
        description: sub.get_one::<String>("desc").unwrap().to_string(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
    };
    let id = ledger::transfer::create(conn, owner, &input)?;
    println!(
        "Transfer #{}: {} from '{}' to '{}' (fee {})",
        id, input.amount, from, to, input.fee
    );
    Ok(())
}

#[derive(Serialize)]
pub struct TransferRow {
    pub id: i64,
    pub date: String,
    pub from: String,
    pub to: String,
    pub amount: String,
    pub fee: String,
    pub description: String,
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let owner = current_owner(conn)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut stmt = conn.prepare(
        "SELECT id, date, from_account_name, to_account_name, amount, fee, description
         FROM transfers WHERE user_id=?1 ORDER BY date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![owner], |r| {
        Ok(TransferRow {
            id: r.get(0)?,
            date: r.get(1)?,
            from: r.get(2)?,
            to: r.get(3)?,
            amount: r.get(4)?,
            fee: r.get(5)?,
            description: r.get(6)?,
        })
    })?;
    let mut data = Vec::new();
    for row in rows {
        data.push(row?);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.from.clone(),
                    r.to.clone(),
                    r.amount.clone(),
                    r.fee.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "From", "To", "Amount", "Fee", "Description"], rows)
        );
    }
    Ok(())
}
