// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::AccountType;
use crate::utils::{current_owner, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Result, bail};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let type_s = sub.get_one::<String>("type").unwrap();
            let Some(r#type) = AccountType::parse(type_s) else {
                bail!("Unknown account type '{}' (use checking|savings|credit|ewallet)", type_s);
            };
            let bank = sub.get_one::<String>("bank").unwrap();
            let number = sub.get_one::<String>("number").unwrap();
            let balance = parse_amount(sub.get_one::<String>("balance").unwrap());
            let color = sub.get_one::<String>("color").unwrap();
            conn.execute(
                "INSERT INTO accounts(user_id, name, bank_name, account_number, balance, type, color)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    owner,
                    name,
                    bank,
                    number,
                    balance.to_string(),
                    r#type.as_str(),
                    color
                ],
            )?;
            println!("Added {} account '{}' with balance {}", r#type.as_str(), name, balance);
        }
        Some(("list", sub)) => {
            let owner = current_owner(conn)?;
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let mut stmt = conn.prepare(
                "SELECT name, type, bank_name, balance, active FROM accounts
                 WHERE user_id=?1 ORDER BY name",
            )?;
            let rows = stmt.query_map(params![owner], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                    r.get::<_, bool>(4)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (name, typ, bank, balance, active) = row?;
                let status = if active { "active" } else { "closed" };
                data.push(vec![name, typ, bank, balance, status.to_string()]);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &data)? {
                println!(
                    "{}",
                    pretty_table(&["Name", "Type", "Bank", "Balance", "Status"], data)
                );
            }
        }
        Some(("close", sub)) => {
            let owner = current_owner(conn)?;
            let name = sub.get_one::<String>("name").unwrap();
            let n = conn.execute(
                "UPDATE accounts SET active=0 WHERE user_id=?1 AND name=?2",
                params![owner, name],
            )?;
            if n == 0 {
                bail!("Account '{}' not found", name);
            }
            println!("Closed account '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
