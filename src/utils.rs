// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Permissive amount parsing: unparseable numeric input becomes 0. Ledger
/// validation then rejects the zero where a positive amount is required.
pub fn parse_amount(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

pub fn fmt_amount(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

pub fn split_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

/// The active profile's user id. Every command that touches owned records
/// resolves the owner here instead of trusting anything client-supplied.
pub fn current_owner(conn: &Connection) -> Result<i64> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let id_s = v.context("No active profile; run 'dompet user use <name>' first")?;
    let id: i64 = id_s
        .parse()
        .with_context(|| format!("Corrupt active_user setting '{}'", id_s))?;
    // The profile may have been removed after being selected.
    let exists: Option<i64> = conn
        .query_row("SELECT id FROM users WHERE id=?1", params![id], |r| {
            r.get(0)
        })
        .optional()?;
    exists.with_context(|| format!("Active profile {} no longer exists", id))
}

pub fn set_active_user(conn: &Connection, id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![id.to_string()],
    )?;
    Ok(())
}

pub fn id_for_user(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM users WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Profile '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_account(conn: &Connection, owner: i64, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE user_id=?1 AND name=?2")?;
    let id: i64 = stmt
        .query_row(params![owner, name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
