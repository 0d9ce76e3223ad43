// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! End-to-end balance consistency across mixed record types on one account.

use chrono::NaiveDate;
use dompet::db;
use dompet::ledger::{self, ExpenseInput, IncomeInput};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES ('demo')", [])
        .unwrap();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_user', '1')",
        [],
    )
    .unwrap();
    conn
}

fn add_account(conn: &Connection, name: &str, balance: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance) VALUES (1, ?1, 'checking', ?2)",
        params![name, balance],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn balance_of(conn: &Connection, id: i64) -> Decimal {
    let s: String = conn
        .query_row("SELECT balance FROM accounts WHERE id=?1", [id], |r| {
            r.get(0)
        })
        .unwrap();
    s.parse().unwrap()
}

#[test]
fn seeded_account_survives_mixed_lifecycle() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA Main Account", "5000000");
    let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

    let expense_id = ledger::expense::create(
        &mut conn,
        1,
        &ExpenseInput {
            amount: "200000".parse().unwrap(),
            category: "Groceries".into(),
            description: "weekly shop".into(),
            date,
            tags: vec![],
            account_id: Some(a),
        },
    )
    .unwrap();
    assert_eq!(balance_of(&conn, a), "4800000".parse().unwrap());

    ledger::income::create(
        &mut conn,
        1,
        &IncomeInput {
            amount: "1000000".parse().unwrap(),
            source: "Acme Corp".into(),
            category: "Salary".into(),
            description: None,
            date,
            recurring: false,
            frequency: None,
            account_id: Some(a),
        },
    )
    .unwrap();
    assert_eq!(balance_of(&conn, a), "5800000".parse().unwrap());

    ledger::expense::delete(&mut conn, 1, expense_id).unwrap();
    assert_eq!(balance_of(&conn, a), "6000000".parse().unwrap());
}

#[test]
fn decimal_exact_round_trip_with_fractional_amounts() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "0.30");
    let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();

    // 0.1 + 0.2 style drift would show up here with binary floats.
    let id = ledger::expense::create(
        &mut conn,
        1,
        &ExpenseInput {
            amount: "0.10".parse().unwrap(),
            category: "Other".into(),
            description: String::new(),
            date,
            tags: vec![],
            account_id: Some(a),
        },
    )
    .unwrap();
    assert_eq!(balance_of(&conn, a), "0.20".parse().unwrap());
    ledger::expense::delete(&mut conn, 1, id).unwrap();
    assert_eq!(balance_of(&conn, a), "0.30".parse().unwrap());
}
