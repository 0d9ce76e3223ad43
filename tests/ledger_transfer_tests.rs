// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::db;
use dompet::ledger::{self, LedgerError, TransferInput};
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

fn add_account(conn: &Connection, name: &str, balance: &str, typ: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(user_id, name, type, balance) VALUES (1, ?1, ?2, ?3)",
        params![name, typ, balance],
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

fn input(from: i64, to: i64, amount: &str, fee: &str) -> TransferInput {
    TransferInput {
        from_account_id: from,
        to_account_id: to,
        amount: amount.parse().unwrap(),
        fee: fee.parse().unwrap(),
        description: "monthly top-up".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 15).unwrap(),
    }
}

#[test]
fn fee_is_destroyed_not_credited() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    ledger::transfer::create(&mut conn, 1, &input(a, b, "1000", "50")).unwrap();
    assert_eq!(balance_of(&conn, a), "950".parse().unwrap());
    assert_eq!(balance_of(&conn, b), "1000".parse().unwrap());
    // total system balance dropped by exactly the fee
    assert_eq!(
        balance_of(&conn, a) + balance_of(&conn, b),
        "1950".parse().unwrap()
    );
}

#[test]
fn insufficient_balance_rejected_without_mutation() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1000", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, b, "1000", "50")).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance));
    assert_eq!(balance_of(&conn, a), "1000".parse().unwrap());
    assert_eq!(balance_of(&conn, b), "0".parse().unwrap());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM transfers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn exact_cover_is_allowed() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1050", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    ledger::transfer::create(&mut conn, 1, &input(a, b, "1000", "50")).unwrap();
    assert_eq!(balance_of(&conn, a), "0".parse().unwrap());
}

#[test]
fn self_transfer_rejected() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, a, "100", "5")).unwrap_err();
    assert!(matches!(err, LedgerError::SelfTransfer));
    assert_eq!(balance_of(&conn, a), "2000".parse().unwrap());
}

#[test]
fn missing_account_rejected() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, 999, "100", "0")).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAccount));
    assert_eq!(balance_of(&conn, a), "2000".parse().unwrap());
}

#[test]
fn credit_account_may_overdraw() {
    let mut conn = setup();
    let card = add_account(&conn, "Visa", "100", "credit");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    ledger::transfer::create(&mut conn, 1, &input(card, b, "500", "10")).unwrap();
    // negative balance represents amount owed
    assert_eq!(balance_of(&conn, card), "-410".parse().unwrap());
    assert_eq!(balance_of(&conn, b), "500".parse().unwrap());
}

#[test]
fn checking_account_may_not_overdraw() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "100", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, b, "500", "0")).unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientBalance));
}

#[test]
fn account_names_snapshotted_at_transfer_time() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    ledger::transfer::create(&mut conn, 1, &input(a, b, "100", "0")).unwrap();
    conn.execute("UPDATE accounts SET name='Renamed' WHERE id=?1", [a])
        .unwrap();
    let (from_name, to_name): (String, String) = conn
        .query_row(
            "SELECT from_account_name, to_account_name FROM transfers LIMIT 1",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(from_name, "BCA");
    assert_eq!(to_name, "OVO");
}

#[test]
fn zero_amount_rejected() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, b, "0", "0")).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount));
}

#[test]
fn negative_fee_rejected() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "2000", "checking");
    let b = add_account(&conn, "OVO", "0", "ewallet");
    let err = ledger::transfer::create(&mut conn, 1, &input(a, b, "100", "-5")).unwrap_err();
    assert!(matches!(err, LedgerError::InvalidAmount));
}
