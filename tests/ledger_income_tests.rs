// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use dompet::db;
use dompet::ledger::income::next_occurrence;
use dompet::ledger::{self, IncomeInput, LedgerError};
use dompet::models::Frequency;
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

fn input(amount: &str, account_id: Option<i64>) -> IncomeInput {
    IncomeInput {
        amount: amount.parse().unwrap(),
        source: "Acme Corp".into(),
        category: "Salary".into(),
        description: None,
        date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
        recurring: false,
        frequency: None,
        account_id,
    }
}

#[test]
fn create_credits_account() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1000");
    ledger::income::create(&mut conn, 1, &input("500", Some(a))).unwrap();
    assert_eq!(balance_of(&conn, a), "1500".parse().unwrap());
}

#[test]
fn delete_reverses_credit() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1000.25");
    let id = ledger::income::create(&mut conn, 1, &input("99.75", Some(a))).unwrap();
    assert_eq!(balance_of(&conn, a), "1100".parse().unwrap());
    ledger::income::delete(&mut conn, 1, id).unwrap();
    assert_eq!(balance_of(&conn, a), "1000.25".parse().unwrap());
}

#[test]
fn balance_tracks_sum_of_existing_incomes() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "100");
    ledger::income::create(&mut conn, 1, &input("10", Some(a))).unwrap();
    ledger::income::create(&mut conn, 1, &input("20", Some(a))).unwrap();
    ledger::income::create(&mut conn, 1, &input("30", Some(a))).unwrap();
    assert_eq!(balance_of(&conn, a), "160".parse().unwrap());
}

#[test]
fn edit_in_place_applies_only_difference() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1000");
    let id = ledger::income::create(&mut conn, 1, &input("100", Some(a))).unwrap();
    ledger::income::update(&mut conn, 1, id, &input("150", Some(a))).unwrap();
    assert_eq!(balance_of(&conn, a), "1150".parse().unwrap());
}

#[test]
fn edit_moves_income_between_accounts() {
    let mut conn = setup();
    let a = add_account(&conn, "BCA", "1000");
    let b = add_account(&conn, "OVO", "0");
    let id = ledger::income::create(&mut conn, 1, &input("200", Some(a))).unwrap();
    ledger::income::update(&mut conn, 1, id, &input("250", Some(b))).unwrap();
    assert_eq!(balance_of(&conn, a), "1000".parse().unwrap());
    assert_eq!(balance_of(&conn, b), "250".parse().unwrap());
}

#[test]
fn delete_missing_is_not_found() {
    let mut conn = setup();
    let err = ledger::income::delete(&mut conn, 1, 7).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound));
}

#[test]
fn recurring_income_stores_next_date() {
    let mut conn = setup();
    let mut i = input("100", None);
    i.recurring = true;
    i.frequency = Some(Frequency::Monthly);
    let id = ledger::income::create(&mut conn, 1, &i).unwrap();
    let (recurring, freq, next): (bool, Option<String>, Option<String>) = conn
        .query_row(
            "SELECT recurring, frequency, next_date FROM incomes WHERE id=?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert!(recurring);
    assert_eq!(freq.as_deref(), Some("monthly"));
    assert_eq!(next.as_deref(), Some("2025-09-01"));
}

#[test]
fn non_recurring_income_clears_recurrence_columns() {
    let mut conn = setup();
    let mut i = input("100", None);
    i.recurring = true;
    i.frequency = Some(Frequency::Weekly);
    let id = ledger::income::create(&mut conn, 1, &i).unwrap();

    // Editing back to one-off drops frequency and next_date.
    ledger::income::update(&mut conn, 1, id, &input("100", None)).unwrap();
    let (recurring, freq, next): (bool, Option<String>, Option<String>) = conn
        .query_row(
            "SELECT recurring, frequency, next_date FROM incomes WHERE id=?1",
            [id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert!(!recurring);
    assert_eq!(freq, None);
    assert_eq!(next, None);
}

#[test]
fn next_occurrence_per_frequency() {
    let d = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
    assert_eq!(
        next_occurrence(d, Frequency::Weekly),
        NaiveDate::from_ymd_opt(2025, 8, 22).unwrap()
    );
    assert_eq!(
        next_occurrence(d, Frequency::BiWeekly),
        NaiveDate::from_ymd_opt(2025, 8, 29).unwrap()
    );
    assert_eq!(
        next_occurrence(d, Frequency::Monthly),
        NaiveDate::from_ymd_opt(2025, 9, 15).unwrap()
    );
    assert_eq!(
        next_occurrence(d, Frequency::Quarterly),
        NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
    );
    assert_eq!(
        next_occurrence(d, Frequency::Yearly),
        NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
    );
}

#[test]
fn next_occurrence_clamps_to_month_end() {
    let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    assert_eq!(
        next_occurrence(d, Frequency::Monthly),
        NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
    );
}
