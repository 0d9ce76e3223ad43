// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income lifecycle: the mirror image of the expense manager with signs
//! flipped, plus recurrence metadata. `next_date` is recomputed from the
//! record's date on every write and is purely advisory; no scheduler ever
//! posts it.

use chrono::{Days, Months, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::balance::{self, parse_stored};
use super::{LedgerError, Result};
use crate::models::Frequency;

#[derive(Debug, Clone)]
pub struct IncomeInput {
    pub amount: Decimal,
    pub source: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
    pub account_id: Option<i64>,
}

/// The date one period after `date`. Weekly periods are fixed day counts;
/// the rest are calendar-month arithmetic.
pub fn next_occurrence(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    let next = match frequency {
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::BiWeekly => date.checked_add_days(Days::new(14)),
        Frequency::Monthly => date.checked_add_months(Months::new(1)),
        Frequency::Quarterly => date.checked_add_months(Months::new(3)),
        Frequency::Yearly => date.checked_add_months(Months::new(12)),
    };
    next.unwrap_or(date)
}

fn validate(input: &IncomeInput) -> Result<()> {
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    if input.category.trim().is_empty() {
        return Err(LedgerError::InvalidCategory);
    }
    Ok(())
}

fn recurrence_columns(input: &IncomeInput) -> (bool, Option<&'static str>, Option<String>) {
    match (input.recurring, input.frequency) {
        (true, Some(freq)) => (
            true,
            Some(freq.as_str()),
            Some(next_occurrence(input.date, freq).to_string()),
        ),
        _ => (false, None, None),
    }
}

pub fn create(conn: &mut Connection, owner: i64, input: &IncomeInput) -> Result<i64> {
    validate(input)?;
    let (recurring, frequency, next_date) = recurrence_columns(input);
    let tx = conn.transaction()?;
    // Credit first so a missing or inactive account surfaces as NotFound
    // before the row insert can trip a foreign-key error.
    if let Some(account_id) = input.account_id {
        balance::apply_delta(&tx, owner, account_id, input.amount)?;
    }
    tx.execute(
        "INSERT INTO incomes(user_id, amount, source, category, description, date,
         recurring, frequency, next_date, account_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            owner,
            input.amount.to_string(),
            input.source,
            input.category,
            input.description,
            input.date.to_string(),
            recurring,
            frequency,
            next_date,
            input.account_id,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

pub fn update(conn: &mut Connection, owner: i64, id: i64, input: &IncomeInput) -> Result<()> {
    validate(input)?;
    let (recurring, frequency, next_date) = recurrence_columns(input);
    let tx = conn.transaction()?;

    let original = tx
        .query_row(
            "SELECT amount, account_id FROM incomes WHERE id=?1 AND user_id=?2",
            params![id, owner],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, Option<i64>>(1)?)),
        )
        .optional()?;
    let (original_amount_s, original_account) = original.ok_or(LedgerError::NotFound)?;
    let original_amount = parse_stored(&original_amount_s)?;

    // Moved off the original account: take the credited amount back.
    if let Some(original_id) = original_account {
        if input.account_id != Some(original_id) {
            balance::apply_delta(&tx, owner, original_id, -original_amount)?;
        }
    }
    if let Some(account_id) = input.account_id {
        if original_account == Some(account_id) {
            balance::apply_delta(&tx, owner, account_id, input.amount - original_amount)?;
        } else {
            balance::apply_delta(&tx, owner, account_id, input.amount)?;
        }
    }

    tx.execute(
        "UPDATE incomes SET amount=?1, source=?2, category=?3, description=?4, date=?5,
         recurring=?6, frequency=?7, next_date=?8, account_id=?9
         WHERE id=?10 AND user_id=?11",
        params![
            input.amount.to_string(),
            input.source,
            input.category,
            input.description,
            input.date.to_string(),
            recurring,
            frequency,
            next_date,
            input.account_id,
            id,
            owner,
        ],
    )?;

    tx.commit()?;
    Ok(())
}

pub fn delete(conn: &mut Connection, owner: i64, id: i64) -> Result<()> {
    let tx = conn.transaction()?;
    let row = tx
        .query_row(
            "SELECT amount, account_id FROM incomes WHERE id=?1 AND user_id=?2",
            params![id, owner],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, Option<i64>>(1)?)),
        )
        .optional()?;
    let (amount_s, account) = row.ok_or(LedgerError::NotFound)?;
    let amount = parse_stored(&amount_s)?;

    tx.execute(
        "DELETE FROM incomes WHERE id=?1 AND user_id=?2",
        params![id, owner],
    )?;
    if let Some(account_id) = account {
        balance::apply_delta(&tx, owner, account_id, -amount)?;
    }
    tx.commit()?;
    Ok(())
}
