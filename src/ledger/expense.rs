// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Expense lifecycle. An expense spends from its (optional) account, so the
//! account is debited on create and refunded on delete; edits reconcile
//! against the stored pre-edit snapshot, never against caller-supplied
//! "original" values.

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::balance::{self, parse_stored};
use super::{LedgerError, Result};
use crate::utils::join_tags;

#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub account_id: Option<i64>,
}

fn validate(input: &ExpenseInput) -> Result<()> {
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    if input.category.trim().is_empty() {
        return Err(LedgerError::InvalidCategory);
    }
    Ok(())
}

pub fn create(conn: &mut Connection, owner: i64, input: &ExpenseInput) -> Result<i64> {
    validate(input)?;
    let tx = conn.transaction()?;
    // Debit first so a missing or inactive account surfaces as NotFound
    // before the row insert can trip a foreign-key error.
    if let Some(account_id) = input.account_id {
        balance::apply_delta(&tx, owner, account_id, -input.amount)?;
    }
    tx.execute(
        "INSERT INTO expenses(user_id, amount, category, description, date, tags, account_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            owner,
            input.amount.to_string(),
            input.category,
            input.description,
            input.date.to_string(),
            join_tags(&input.tags),
            input.account_id,
        ],
    )?;
    let id = tx.last_insert_rowid();
    tx.commit()?;
    Ok(id)
}

pub fn update(conn: &mut Connection, owner: i64, id: i64, input: &ExpenseInput) -> Result<()> {
    validate(input)?;
    let tx = conn.transaction()?;

    // Pre-edit snapshot, read inside the same transaction that rewrites it.
    let original = tx
        .query_row(
            "SELECT amount, account_id FROM expenses WHERE id=?1 AND user_id=?2",
            params![id, owner],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, Option<i64>>(1)?)),
        )
        .optional()?;
    let (original_amount_s, original_account) = original.ok_or(LedgerError::NotFound)?;
    let original_amount = parse_stored(&original_amount_s)?;

    // Moved off the original account: refund it in full.
    if let Some(original_id) = original_account {
        if input.account_id != Some(original_id) {
            balance::apply_delta(&tx, owner, original_id, original_amount)?;
        }
    }
    if let Some(account_id) = input.account_id {
        if original_account == Some(account_id) {
            // Same account: apply only the difference to avoid double-counting.
            balance::apply_delta(&tx, owner, account_id, -(input.amount - original_amount))?;
        } else {
            balance::apply_delta(&tx, owner, account_id, -input.amount)?;
        }
    }

    tx.execute(
        "UPDATE expenses SET amount=?1, category=?2, description=?3, date=?4, tags=?5,
         account_id=?6 WHERE id=?7 AND user_id=?8",
        params![
            input.amount.to_string(),
            input.category,
            input.description,
            input.date.to_string(),
            join_tags(&input.tags),
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
            "SELECT amount, account_id FROM expenses WHERE id=?1 AND user_id=?2",
            params![id, owner],
            |r| Ok((r.get::<_, String>(0)?, r.get::<_, Option<i64>>(1)?)),
        )
        .optional()?;
    let (amount_s, account) = row.ok_or(LedgerError::NotFound)?;
    let amount = parse_stored(&amount_s)?;

    tx.execute(
        "DELETE FROM expenses WHERE id=?1 AND user_id=?2",
        params![id, owner],
    )?;
    if let Some(account_id) = account {
        balance::apply_delta(&tx, owner, account_id, amount)?;
    }
    tx.commit()?;
    Ok(())
}
