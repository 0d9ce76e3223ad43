// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Inter-account transfers. Create-only: editing or deleting a transfer is
//! unsupported. The source account pays amount + fee, the destination
//! receives the amount, and the fee is credited nowhere (it models a bank
//! fee). Account names are snapshotted onto the row so the history survives
//! later renames.

use chrono::NaiveDate;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

use super::balance::{self, fetch_account};
use super::{LedgerError, Result};

#[derive(Debug, Clone)]
pub struct TransferInput {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: Decimal,
    pub fee: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

pub fn create(conn: &mut Connection, owner: i64, input: &TransferInput) -> Result<i64> {
    if input.from_account_id == input.to_account_id {
        // Would otherwise silently apply a net -fee to the account.
        return Err(LedgerError::SelfTransfer);
    }
    if input.amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    if input.fee < Decimal::ZERO {
        return Err(LedgerError::InvalidAmount);
    }

    let from = fetch_account(conn, owner, input.from_account_id)?
        .ok_or(LedgerError::InvalidAccount)?;
    let to =
        fetch_account(conn, owner, input.to_account_id)?.ok_or(LedgerError::InvalidAccount)?;

    // Authorization-time check only; concurrent mutation after this point is
    // not re-checked. Overdraft-capable (credit) accounts may go negative.
    let total = input.amount + input.fee;
    if from.balance < total && !from.r#type.can_overdraw() {
        return Err(LedgerError::InsufficientBalance);
    }

    let tx = conn.transaction()?;
    tx.execute(
        "INSERT INTO transfers(user_id, from_account_id, to_account_id,
         from_account_name, to_account_name, amount, fee, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            owner,
            input.from_account_id,
            input.to_account_id,
            from.name,
            to.name,
            input.amount.to_string(),
            input.fee.to_string(),
            input.description,
            input.date.to_string(),
        ],
    )?;
    let id = tx.last_insert_rowid();
    balance::apply_delta(&tx, owner, input.from_account_id, -total)?;
    balance::apply_delta(&tx, owner, input.to_account_id, input.amount)?;
    tx.commit()?;
    Ok(id)
}
