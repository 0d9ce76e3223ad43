// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The balance mutator. Applies signed deltas to an account's cached
//! balance, always inside the caller's transaction. Callers own sign
//! correctness; no invariant check happens here.

use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use super::{LedgerError, Result};
use crate::models::AccountType;

/// A snapshot of the columns the ledger core needs from an account row.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub r#type: AccountType,
}

pub(crate) fn parse_stored(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .map_err(|_| LedgerError::BadStoredValue(s.to_string()))
}

/// Loads an active account for `owner`, or `None` if absent.
pub fn fetch_account(
    conn: &Connection,
    owner: i64,
    account_id: i64,
) -> Result<Option<AccountSnapshot>> {
    let row = conn
        .query_row(
            "SELECT id, name, balance, type FROM accounts
             WHERE id=?1 AND user_id=?2 AND active=1",
            params![account_id, owner],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some((id, name, balance_s, type_s)) => {
            let balance = parse_stored(&balance_s)?;
            let r#type = AccountType::parse(&type_s)
                .ok_or_else(|| LedgerError::BadStoredValue(type_s.clone()))?;
            Ok(Some(AccountSnapshot {
                id,
                name,
                balance,
                r#type,
            }))
        }
        None => Ok(None),
    }
}

/// Applies `delta` (which may be negative) to the active account owned by
/// `owner`. Fails with `NotFound` when no such account exists. Must be
/// called with the transaction that also writes the triggering record, so
/// the record write and the balance change commit or roll back together.
pub fn apply_delta(conn: &Connection, owner: i64, account_id: i64, delta: Decimal) -> Result<()> {
    let account = fetch_account(conn, owner, account_id)?.ok_or(LedgerError::NotFound)?;
    let updated = (account.balance + delta).to_string();
    conn.execute(
        "UPDATE accounts SET balance=?1 WHERE id=?2 AND user_id=?3",
        params![updated, account_id, owner],
    )?;
    Ok(())
}
