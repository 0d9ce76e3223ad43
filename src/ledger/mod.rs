// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The balance-consistency engine.
//!
//! Every expense, income, or transfer write runs inside a single SQLite
//! transaction together with the balance deltas it causes, so an account's
//! balance always equals its seed value plus the signed effect of every
//! ledger record that currently references it. Precondition failures are
//! raised before a transaction is opened; failures inside the unit of work
//! roll the whole operation back.

pub mod balance;
pub mod expense;
pub mod income;
pub mod transfer;

pub use expense::ExpenseInput;
pub use income::IncomeInput;
pub use transfer::TransferInput;

/// Failure modes of ledger operations. All are terminal for the request;
/// nothing in here retries.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The record or account does not exist for this owner. No mutation
    /// has been performed.
    #[error("not found")]
    NotFound,

    /// A transfer referenced an account that does not exist for this owner.
    #[error("invalid account selection")]
    InvalidAccount,

    /// The source account cannot cover amount + fee.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// Source and destination of a transfer are the same account.
    #[error("cannot transfer to the same account")]
    SelfTransfer,

    /// Amounts must be strictly positive.
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// Expenses require a non-empty category.
    #[error("category must not be empty")]
    InvalidCategory,

    /// A stored column failed to parse (corrupt amount or account type).
    #[error("invalid stored value '{0}'")]
    BadStoredValue(String),

    /// The underlying unit of work failed; the operation was rolled back.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
