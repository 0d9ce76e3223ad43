// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of account and what it is allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Ewallet,
}

impl AccountType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" => Some(Self::Credit),
            "ewallet" => Some(Self::Ewallet),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Ewallet => "ewallet",
        }
    }

    /// Whether the balance may go negative. For credit accounts a negative
    /// balance represents amount owed.
    pub fn can_overdraw(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub bank_name: String,
    pub account_number: String,
    pub balance: Decimal,
    pub r#type: AccountType,
    pub color: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub account_id: Option<i64>,
}

/// How often a recurring income repeats. Advisory metadata only; nothing
/// materializes future postings on a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    Weekly,
    BiWeekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "bi-weekly" => Some(Self::BiWeekly),
            "monthly" => Some(Self::Monthly),
            "quarterly" => Some(Self::Quarterly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: i64,
    pub amount: Decimal,
    pub source: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub recurring: bool,
    pub frequency: Option<Frequency>,
    pub next_date: Option<NaiveDate>,
    pub account_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    pub user_id: i64,
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub from_account_name: String,
    pub to_account_name: String,
    pub amount: Decimal,
    pub fee: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub limit_amount: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: i64,
    pub symbol: String,
    pub name: String,
    pub r#type: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub purchase_date: NaiveDate,
}
