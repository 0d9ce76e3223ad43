// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Static configuration tables: the category rosters and the
//! category-to-color mappings used by budget and analytics output.

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_COLOR: &str = "#6b7280";

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food & Dining",
    "Transportation",
    "Shopping",
    "Entertainment",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Groceries",
    "Gas & Fuel",
    "Insurance",
    "Subscriptions",
    "Personal Care",
    "Home & Garden",
    "Gifts & Donations",
    "Other",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investments",
    "Rental",
    "Side Hustle",
    "Bonus",
    "Gift",
    "Refund",
    "Other",
];

static EXPENSE_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Food & Dining", "#ef4444"),
        ("Transportation", "#3b82f6"),
        ("Shopping", "#8b5cf6"),
        ("Entertainment", "#f59e0b"),
        ("Bills & Utilities", "#10b981"),
        ("Healthcare", "#ec4899"),
        ("Travel", "#06b6d4"),
        ("Education", "#84cc16"),
        ("Other", "#6b7280"),
    ])
});

static INCOME_COLORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Salary", "#10b981"),
        ("Freelance", "#3b82f6"),
        ("Business", "#8b5cf6"),
        ("Investments", "#f59e0b"),
        ("Rental", "#ef4444"),
        ("Side Hustle", "#06b6d4"),
        ("Bonus", "#84cc16"),
        ("Gift", "#ec4899"),
        ("Refund", "#6b7280"),
        ("Other", "#64748b"),
    ])
});

pub fn expense_color(category: &str) -> &'static str {
    EXPENSE_COLORS.get(category).copied().unwrap_or(DEFAULT_COLOR)
}

pub fn income_color(category: &str) -> &'static str {
    INCOME_COLORS.get(category).copied().unwrap_or(DEFAULT_COLOR)
}
