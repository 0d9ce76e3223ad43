// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod budgets;
pub mod expenses;
pub mod exporter;
pub mod incomes;
pub mod investments;
pub mod reports;
pub mod transfers;
pub mod users;
