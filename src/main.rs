// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use dompet::{cli, commands, db};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&conn, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut conn, sub)?,
        Some(("income", sub)) => commands::incomes::handle(&mut conn, sub)?,
        Some(("transfer", sub)) => commands::transfers::handle(&mut conn, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("invest", sub)) => commands::investments::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
