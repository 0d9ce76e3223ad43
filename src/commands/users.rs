// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::{current_owner, id_for_user, pretty_table, set_active_user};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
            let id = conn.last_insert_rowid();
            // First profile becomes active automatically.
            if current_owner(conn).is_err() {
                set_active_user(conn, id)?;
                println!("Added profile '{}' (now active)", name);
            } else {
                println!("Added profile '{}'", name);
            }
        }
        Some(("use", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let id = id_for_user(conn, name)?;
            set_active_user(conn, id)?;
            println!("Active profile: {}", name);
        }
        Some(("list", _)) => {
            let active = current_owner(conn).ok();
            let mut stmt = conn.prepare("SELECT id, name, created_at FROM users ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (id, name, created) = row?;
                let marker = if active == Some(id) { "*" } else { "" };
                data.push(vec![marker.to_string(), name, created]);
            }
            println!("{}", pretty_table(&["", "Profile", "Created"], data));
        }
        _ => {}
    }
    Ok(())
}
