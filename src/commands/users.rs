// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
            println!("Added user '{}'", name);
        }
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let mut stmt = conn.prepare("SELECT id, name, created_at FROM users ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok(User {
                    id: r.get(0)?,
                    name: r.get(1)?,
                    created_at: r.get(2)?,
                })
            })?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            if !maybe_print_json(json_flag, jsonl_flag, &users)? {
                let data = users
                    .into_iter()
                    .map(|u| vec![u.name, u.created_at])
                    .collect();
                println!("{}", pretty_table(&["Name", "Created"], data));
            }
        }
        Some(("rm", sub)) => {
            // cascades to every obligation the user owns
            let name = sub.get_one::<String>("name").unwrap();
            conn.execute("DELETE FROM users WHERE name=?1", params![name])?;
            println!("Removed user '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
