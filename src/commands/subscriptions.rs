// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{cadence, windows};
use crate::store::subscriptions::{self, NewSubscription, SubscriptionPatch};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("upcoming", sub)) => upcoming(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let next_due_date = sub
        .get_one::<String>("due")
        .map(|s| parse_date(s.trim()))
        .transpose()?;
    let new = NewSubscription {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        cost: parse_decimal(sub.get_one::<String>("cost").unwrap().trim())?,
        cadence: sub.get_one::<String>("cadence").unwrap().trim().to_string(),
        next_due_date,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        active: !sub.get_flag("inactive"),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let created = subscriptions::insert(conn, user_id, &new)?;
    println!(
        "Added subscription '{}' ({} {}) as #{}",
        created.name, created.cost, created.cadence, created.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let subs = if sub.get_flag("active") {
        subscriptions::list_active(conn, user_id)?
    } else {
        subscriptions::list(conn, user_id)?
    };
    if !maybe_print_json(json_flag, jsonl_flag, &subs)? {
        let rows = subs
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.name.clone(),
                    format!("{:.2}", s.cost),
                    s.cadence.clone(),
                    format!("{:.2}", cadence::monthly_equivalent(s.cost, &s.cadence)),
                    s.next_due_date.map(|d| d.to_string()).unwrap_or_default(),
                    s.category.clone().unwrap_or_default(),
                    if s.active { "yes".into() } else { "no".into() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Cost", "Cadence", "Monthly", "Next Due", "Category", "Active"],
                rows
            )
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = SubscriptionPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        cost: sub
            .get_one::<String>("cost")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        cadence: sub.get_one::<String>("cadence").map(|s| s.trim().to_string()),
        next_due_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        active: sub.get_one::<bool>("active").copied(),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let updated = subscriptions::update(conn, id, user_id, &patch)?;
    println!("Updated subscription '{}' (#{})", updated.name, updated.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !subscriptions::delete(conn, id, user_id)? {
        bail!("subscription not found");
    }
    println!("Removed subscription #{}", id);
    Ok(())
}

fn upcoming(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let days = *sub.get_one::<i64>("days").unwrap();
    let subs = subscriptions::list(conn, user_id)?;
    let due = windows::upcoming_within(&subs, today(), days);
    if !maybe_print_json(json_flag, jsonl_flag, &due)? {
        let rows = due
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    format!("{:.2}", s.cost),
                    s.cadence.clone(),
                    s.next_due_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Cost", "Cadence", "Next Due"], rows)
        );
    }
    Ok(())
}
