// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::windows;
use crate::models::MembershipStatus;
use crate::store::memberships::{self, MembershipPatch, NewMembership};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("expiring", sub)) => expiring(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_status(s: &str) -> Result<MembershipStatus> {
    match MembershipStatus::parse(s.trim()) {
        Some(v) => Ok(v),
        None => bail!(
            "invalid status '{}', expected one of: {}",
            s,
            MembershipStatus::ALL.join(", ")
        ),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let status = sub
        .get_one::<String>("status")
        .map(|s| parse_status(s))
        .transpose()?
        .unwrap_or(MembershipStatus::Active);
    let new = NewMembership {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        organization: sub.get_one::<String>("organization").map(|s| s.to_string()),
        cost: parse_decimal(sub.get_one::<String>("cost").unwrap().trim())?,
        renewal_date: sub
            .get_one::<String>("renewal")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        status,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let created = memberships::insert(conn, user_id, &new)?;
    println!("Added membership '{}' as #{}", created.name, created.id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let rows = memberships::list(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|m| {
                vec![
                    m.id.to_string(),
                    m.name.clone(),
                    m.organization.clone().unwrap_or_default(),
                    format!("{:.2}", m.cost),
                    m.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                    m.status.to_string(),
                    m.category.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Organization", "Cost", "Renewal", "Status", "Category"],
                data
            )
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = MembershipPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        organization: sub.get_one::<String>("organization").map(|s| s.to_string()),
        cost: sub
            .get_one::<String>("cost")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        renewal_date: sub
            .get_one::<String>("renewal")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let updated = memberships::update(conn, id, user_id, &patch)?;
    println!("Updated membership '{}' (#{})", updated.name, updated.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !memberships::delete(conn, id, user_id)? {
        bail!("membership not found");
    }
    println!("Removed membership #{}", id);
    Ok(())
}

fn expiring(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let days = *sub.get_one::<i64>("days").unwrap();
    let rows = memberships::list(conn, user_id)?;
    let soon = windows::expiring_within(&rows, today(), days);
    if !maybe_print_json(json_flag, jsonl_flag, &soon)? {
        let data = soon
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    m.organization.clone().unwrap_or_default(),
                    format!("{:.2}", m.cost),
                    m.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                    m.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Organization", "Cost", "Renewal", "Status"], data)
        );
    }
    Ok(())
}
