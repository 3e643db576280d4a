// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::windows;
use crate::models::BillStatus;
use crate::store::bills::{self, BillPatch, NewBill};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("overdue", sub)) => overdue(conn, sub)?,
        Some(("upcoming", sub)) => upcoming(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_status(s: &str) -> Result<BillStatus> {
    match BillStatus::parse(s.trim()) {
        Some(v) => Ok(v),
        None => bail!(
            "invalid status '{}', expected one of: {}",
            s,
            BillStatus::ALL.join(", ")
        ),
    }
}

fn bill_rows(found: &[&crate::models::Bill]) -> Vec<Vec<String>> {
    found
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.name.clone(),
                format!("{:.2}", b.amount),
                b.due_date.to_string(),
                b.status.to_string(),
                if b.is_recurring { "yes".into() } else { "no".into() },
                b.category.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

const BILL_HEADERS: [&str; 7] = ["ID", "Name", "Amount", "Due", "Status", "Recurring", "Category"];

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let status = sub
        .get_one::<String>("status")
        .map(|s| parse_status(s))
        .transpose()?
        .unwrap_or(BillStatus::Pending);
    let new = NewBill {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?,
        due_date: parse_date(sub.get_one::<String>("due").unwrap().trim())?,
        status,
        is_recurring: sub.get_flag("recurring"),
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let created = bills::insert(conn, user_id, &new)?;
    println!(
        "Added bill '{}' ({}) due {} as #{}",
        created.name, created.amount, created.due_date, created.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let found = if sub.get_flag("recurring") {
        bills::list_recurring(conn, user_id)?
    } else if let Some(status) = sub.get_one::<String>("status") {
        bills::list_by_status(conn, user_id, parse_status(status)?)?
    } else {
        bills::list(conn, user_id)?
    };
    if !maybe_print_json(json_flag, jsonl_flag, &found)? {
        let refs: Vec<&crate::models::Bill> = found.iter().collect();
        println!("{}", pretty_table(&BILL_HEADERS, bill_rows(&refs)));
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = BillPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        due_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
        is_recurring: sub.get_one::<bool>("recurring").copied(),
        category: sub.get_one::<String>("category").map(|s| s.to_string()),
        notes: sub.get_one::<String>("notes").map(|s| s.to_string()),
    };
    let updated = bills::update(conn, id, user_id, &patch)?;
    println!("Updated bill '{}' (#{})", updated.name, updated.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !bills::delete(conn, id, user_id)? {
        bail!("bill not found");
    }
    println!("Removed bill #{}", id);
    Ok(())
}

fn pay(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let paid = bills::mark_paid(conn, id, user_id)?;
    println!("Marked bill '{}' (#{}) as paid", paid.name, paid.id);
    Ok(())
}

fn overdue(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let found = bills::list(conn, user_id)?;
    let late = windows::overdue(&found, today());
    if !maybe_print_json(json_flag, jsonl_flag, &late)? {
        println!("{}", pretty_table(&BILL_HEADERS, bill_rows(&late)));
    }
    Ok(())
}

fn upcoming(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let days = *sub.get_one::<i64>("days").unwrap();
    let found = bills::list(conn, user_id)?;
    let due = windows::upcoming_within(&found, today(), days);
    if !maybe_print_json(json_flag, jsonl_flag, &due)? {
        println!("{}", pretty_table(&BILL_HEADERS, bill_rows(&due)));
    }
    Ok(())
}
