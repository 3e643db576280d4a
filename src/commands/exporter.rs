// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{bills, cards, loans, memberships, subscriptions};
use crate::utils::id_for_user;
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let kind = m.get_one::<String>("kind").unwrap().to_lowercase();
    let fmt = m.get_one::<String>("format").unwrap().to_lowercase();
    let out = m.get_one::<String>("out").unwrap();
    let user_id = id_for_user(conn, m.get_one::<String>("user").unwrap())?;

    // reject bad arguments before touching the output path
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    match kind.as_str() {
        "subscriptions" => {
            let rows = subscriptions::list(conn, user_id)?;
            if fmt == "json" {
                write_json(out, &rows)?;
            } else {
                let mut wtr = csv::Writer::from_path(out)?;
                wtr.write_record([
                    "name", "cost", "cadence", "next_due_date", "category", "active", "notes",
                ])?;
                for s in &rows {
                    wtr.write_record([
                        s.name.clone(),
                        s.cost.to_string(),
                        s.cadence.clone(),
                        s.next_due_date.map(|d| d.to_string()).unwrap_or_default(),
                        s.category.clone().unwrap_or_default(),
                        s.active.to_string(),
                        s.notes.clone().unwrap_or_default(),
                    ])?;
                }
                wtr.flush()?;
            }
        }
        "memberships" => {
            let rows = memberships::list(conn, user_id)?;
            if fmt == "json" {
                write_json(out, &rows)?;
            } else {
                let mut wtr = csv::Writer::from_path(out)?;
                wtr.write_record([
                    "name", "organization", "cost", "renewal_date", "status", "category", "notes",
                ])?;
                for m in &rows {
                    wtr.write_record([
                        m.name.clone(),
                        m.organization.clone().unwrap_or_default(),
                        m.cost.to_string(),
                        m.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                        m.status.to_string(),
                        m.category.clone().unwrap_or_default(),
                        m.notes.clone().unwrap_or_default(),
                    ])?;
                }
                wtr.flush()?;
            }
        }
        "bills" => {
            let rows = bills::list(conn, user_id)?;
            if fmt == "json" {
                write_json(out, &rows)?;
            } else {
                let mut wtr = csv::Writer::from_path(out)?;
                wtr.write_record([
                    "name", "amount", "due_date", "status", "is_recurring", "category", "notes",
                ])?;
                for b in &rows {
                    wtr.write_record([
                        b.name.clone(),
                        b.amount.to_string(),
                        b.due_date.to_string(),
                        b.status.to_string(),
                        b.is_recurring.to_string(),
                        b.category.clone().unwrap_or_default(),
                        b.notes.clone().unwrap_or_default(),
                    ])?;
                }
                wtr.flush()?;
            }
        }
        "cards" => {
            let rows = cards::list(conn, user_id)?;
            if fmt == "json" {
                write_json(out, &rows)?;
            } else {
                let mut wtr = csv::Writer::from_path(out)?;
                wtr.write_record([
                    "name", "bank", "last_four", "balance", "credit_limit", "due_date",
                ])?;
                for c in &rows {
                    wtr.write_record([
                        c.name.clone(),
                        c.bank.clone().unwrap_or_default(),
                        c.last_four.clone(),
                        c.balance.to_string(),
                        c.credit_limit.map(|l| l.to_string()).unwrap_or_default(),
                        c.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    ])?;
                }
                wtr.flush()?;
            }
        }
        "loans" => {
            let rows = loans::list(conn, user_id)?;
            if fmt == "json" {
                write_json(out, &rows)?;
            } else {
                let mut wtr = csv::Writer::from_path(out)?;
                wtr.write_record([
                    "name",
                    "lender",
                    "original_amount",
                    "outstanding_amount",
                    "interest_rate",
                    "payment_amount",
                    "next_payment_date",
                    "status",
                ])?;
                for l in &rows {
                    wtr.write_record([
                        l.name.clone(),
                        l.lender.clone().unwrap_or_default(),
                        l.original_amount.to_string(),
                        l.outstanding_amount.to_string(),
                        l.interest_rate.map(|r| r.to_string()).unwrap_or_default(),
                        l.payment_amount.map(|p| p.to_string()).unwrap_or_default(),
                        l.next_payment_date
                            .map(|d| d.to_string())
                            .unwrap_or_default(),
                        l.status.to_string(),
                    ])?;
                }
                wtr.flush()?;
            }
        }
        other => bail!(
            "Unknown kind: {} (use subscriptions|memberships|bills|cards|loans)",
            other
        ),
    }
    println!("Exported {} to {}", kind, out);
    Ok(())
}

fn write_json<T: serde::Serialize>(out: &str, rows: &[T]) -> Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(rows)?)?;
    Ok(())
}
