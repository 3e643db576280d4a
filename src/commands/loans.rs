// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{analytics, ledger};
use crate::models::LoanStatus;
use crate::store::loans::{self, LoanPatch, NewLoan};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("pay", sub)) => pay(conn, sub)?,
        Some(("payments", sub)) => payments(conn, sub)?,
        Some(("progress", sub)) => progress(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_status(s: &str) -> Result<LoanStatus> {
    match LoanStatus::parse(s.trim()) {
        Some(v) => Ok(v),
        None => bail!(
            "invalid status '{}', expected one of: {}",
            s,
            LoanStatus::ALL.join(", ")
        ),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let original = parse_decimal(sub.get_one::<String>("original").unwrap().trim())?;
    // outstanding defaults to the full original when the loan starts untracked
    let outstanding = sub
        .get_one::<String>("outstanding")
        .map(|s| parse_decimal(s.trim()))
        .transpose()?
        .unwrap_or(original);
    let status = sub
        .get_one::<String>("status")
        .map(|s| parse_status(s))
        .transpose()?
        .unwrap_or(LoanStatus::Active);
    let new = NewLoan {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        lender: sub.get_one::<String>("lender").map(|s| s.to_string()),
        original_amount: original,
        outstanding_amount: outstanding,
        interest_rate: sub
            .get_one::<String>("rate")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        payment_amount: sub
            .get_one::<String>("payment")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        next_payment_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        status,
    };
    let created = loans::insert(conn, user_id, &new)?;
    println!(
        "Added loan '{}' ({} outstanding of {}) as #{}",
        created.name, created.outstanding_amount, created.original_amount, created.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let found = match sub.get_one::<String>("status") {
        None => loans::list(conn, user_id)?,
        Some(s) => match parse_status(s)? {
            LoanStatus::Active => loans::list_active(conn, user_id)?,
            LoanStatus::PaidOff => loans::list_paid_off(conn, user_id)?,
            LoanStatus::Deferred => {
                let mut all = loans::list(conn, user_id)?;
                all.retain(|l| l.status == LoanStatus::Deferred);
                all
            }
        },
    };
    if !maybe_print_json(json_flag, jsonl_flag, &found)? {
        let rows = found
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.name.clone(),
                    l.lender.clone().unwrap_or_default(),
                    format!("{:.2}", l.original_amount),
                    format!("{:.2}", l.outstanding_amount),
                    l.next_payment_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                    l.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Name", "Lender", "Original", "Outstanding", "Next Payment", "Status"],
                rows
            )
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = LoanPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        lender: sub.get_one::<String>("lender").map(|s| s.to_string()),
        original_amount: sub
            .get_one::<String>("original")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        outstanding_amount: sub
            .get_one::<String>("outstanding")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        interest_rate: sub
            .get_one::<String>("rate")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        payment_amount: sub
            .get_one::<String>("payment")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        next_payment_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
        status: sub
            .get_one::<String>("status")
            .map(|s| parse_status(s))
            .transpose()?,
    };
    let updated = loans::update(conn, id, user_id, &patch)?;
    println!("Updated loan '{}' (#{})", updated.name, updated.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !loans::delete(conn, id, user_id)? {
        bail!("loan not found");
    }
    println!("Removed loan #{} and its payment history", id);
    Ok(())
}

fn pay(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap().trim())?;
    let notes = sub.get_one::<String>("notes").map(|s| s.as_str());

    let outcome = ledger::record_payment(conn, user_id, id, amount, date, notes)?;
    println!(
        "Recorded payment of {} against '{}'; outstanding is now {}",
        amount, outcome.loan.name, outcome.loan.outstanding_amount
    );
    if outcome.paid_off {
        println!("✅ '{}' is paid off", outcome.loan.name);
    }
    Ok(())
}

fn payments(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let history = loans::payments(conn, id, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &history)? {
        let rows = history
            .iter()
            .map(|p| {
                vec![
                    p.payment_date.to_string(),
                    format!("{:.2}", p.amount),
                    p.notes.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Date", "Amount", "Notes"], rows));
    }
    Ok(())
}

fn progress(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let found = loans::list(conn, user_id)?;
    let report = analytics::loan_progress(&found);
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        let rows = report
            .loans
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    format!("{:.2}", l.original_amount),
                    format!("{:.2}", l.outstanding_amount),
                    format!("{}%", l.progress),
                    l.status.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Name", "Original", "Outstanding", "Progress", "Status"], rows)
        );
        println!(
            "Overall: {}% paid ({:.2} of {:.2} remaining)",
            report.overall_progress, report.total_outstanding, report.total_original
        );
    }
    Ok(())
}
