// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::analytics;
use crate::store::{bills, cards, loans, memberships, subscriptions};
use crate::utils::{id_for_user, maybe_print_json, pretty_table, today};
use anyhow::Result;
use chrono::Datelike;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        Some(("cycles", sub)) => cycles(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;

    let subs = subscriptions::list(conn, user_id)?;
    let members = memberships::list(conn, user_id)?;
    let card_rows = cards::list(conn, user_id)?;
    let loan_rows = loans::list(conn, user_id)?;
    let bill_rows = bills::list(conn, user_id)?;

    let s = analytics::summary(&subs, &members, &card_rows, &loan_rows, &bill_rows, today());
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let rows = vec![
            vec![
                "Monthly subscriptions".into(),
                format!("{:.2}", s.monthly_subscriptions),
            ],
            vec![
                "Active memberships".into(),
                format!("{:.2}", s.monthly_memberships),
            ],
            vec!["Card balance".into(), format!("{:.2}", s.card_balance)],
            vec!["Card limit".into(), format!("{:.2}", s.card_limit)],
            vec!["Card utilization".into(), format!("{}%", s.utilization)],
            vec![
                "Loan debt (active)".into(),
                format!("{:.2}", s.loan_outstanding),
            ],
            vec![
                "Bills due in 30 days".into(),
                format!("{:.2} ({} bills)", s.upcoming_bill_total, s.upcoming_bill_count),
            ],
            vec!["Unpaid bills".into(), s.unpaid_bill_count.to_string()],
        ];
        println!("{}", pretty_table(&["Metric", "Value"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;

    let subs = subscriptions::list(conn, user_id)?;
    let bill_rows = bills::list(conn, user_id)?;
    let categories = analytics::category_breakdown(&subs, &bill_rows);
    if !maybe_print_json(json_flag, jsonl_flag, &categories)? {
        let rows = categories
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    format!("{:.2}", c.total),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Total", "Count"], rows));
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let year = sub
        .get_one::<i32>("year")
        .copied()
        .unwrap_or_else(|| today().year());

    let subs = subscriptions::list(conn, user_id)?;
    let bill_rows = bills::list(conn, user_id)?;
    let months = analytics::monthly_trend(&bill_rows, &subs, year);
    if !maybe_print_json(json_flag, jsonl_flag, &months)? {
        let rows = months
            .iter()
            .map(|t| {
                vec![
                    format!("{}-{:02}", year, t.month),
                    format!("{:.2}", t.bills),
                    format!("{:.2}", t.subscriptions),
                    format!("{:.2}", t.total),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Bills Paid", "Subscriptions", "Total"], rows)
        );
    }
    Ok(())
}

fn cycles(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;

    let subs = subscriptions::list(conn, user_id)?;
    let cycles = analytics::cycle_breakdown(&subs);
    if !maybe_print_json(json_flag, jsonl_flag, &cycles)? {
        let rows = cycles
            .iter()
            .map(|c| {
                vec![
                    c.cadence.clone(),
                    format!("{:.2}", c.monthly_equivalent),
                    format!("{:.2}", c.total),
                    c.count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Cadence", "Monthly Eq", "Total", "Count"], rows)
        );
    }
    Ok(())
}
