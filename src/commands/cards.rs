// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::utilization;
use crate::models::CreditCard;
use crate::store::cards::{self, CreditCardPatch, NewCreditCard};
use crate::utils::{id_for_user, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{bail, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("update", sub)) => update(conn, sub)?,
        Some(("rm", sub)) => remove(conn, sub)?,
        Some(("high", sub)) => high(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct CardRow {
    id: i64,
    name: String,
    bank: String,
    last_four: String,
    balance: Decimal,
    credit_limit: Option<Decimal>,
    due_date: Option<chrono::NaiveDate>,
    utilization: u32,
}

impl CardRow {
    fn from_card(card: &CreditCard) -> CardRow {
        CardRow {
            id: card.id,
            name: card.name.clone(),
            bank: card.bank.clone().unwrap_or_default(),
            last_four: card.last_four.clone(),
            balance: card.balance,
            credit_limit: card.credit_limit,
            due_date: card.due_date,
            utilization: utilization::card_utilization(card),
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.bank.clone(),
            format!("•••• {}", self.last_four),
            format!("{:.2}", self.balance),
            self.credit_limit
                .map(|l| format!("{:.2}", l))
                .unwrap_or_default(),
            self.due_date.map(|d| d.to_string()).unwrap_or_default(),
            format!("{}%", self.utilization),
        ]
    }
}

const CARD_HEADERS: [&str; 8] = [
    "ID", "Name", "Bank", "Card", "Balance", "Limit", "Due", "Utilization",
];

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let new = NewCreditCard {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        bank: sub.get_one::<String>("bank").map(|s| s.to_string()),
        last_four: sub
            .get_one::<String>("last-four")
            .unwrap()
            .trim()
            .to_string(),
        balance: sub
            .get_one::<String>("balance")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?
            .unwrap_or(Decimal::ZERO),
        credit_limit: sub
            .get_one::<String>("limit")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        due_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
    };
    let created = cards::insert(conn, user_id, &new)?;
    println!(
        "Added card '{}' (•••• {}) as #{}",
        created.name, created.last_four, created.id
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let found = cards::list(conn, user_id)?;
    let rows: Vec<CardRow> = found.iter().map(CardRow::from_card).collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        println!(
            "{}",
            pretty_table(&CARD_HEADERS, rows.iter().map(CardRow::cells).collect())
        );
    }
    Ok(())
}

fn update(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = CreditCardPatch {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        bank: sub.get_one::<String>("bank").map(|s| s.to_string()),
        last_four: sub
            .get_one::<String>("last-four")
            .map(|s| s.trim().to_string()),
        balance: sub
            .get_one::<String>("balance")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        credit_limit: sub
            .get_one::<String>("limit")
            .map(|s| parse_decimal(s.trim()))
            .transpose()?,
        due_date: sub
            .get_one::<String>("due")
            .map(|s| parse_date(s.trim()))
            .transpose()?,
    };
    let updated = cards::update(conn, id, user_id, &patch)?;
    println!("Updated card '{}' (#{})", updated.name, updated.id);
    Ok(())
}

fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let id = *sub.get_one::<i64>("id").unwrap();
    if !cards::delete(conn, id, user_id)? {
        bail!("credit card not found");
    }
    println!("Removed card #{}", id);
    Ok(())
}

fn high(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let threshold = *sub.get_one::<u32>("threshold").unwrap();
    let found = cards::list(conn, user_id)?;
    let rows: Vec<CardRow> = utilization::high_utilization(&found, threshold)
        .into_iter()
        .map(CardRow::from_card)
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        println!(
            "{}",
            pretty_table(&CARD_HEADERS, rows.iter().map(CardRow::cells).collect())
        );
    }
    Ok(())
}
