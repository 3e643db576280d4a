// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::decimal_col;
use crate::error::{Error, Result};
use crate::models::{Cadence, Subscription};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub cost: Decimal,
    pub cadence: String,
    pub next_due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub active: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub cost: Option<Decimal>,
    pub cadence: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub active: Option<bool>,
    pub notes: Option<String>,
}

const COLS: &str =
    "id, user_id, name, cost, cadence, next_due_date, category, active, notes, created_at, updated_at";

fn row_to_subscription(r: &Row<'_>) -> rusqlite::Result<Subscription> {
    Ok(Subscription {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        cost: decimal_col(r, 3)?,
        cadence: r.get(4)?,
        next_due_date: r.get(5)?,
        category: r.get(6)?,
        active: r.get(7)?,
        notes: r.get(8)?,
        created_at: r.get(9)?,
        updated_at: r.get(10)?,
    })
}

fn validate_cadence(s: &str) -> Result<()> {
    if Cadence::parse(s).is_none() {
        return Err(Error::validation(format!(
            "invalid cadence '{}', expected one of: {}",
            s,
            Cadence::ALL.join(", ")
        )));
    }
    Ok(())
}

pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Subscription>> {
    let sql = format!(
        "SELECT {COLS} FROM subscriptions WHERE user_id=?1 ORDER BY next_due_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_subscription)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_active(conn: &Connection, user_id: i64) -> Result<Vec<Subscription>> {
    let sql = format!(
        "SELECT {COLS} FROM subscriptions WHERE user_id=?1 AND active=1 ORDER BY next_due_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_subscription)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Subscription> {
    let sql = format!("SELECT {COLS} FROM subscriptions WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id, user_id], row_to_subscription)
        .optional()?
        .ok_or(Error::NotFound("subscription"))
}

pub fn insert(conn: &Connection, user_id: i64, new: &NewSubscription) -> Result<Subscription> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    validate_cadence(&new.cadence)?;
    if new.cost < Decimal::ZERO {
        return Err(Error::validation("cost cannot be negative"));
    }
    if new.active && new.cost <= Decimal::ZERO {
        return Err(Error::validation(
            "cost must be greater than 0 for an active subscription",
        ));
    }
    conn.execute(
        "INSERT INTO subscriptions(user_id, name, cost, cadence, next_due_date, category, active, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            user_id,
            new.name,
            new.cost.to_string(),
            new.cadence,
            new.next_due_date,
            new.category,
            new.active,
            new.notes
        ],
    )?;
    get(conn, conn.last_insert_rowid(), user_id)
}

pub fn update(
    conn: &Connection,
    id: i64,
    user_id: i64,
    patch: &SubscriptionPatch,
) -> Result<Subscription> {
    let current = get(conn, id, user_id)?;
    if let Some(c) = &patch.cadence {
        validate_cadence(c)?;
    }
    let cost = patch.cost.unwrap_or(current.cost);
    let active = patch.active.unwrap_or(current.active);
    if cost < Decimal::ZERO {
        return Err(Error::validation("cost cannot be negative"));
    }
    if active && cost <= Decimal::ZERO {
        return Err(Error::validation(
            "cost must be greater than 0 for an active subscription",
        ));
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(v) = &patch.name {
        if v.trim().is_empty() {
            return Err(Error::validation("name cannot be empty"));
        }
        sets.push("name=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.cost {
        sets.push("cost=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = &patch.cadence {
        sets.push("cadence=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.next_due_date {
        sets.push("next_due_date=?");
        args.push(Box::new(v));
    }
    if let Some(v) = &patch.category {
        sets.push("category=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.active {
        sets.push("active=?");
        args.push(Box::new(v));
    }
    if let Some(v) = &patch.notes {
        sets.push("notes=?");
        args.push(Box::new(v.clone()));
    }
    if sets.is_empty() {
        return Err(Error::validation("at least one field is required"));
    }

    let sql = format!(
        "UPDATE subscriptions SET {}, updated_at=datetime('now') WHERE id=? AND user_id=?",
        sets.join(", ")
    );
    args.push(Box::new(id));
    args.push(Box::new(user_id));
    let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
    conn.execute(&sql, rusqlite::params_from_iter(refs))?;
    get(conn, id, user_id)
}

pub fn delete(conn: &Connection, id: i64, user_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM subscriptions WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}
