// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_col, enum_col};
use crate::error::{Error, Result};
use crate::models::{Bill, BillStatus};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewBill {
    pub name: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub status: BillStatus,
    pub is_recurring: bool,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BillPatch {
    pub name: Option<String>,
    pub amount: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<BillStatus>,
    pub is_recurring: Option<bool>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

const COLS: &str =
    "id, user_id, name, amount, due_date, status, is_recurring, category, notes, created_at, updated_at";

fn row_to_bill(r: &Row<'_>) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        amount: decimal_col(r, 3)?,
        due_date: r.get(4)?,
        status: enum_col(r, 5, "bill status", BillStatus::parse)?,
        is_recurring: r.get(6)?,
        category: r.get(7)?,
        notes: r.get(8)?,
        created_at: r.get(9)?,
        updated_at: r.get(10)?,
    })
}

pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Bill>> {
    let sql = format!("SELECT {COLS} FROM bills WHERE user_id=?1 ORDER BY due_date ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_bill)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_by_status(conn: &Connection, user_id: i64, status: BillStatus) -> Result<Vec<Bill>> {
    let sql = format!(
        "SELECT {COLS} FROM bills WHERE user_id=?1 AND status=?2 ORDER BY due_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, status.as_str()], row_to_bill)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_recurring(conn: &Connection, user_id: i64) -> Result<Vec<Bill>> {
    let sql = format!(
        "SELECT {COLS} FROM bills WHERE user_id=?1 AND is_recurring=1 ORDER BY due_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_bill)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Bill> {
    let sql = format!("SELECT {COLS} FROM bills WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id, user_id], row_to_bill)
        .optional()?
        .ok_or(Error::NotFound("bill"))
}

pub fn insert(conn: &Connection, user_id: i64, new: &NewBill) -> Result<Bill> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if new.amount <= Decimal::ZERO {
        return Err(Error::validation("amount must be greater than 0"));
    }
    conn.execute(
        "INSERT INTO bills(user_id, name, amount, due_date, status, is_recurring, category, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            user_id,
            new.name,
            new.amount.to_string(),
            new.due_date,
            new.status.as_str(),
            new.is_recurring,
            new.category,
            new.notes
        ],
    )?;
    get(conn, conn.last_insert_rowid(), user_id)
}

pub fn update(conn: &Connection, id: i64, user_id: i64, patch: &BillPatch) -> Result<Bill> {
    get(conn, id, user_id)?;
    if let Some(amount) = patch.amount {
        if amount <= Decimal::ZERO {
            return Err(Error::validation("amount must be greater than 0"));
        }
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
    if let Some(v) = patch.amount {
        sets.push("amount=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.due_date {
        sets.push("due_date=?");
        args.push(Box::new(v));
    }
    if let Some(v) = patch.status {
        sets.push("status=?");
        args.push(Box::new(v.as_str()));
    }
    if let Some(v) = patch.is_recurring {
        sets.push("is_recurring=?");
        args.push(Box::new(v));
    }
    if let Some(v) = &patch.category {
        sets.push("category=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = &patch.notes {
        sets.push("notes=?");
        args.push(Box::new(v.clone()));
    }
    if sets.is_empty() {
        return Err(Error::validation("at least one field is required"));
    }

    let sql = format!(
        "UPDATE bills SET {}, updated_at=datetime('now') WHERE id=? AND user_id=?",
        sets.join(", ")
    );
    args.push(Box::new(id));
    args.push(Box::new(user_id));
    let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
    conn.execute(&sql, rusqlite::params_from_iter(refs))?;
    get(conn, id, user_id)
}

/// The one explicit status transition: pending (or stored overdue) -> paid.
pub fn mark_paid(conn: &Connection, id: i64, user_id: i64) -> Result<Bill> {
    let n = conn.execute(
        "UPDATE bills SET status='paid', updated_at=datetime('now') WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    if n == 0 {
        return Err(Error::NotFound("bill"));
    }
    get(conn, id, user_id)
}

pub fn delete(conn: &Connection, id: i64, user_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM bills WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}
