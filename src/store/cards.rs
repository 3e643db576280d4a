// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_col, opt_decimal_col};
use crate::error::{Error, Result};
use crate::models::CreditCard;
use crate::utils::is_last_four;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewCreditCard {
    pub name: String,
    pub bank: Option<String>,
    pub last_four: String,
    pub balance: Decimal,
    pub credit_limit: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default)]
pub struct CreditCardPatch {
    pub name: Option<String>,
    pub bank: Option<String>,
    pub last_four: Option<String>,
    pub balance: Option<Decimal>,
    pub credit_limit: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

const COLS: &str =
    "id, user_id, name, bank, last_four, balance, credit_limit, due_date, created_at, updated_at";

fn row_to_card(r: &Row<'_>) -> rusqlite::Result<CreditCard> {
    Ok(CreditCard {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        bank: r.get(3)?,
        last_four: r.get(4)?,
        balance: decimal_col(r, 5)?,
        credit_limit: opt_decimal_col(r, 6)?,
        due_date: r.get(7)?,
        created_at: r.get(8)?,
        updated_at: r.get(9)?,
    })
}

pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<CreditCard>> {
    let sql =
        format!("SELECT {COLS} FROM credit_cards WHERE user_id=?1 ORDER BY due_date ASC, id ASC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_card)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<CreditCard> {
    let sql = format!("SELECT {COLS} FROM credit_cards WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id, user_id], row_to_card)
        .optional()?
        .ok_or(Error::NotFound("credit card"))
}

pub fn insert(conn: &Connection, user_id: i64, new: &NewCreditCard) -> Result<CreditCard> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if !is_last_four(&new.last_four) {
        return Err(Error::validation("last four must be exactly 4 digits"));
    }
    if new.balance < Decimal::ZERO {
        return Err(Error::validation("balance cannot be negative"));
    }
    if let Some(limit) = new.credit_limit {
        if limit <= Decimal::ZERO {
            return Err(Error::validation("credit limit must be greater than 0"));
        }
    }
    conn.execute(
        "INSERT INTO credit_cards(user_id, name, bank, last_four, balance, credit_limit, due_date)
         VALUES (?1,?2,?3,?4,?5,?6,?7)",
        params![
            user_id,
            new.name,
            new.bank,
            new.last_four,
            new.balance.to_string(),
            new.credit_limit.map(|l| l.to_string()),
            new.due_date
        ],
    )?;
    get(conn, conn.last_insert_rowid(), user_id)
}

pub fn update(
    conn: &Connection,
    id: i64,
    user_id: i64,
    patch: &CreditCardPatch,
) -> Result<CreditCard> {
    get(conn, id, user_id)?;
    if let Some(v) = &patch.last_four {
        if !is_last_four(v) {
            return Err(Error::validation("last four must be exactly 4 digits"));
        }
    }
    if let Some(balance) = patch.balance {
        if balance < Decimal::ZERO {
            return Err(Error::validation("balance cannot be negative"));
        }
    }
    if let Some(limit) = patch.credit_limit {
        if limit <= Decimal::ZERO {
            return Err(Error::validation("credit limit must be greater than 0"));
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
    if let Some(v) = &patch.bank {
        sets.push("bank=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = &patch.last_four {
        sets.push("last_four=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.balance {
        sets.push("balance=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.credit_limit {
        sets.push("credit_limit=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.due_date {
        sets.push("due_date=?");
        args.push(Box::new(v));
    }
    if sets.is_empty() {
        return Err(Error::validation("at least one field is required"));
    }

    let sql = format!(
        "UPDATE credit_cards SET {}, updated_at=datetime('now') WHERE id=? AND user_id=?",
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
        "DELETE FROM credit_cards WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}
