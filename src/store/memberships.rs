// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_col, enum_col};
use crate::error::{Error, Result};
use crate::models::{Membership, MembershipStatus};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewMembership {
    pub name: String,
    pub organization: Option<String>,
    pub cost: Decimal,
    pub renewal_date: Option<NaiveDate>,
    pub status: MembershipStatus,
    pub category: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MembershipPatch {
    pub name: Option<String>,
    pub organization: Option<String>,
    pub cost: Option<Decimal>,
    pub renewal_date: Option<NaiveDate>,
    pub status: Option<MembershipStatus>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

const COLS: &str =
    "id, user_id, name, organization, cost, renewal_date, status, category, notes, created_at, updated_at";

fn row_to_membership(r: &Row<'_>) -> rusqlite::Result<Membership> {
    Ok(Membership {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        organization: r.get(3)?,
        cost: decimal_col(r, 4)?,
        renewal_date: r.get(5)?,
        status: enum_col(r, 6, "membership status", MembershipStatus::parse)?,
        category: r.get(7)?,
        notes: r.get(8)?,
        created_at: r.get(9)?,
        updated_at: r.get(10)?,
    })
}

pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Membership>> {
    let sql = format!(
        "SELECT {COLS} FROM memberships WHERE user_id=?1 ORDER BY renewal_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_membership)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Membership> {
    let sql = format!("SELECT {COLS} FROM memberships WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id, user_id], row_to_membership)
        .optional()?
        .ok_or(Error::NotFound("membership"))
}

pub fn insert(conn: &Connection, user_id: i64, new: &NewMembership) -> Result<Membership> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    if new.cost <= Decimal::ZERO {
        return Err(Error::validation("cost must be greater than 0"));
    }
    conn.execute(
        "INSERT INTO memberships(user_id, name, organization, cost, renewal_date, status, category, notes)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8)",
        params![
            user_id,
            new.name,
            new.organization,
            new.cost.to_string(),
            new.renewal_date,
            new.status.as_str(),
            new.category,
            new.notes
        ],
    )?;
    get(conn, conn.last_insert_rowid(), user_id)
}

pub fn update(
    conn: &Connection,
    id: i64,
    user_id: i64,
    patch: &MembershipPatch,
) -> Result<Membership> {
    get(conn, id, user_id)?;
    if let Some(cost) = patch.cost {
        if cost <= Decimal::ZERO {
            return Err(Error::validation("cost must be greater than 0"));
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
    if let Some(v) = &patch.organization {
        sets.push("organization=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.cost {
        sets.push("cost=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.renewal_date {
        sets.push("renewal_date=?");
        args.push(Box::new(v));
    }
    if let Some(v) = patch.status {
        sets.push("status=?");
        args.push(Box::new(v.as_str()));
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
        "UPDATE memberships SET {}, updated_at=datetime('now') WHERE id=? AND user_id=?",
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
        "DELETE FROM memberships WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}
