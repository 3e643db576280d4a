// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::Settings;
use rusqlite::{params, Connection, OptionalExtension, Row};

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsPatch {
    pub bill_reminder_days: Option<i64>,
    pub subscription_reminder_days: Option<i64>,
    pub membership_reminder_days: Option<i64>,
}

const COLS: &str = "id, user_id, bill_reminder_days, subscription_reminder_days, \
                    membership_reminder_days, created_at, updated_at";

fn row_to_settings(r: &Row<'_>) -> rusqlite::Result<Settings> {
    Ok(Settings {
        id: r.get(0)?,
        user_id: r.get(1)?,
        bill_reminder_days: r.get(2)?,
        subscription_reminder_days: r.get(3)?,
        membership_reminder_days: r.get(4)?,
        created_at: r.get(5)?,
        updated_at: r.get(6)?,
    })
}

fn fetch(conn: &Connection, user_id: i64) -> Result<Option<Settings>> {
    let sql = format!("SELECT {COLS} FROM settings WHERE user_id=?1");
    let mut stmt = conn.prepare(&sql)?;
    Ok(stmt
        .query_row(params![user_id], row_to_settings)
        .optional()?)
}

/// The settings row is created lazily with defaults on first read. The table
/// keeps one row per user (UNIQUE user_id); racing creators surface as a
/// Conflict rather than a second row.
pub fn get_or_create(conn: &Connection, user_id: i64) -> Result<Settings> {
    if let Some(s) = fetch(conn, user_id)? {
        return Ok(s);
    }
    conn.execute("INSERT INTO settings(user_id) VALUES (?1)", params![user_id])?;
    fetch(conn, user_id)?.ok_or(Error::NotFound("settings"))
}

pub fn update(conn: &Connection, user_id: i64, patch: &SettingsPatch) -> Result<Settings> {
    get_or_create(conn, user_id)?;
    for days in [
        patch.bill_reminder_days,
        patch.subscription_reminder_days,
        patch.membership_reminder_days,
    ]
    .into_iter()
    .flatten()
    {
        if !(1..=365).contains(&days) {
            return Err(Error::validation("reminder days must be between 1 and 365"));
        }
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(v) = patch.bill_reminder_days {
        sets.push("bill_reminder_days=?");
        args.push(Box::new(v));
    }
    if let Some(v) = patch.subscription_reminder_days {
        sets.push("subscription_reminder_days=?");
        args.push(Box::new(v));
    }
    if let Some(v) = patch.membership_reminder_days {
        sets.push("membership_reminder_days=?");
        args.push(Box::new(v));
    }
    if sets.is_empty() {
        return Err(Error::validation("at least one field is required"));
    }

    let sql = format!(
        "UPDATE settings SET {}, updated_at=datetime('now') WHERE user_id=?",
        sets.join(", ")
    );
    args.push(Box::new(user_id));
    let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
    conn.execute(&sql, rusqlite::params_from_iter(refs))?;
    fetch(conn, user_id)?.ok_or(Error::NotFound("settings"))
}
