// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{decimal_col, enum_col, opt_decimal_col};
use crate::error::{Error, Result};
use crate::models::{Loan, LoanPayment, LoanStatus};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct NewLoan {
    pub name: String,
    pub lender: Option<String>,
    pub original_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub interest_rate: Option<Decimal>,
    pub payment_amount: Option<Decimal>,
    pub next_payment_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

#[derive(Debug, Clone, Default)]
pub struct LoanPatch {
    pub name: Option<String>,
    pub lender: Option<String>,
    pub original_amount: Option<Decimal>,
    pub outstanding_amount: Option<Decimal>,
    pub interest_rate: Option<Decimal>,
    pub payment_amount: Option<Decimal>,
    pub next_payment_date: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
}

const COLS: &str = "id, user_id, name, lender, original_amount, outstanding_amount, interest_rate, \
                    payment_amount, next_payment_date, status, created_at, updated_at";

fn row_to_loan(r: &Row<'_>) -> rusqlite::Result<Loan> {
    Ok(Loan {
        id: r.get(0)?,
        user_id: r.get(1)?,
        name: r.get(2)?,
        lender: r.get(3)?,
        original_amount: decimal_col(r, 4)?,
        outstanding_amount: decimal_col(r, 5)?,
        interest_rate: opt_decimal_col(r, 6)?,
        payment_amount: opt_decimal_col(r, 7)?,
        next_payment_date: r.get(8)?,
        status: enum_col(r, 9, "loan status", LoanStatus::parse)?,
        created_at: r.get(10)?,
        updated_at: r.get(11)?,
    })
}

fn row_to_payment(r: &Row<'_>) -> rusqlite::Result<LoanPayment> {
    Ok(LoanPayment {
        id: r.get(0)?,
        loan_id: r.get(1)?,
        amount: decimal_col(r, 2)?,
        payment_date: r.get(3)?,
        notes: r.get(4)?,
        created_at: r.get(5)?,
    })
}

// status == paid_off and outstanding == 0 must agree whichever way a row is
// written; the ledger keeps this true on the payment path, the checks below
// keep explicit edits honest.
fn validate_amounts(
    original: Decimal,
    outstanding: Decimal,
    status: LoanStatus,
) -> Result<()> {
    if original <= Decimal::ZERO {
        return Err(Error::validation("original amount must be greater than 0"));
    }
    if outstanding < Decimal::ZERO {
        return Err(Error::validation("outstanding amount cannot be negative"));
    }
    if outstanding > original {
        return Err(Error::validation(
            "outstanding amount cannot exceed original amount",
        ));
    }
    if (status == LoanStatus::PaidOff) != outstanding.is_zero() {
        return Err(Error::validation(
            "a loan is paid_off exactly when its outstanding amount is 0",
        ));
    }
    Ok(())
}

pub fn list(conn: &Connection, user_id: i64) -> Result<Vec<Loan>> {
    let sql = format!(
        "SELECT {COLS} FROM loans WHERE user_id=?1 ORDER BY next_payment_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_loan)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_active(conn: &Connection, user_id: i64) -> Result<Vec<Loan>> {
    let sql = format!(
        "SELECT {COLS} FROM loans WHERE user_id=?1 AND status='active' ORDER BY next_payment_date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_loan)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn list_paid_off(conn: &Connection, user_id: i64) -> Result<Vec<Loan>> {
    let sql = format!(
        "SELECT {COLS} FROM loans WHERE user_id=?1 AND status='paid_off' ORDER BY updated_at DESC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id], row_to_loan)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn get(conn: &Connection, id: i64, user_id: i64) -> Result<Loan> {
    let sql = format!("SELECT {COLS} FROM loans WHERE id=?1 AND user_id=?2");
    let mut stmt = conn.prepare(&sql)?;
    stmt.query_row(params![id, user_id], row_to_loan)
        .optional()?
        .ok_or(Error::NotFound("loan"))
}

pub fn insert(conn: &Connection, user_id: i64, new: &NewLoan) -> Result<Loan> {
    if new.name.trim().is_empty() {
        return Err(Error::validation("name is required"));
    }
    validate_amounts(new.original_amount, new.outstanding_amount, new.status)?;
    conn.execute(
        "INSERT INTO loans(user_id, name, lender, original_amount, outstanding_amount, interest_rate,
                           payment_amount, next_payment_date, status)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            user_id,
            new.name,
            new.lender,
            new.original_amount.to_string(),
            new.outstanding_amount.to_string(),
            new.interest_rate.map(|v| v.to_string()),
            new.payment_amount.map(|v| v.to_string()),
            new.next_payment_date,
            new.status.as_str()
        ],
    )?;
    get(conn, conn.last_insert_rowid(), user_id)
}

pub fn update(conn: &Connection, id: i64, user_id: i64, patch: &LoanPatch) -> Result<Loan> {
    let current = get(conn, id, user_id)?;
    let original = patch.original_amount.unwrap_or(current.original_amount);
    let outstanding = patch.outstanding_amount.unwrap_or(current.outstanding_amount);
    let status = patch.status.unwrap_or(current.status);
    validate_amounts(original, outstanding, status)?;

    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
    if let Some(v) = &patch.name {
        if v.trim().is_empty() {
            return Err(Error::validation("name cannot be empty"));
        }
        sets.push("name=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = &patch.lender {
        sets.push("lender=?");
        args.push(Box::new(v.clone()));
    }
    if let Some(v) = patch.original_amount {
        sets.push("original_amount=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.outstanding_amount {
        sets.push("outstanding_amount=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.interest_rate {
        sets.push("interest_rate=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.payment_amount {
        sets.push("payment_amount=?");
        args.push(Box::new(v.to_string()));
    }
    if let Some(v) = patch.next_payment_date {
        sets.push("next_payment_date=?");
        args.push(Box::new(v));
    }
    if let Some(v) = patch.status {
        sets.push("status=?");
        args.push(Box::new(v.as_str()));
    }
    if sets.is_empty() {
        return Err(Error::validation("at least one field is required"));
    }

    let sql = format!(
        "UPDATE loans SET {}, updated_at=datetime('now') WHERE id=? AND user_id=?",
        sets.join(", ")
    );
    args.push(Box::new(id));
    args.push(Box::new(user_id));
    let refs: Vec<&dyn rusqlite::ToSql> = args.iter().map(|a| a.as_ref()).collect();
    conn.execute(&sql, rusqlite::params_from_iter(refs))?;
    get(conn, id, user_id)
}

/// Deleting a loan drops its payment ledger too (FK cascade).
pub fn delete(conn: &Connection, id: i64, user_id: i64) -> Result<bool> {
    let n = conn.execute(
        "DELETE FROM loans WHERE id=?1 AND user_id=?2",
        params![id, user_id],
    )?;
    Ok(n > 0)
}

/// Ledger rows for one loan, newest first. Ownership is checked against the
/// parent loan, so a foreign loan id reads as NotFound here as well.
pub fn payments(conn: &Connection, loan_id: i64, user_id: i64) -> Result<Vec<LoanPayment>> {
    get(conn, loan_id, user_id)?;
    let mut stmt = conn.prepare(
        "SELECT id, loan_id, amount, payment_date, notes, created_at
         FROM loan_payments WHERE loan_id=?1 ORDER BY payment_date DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![loan_id], row_to_payment)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
