// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::{Loan, LoanStatus};
use crate::store;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

#[derive(Debug)]
pub struct PaymentOutcome {
    pub loan: Loan,
    pub paid_off: bool,
}

/// Append a payment to a loan's ledger and reduce its running balance.
///
/// The read-compute-write on `outstanding_amount` runs inside one SQLite
/// transaction; two concurrent payments against the same loan serialize
/// instead of losing an update. Overpayment clamps the balance at zero and
/// the excess is absorbed. Any payment moves a deferred loan back to active
/// (or paid_off), and the ledger row itself is never edited afterwards;
/// corrections are new compensating entries.
pub fn record_payment(
    conn: &mut Connection,
    user_id: i64,
    loan_id: i64,
    amount: Decimal,
    payment_date: NaiveDate,
    notes: Option<&str>,
) -> Result<PaymentOutcome> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation("payment amount must be greater than 0"));
    }

    let tx = conn.transaction()?;

    let outstanding: Option<String> = tx
        .query_row(
            "SELECT outstanding_amount FROM loans WHERE id=?1 AND user_id=?2",
            params![loan_id, user_id],
            |r| r.get(0),
        )
        .optional()?;
    let outstanding = match outstanding {
        Some(s) => s
            .parse::<Decimal>()
            .map_err(|_| Error::validation(format!("invalid stored balance '{}'", s)))?,
        None => return Err(Error::NotFound("loan")),
    };

    tx.execute(
        "INSERT INTO loan_payments(loan_id, amount, payment_date, notes) VALUES (?1,?2,?3,?4)",
        params![loan_id, amount.to_string(), payment_date.to_string(), notes],
    )?;

    let new_outstanding = (outstanding - amount).max(Decimal::ZERO);
    let status = if new_outstanding.is_zero() {
        LoanStatus::PaidOff
    } else {
        LoanStatus::Active
    };
    tx.execute(
        "UPDATE loans SET outstanding_amount=?1, status=?2, updated_at=datetime('now')
         WHERE id=?3 AND user_id=?4",
        params![
            new_outstanding.to_string(),
            status.as_str(),
            loan_id,
            user_id
        ],
    )?;

    let loan = store::loans::get(&tx, loan_id, user_id)?;
    tx.commit()?;

    Ok(PaymentOutcome {
        loan,
        paid_off: new_outstanding.is_zero(),
    })
}
