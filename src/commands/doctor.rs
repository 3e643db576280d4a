// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BillStatus, Cadence, LoanStatus};
use crate::utils::{is_last_four, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Consistency sweep over the raw tables. Reads bypass the typed store so a
/// corrupt row can be reported instead of failing the load.
pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Loan invariants: 0 <= outstanding <= original, paid_off <=> zero
    let mut stmt = conn.prepare(
        "SELECT id, name, original_amount, outstanding_amount, status FROM loans ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let original_s: String = r.get(2)?;
        let outstanding_s: String = r.get(3)?;
        let status_s: String = r.get(4)?;

        let original = original_s.parse::<Decimal>().ok();
        let outstanding = outstanding_s.parse::<Decimal>().ok();
        let (original, outstanding) = match (original, outstanding) {
            (Some(o), Some(u)) => (o, u),
            _ => {
                rows.push(vec![
                    "loan_bad_amount".into(),
                    format!("#{} {}: '{}' / '{}'", id, name, original_s, outstanding_s),
                ]);
                continue;
            }
        };
        if outstanding < Decimal::ZERO || outstanding > original {
            rows.push(vec![
                "loan_balance_out_of_range".into(),
                format!("#{} {}: {} of {}", id, name, outstanding, original),
            ]);
        }
        match LoanStatus::parse(&status_s) {
            Some(status) => {
                if (status == LoanStatus::PaidOff) != outstanding.is_zero() {
                    rows.push(vec![
                        "loan_status_mismatch".into(),
                        format!("#{} {}: {} with {} outstanding", id, name, status_s, outstanding),
                    ]);
                }
            }
            None => rows.push(vec![
                "loan_unknown_status".into(),
                format!("#{} {}: '{}'", id, name, status_s),
            ]),
        }

        // Reconciliation advisory: a balance above what the ledger can explain
        // usually means a payment row landed without its balance update. The
        // check is one-sided; loans created mid-payoff legitimately sit below.
        let mut pstmt =
            conn.prepare("SELECT amount FROM loan_payments WHERE loan_id=?1")?;
        let mut pcur = pstmt.query([id])?;
        let mut ledger_sum = Decimal::ZERO;
        let mut ledger_ok = true;
        while let Some(p) = pcur.next()? {
            let amt_s: String = p.get(0)?;
            match amt_s.parse::<Decimal>() {
                Ok(a) => ledger_sum += a,
                Err(_) => {
                    rows.push(vec![
                        "payment_bad_amount".into(),
                        format!("loan #{} {}: '{}'", id, name, amt_s),
                    ]);
                    ledger_ok = false;
                }
            }
        }
        if ledger_ok && outstanding > (original - ledger_sum).max(Decimal::ZERO) {
            rows.push(vec![
                "loan_ledger_drift".into(),
                format!(
                    "#{} {}: outstanding {} exceeds {} original less {} paid",
                    id, name, outstanding, original, ledger_sum
                ),
            ]);
        }
    }

    // 2) Subscriptions whose cadence no longer parses contribute 0 to rollups
    let mut stmt2 = conn.prepare("SELECT id, name, cadence FROM subscriptions ORDER BY id")?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let cadence: String = r.get(2)?;
        if Cadence::parse(&cadence).is_none() {
            rows.push(vec![
                "subscription_unknown_cadence".into(),
                format!("#{} {}: '{}'", id, name, cadence),
            ]);
        }
    }

    // 3) Bills with a status outside the known set
    let mut stmt3 = conn.prepare("SELECT id, name, status FROM bills ORDER BY id")?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let status: String = r.get(2)?;
        if BillStatus::parse(&status).is_none() {
            rows.push(vec![
                "bill_unknown_status".into(),
                format!("#{} {}: '{}'", id, name, status),
            ]);
        }
    }

    // 4) Cards with a malformed suffix
    let mut stmt4 = conn.prepare("SELECT id, name, last_four FROM credit_cards ORDER BY id")?;
    let mut cur4 = stmt4.query([])?;
    while let Some(r) = cur4.next()? {
        let id: i64 = r.get(0)?;
        let name: String = r.get(1)?;
        let last_four: String = r.get(2)?;
        if !is_last_four(&last_four) {
            rows.push(vec![
                "card_bad_last_four".into(),
                format!("#{} {}: '{}'", id, name, last_four),
            ]);
        }
    }

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
