// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::windows;
use crate::store::{bills, loans, memberships, settings, subscriptions};
use crate::utils::{id_for_user, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;

const LOAN_REMINDER_DAYS: i64 = 7;

/// Everything that needs attention now or soon, using the per-user reminder
/// windows from settings.
pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, m.get_one::<String>("user").unwrap())?;
    let prefs = settings::get_or_create(conn, user_id)?;
    let now = today();

    let bill_rows = bills::list(conn, user_id)?;
    let late = windows::overdue(&bill_rows, now);
    if !late.is_empty() {
        println!("Overdue bills:");
        let rows = late
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    format!("{:.2}", b.amount),
                    b.due_date.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Amount", "Due"], rows));
    }

    let due_bills = windows::upcoming_within(&bill_rows, now, prefs.bill_reminder_days);
    if !due_bills.is_empty() {
        println!("Bills due in the next {} days:", prefs.bill_reminder_days);
        let rows = due_bills
            .iter()
            .map(|b| {
                vec![
                    b.name.clone(),
                    format!("{:.2}", b.amount),
                    b.due_date.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Amount", "Due"], rows));
    }

    let subs = subscriptions::list(conn, user_id)?;
    let renewing = windows::upcoming_within(&subs, now, prefs.subscription_reminder_days);
    if !renewing.is_empty() {
        println!(
            "Subscriptions renewing in the next {} days:",
            prefs.subscription_reminder_days
        );
        let rows = renewing
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    format!("{:.2}", s.cost),
                    s.next_due_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Cost", "Renews"], rows));
    }

    let members = memberships::list(conn, user_id)?;
    let expiring = windows::expiring_within(&members, now, prefs.membership_reminder_days);
    if !expiring.is_empty() {
        println!(
            "Memberships expiring within {} days:",
            prefs.membership_reminder_days
        );
        let rows = expiring
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    format!("{:.2}", m.cost),
                    m.renewal_date.map(|d| d.to_string()).unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Cost", "Renewal"], rows));
    }

    let loan_rows = loans::list(conn, user_id)?;
    let payments = windows::upcoming_within(&loan_rows, now, LOAN_REMINDER_DAYS);
    if !payments.is_empty() {
        println!("Loan payments due in the next {} days:", LOAN_REMINDER_DAYS);
        let rows = payments
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    l.payment_amount
                        .map(|p| format!("{:.2}", p))
                        .unwrap_or_default(),
                    l.next_payment_date
                        .map(|d| d.to_string())
                        .unwrap_or_default(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Name", "Payment", "Due"], rows));
    }

    if late.is_empty()
        && due_bills.is_empty()
        && renewing.is_empty()
        && expiring.is_empty()
        && payments.is_empty()
    {
        println!("Nothing needs attention 🎉");
    }
    Ok(())
}
