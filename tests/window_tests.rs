// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duebook::engine::windows::{expiring_within, overdue, upcoming_within};
use duebook::models::{Bill, BillStatus, Membership, MembershipStatus, Subscription};
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bill(name: &str, due: NaiveDate, status: BillStatus) -> Bill {
    Bill {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        amount: Decimal::from(50),
        due_date: due,
        status,
        is_recurring: false,
        category: None,
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn membership(name: &str, renewal: Option<NaiveDate>, status: MembershipStatus) -> Membership {
    Membership {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        organization: None,
        cost: Decimal::from(30),
        renewal_date: renewal,
        status,
        category: None,
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn subscription(name: &str, due: Option<NaiveDate>, active: bool) -> Subscription {
    Subscription {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        cost: Decimal::from(10),
        cadence: String::from("monthly"),
        next_due_date: due,
        category: None,
        active,
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

#[test]
fn overdue_is_strictly_before_today() {
    let today = day(2025, 6, 15);
    let bills = vec![
        bill("yesterday", day(2025, 6, 14), BillStatus::Pending),
        bill("today", day(2025, 6, 15), BillStatus::Pending),
        bill("paid-and-late", day(2025, 6, 1), BillStatus::Paid),
    ];
    let late = overdue(&bills, today);
    let names: Vec<&str> = late.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["yesterday"]);
}

#[test]
fn upcoming_is_inclusive_on_both_ends() {
    let today = day(2025, 6, 15);
    let bills = vec![
        bill("today", day(2025, 6, 15), BillStatus::Pending),
        bill("last-day", day(2025, 6, 22), BillStatus::Pending),
        bill("one-past", day(2025, 6, 23), BillStatus::Pending),
        bill("yesterday", day(2025, 6, 14), BillStatus::Pending),
    ];
    let due = upcoming_within(&bills, today, 7);
    let names: Vec<&str> = due.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["today", "last-day"]);
}

#[test]
fn overdue_and_upcoming_are_disjoint() {
    let today = day(2025, 6, 15);
    let mut bills = Vec::new();
    for d in 1..=30 {
        bills.push(bill("b", day(2025, 6, d), BillStatus::Pending));
    }
    let late: Vec<NaiveDate> = overdue(&bills, today).iter().map(|b| b.due_date).collect();
    let due: Vec<NaiveDate> = upcoming_within(&bills, today, 7)
        .iter()
        .map(|b| b.due_date)
        .collect();
    for d in &late {
        assert!(!due.contains(d), "{} in both windows", d);
    }
    assert!(due.contains(&today));
    assert!(!late.contains(&today));
}

#[test]
fn stored_overdue_status_still_counts_as_open() {
    let today = day(2025, 6, 15);
    let bills = vec![bill("flagged", day(2025, 6, 1), BillStatus::Overdue)];
    assert_eq!(overdue(&bills, today).len(), 1);
}

#[test]
fn expiring_has_no_lower_bound_and_no_status_filter() {
    let today = day(2025, 6, 15);
    let members = vec![
        membership("lapsed", Some(day(2025, 5, 1)), MembershipStatus::Expired),
        membership("soon", Some(day(2025, 7, 15)), MembershipStatus::Active),
        membership("later", Some(day(2025, 7, 16)), MembershipStatus::Active),
        membership("undated", None, MembershipStatus::Active),
    ];
    let expiring = expiring_within(&members, today, 30);
    let names: Vec<&str> = expiring.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["lapsed", "soon"]);
}

#[test]
fn inactive_subscriptions_never_come_due() {
    let today = day(2025, 6, 15);
    let subs = vec![
        subscription("active", Some(day(2025, 6, 20)), true),
        subscription("cancelled", Some(day(2025, 6, 20)), false),
        subscription("undated", None, true),
    ];
    let due = upcoming_within(&subs, today, 7);
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].name, "active");
    assert!(overdue(&subs, today).is_empty());
}
