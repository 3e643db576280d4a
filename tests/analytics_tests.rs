// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duebook::engine::analytics;
use duebook::models::{
    Bill, BillStatus, CreditCard, Loan, LoanStatus, Membership, MembershipStatus, Subscription,
};
use rust_decimal::Decimal;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn subscription(name: &str, cost: i64, cadence: &str, category: Option<&str>) -> Subscription {
    Subscription {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        cost: Decimal::from(cost),
        cadence: cadence.to_string(),
        next_due_date: None,
        category: category.map(|c| c.to_string()),
        active: true,
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn membership(name: &str, cost: i64, status: MembershipStatus) -> Membership {
    Membership {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        organization: None,
        cost: Decimal::from(cost),
        renewal_date: None,
        status,
        category: None,
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn card(balance: i64, limit: Option<i64>) -> CreditCard {
    CreditCard {
        id: 0,
        user_id: 1,
        name: String::from("Card"),
        bank: None,
        last_four: String::from("0000"),
        balance: Decimal::from(balance),
        credit_limit: limit.map(Decimal::from),
        due_date: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn loan(name: &str, original: i64, outstanding: i64, status: LoanStatus) -> Loan {
    Loan {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        lender: None,
        original_amount: Decimal::from(original),
        outstanding_amount: Decimal::from(outstanding),
        interest_rate: None,
        payment_amount: None,
        next_payment_date: None,
        status,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

fn bill(
    name: &str,
    amount: i64,
    due: NaiveDate,
    status: BillStatus,
    category: Option<&str>,
    updated_at: &str,
) -> Bill {
    Bill {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        amount: Decimal::from(amount),
        due_date: due,
        status,
        is_recurring: false,
        category: category.map(|c| c.to_string()),
        notes: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: updated_at.to_string(),
    }
}

#[test]
fn summary_folds_each_kind() {
    let today = day(2025, 6, 15);
    let subs = vec![
        subscription("Streaming", 12, "yearly", None),
        subscription("Music", 10, "monthly", None),
    ];
    let members = vec![
        membership("Gym", 25, MembershipStatus::Active),
        membership("Old Club", 99, MembershipStatus::Expired),
    ];
    let cards = vec![card(700, Some(1000)), card(50, None)];
    let loans = vec![
        loan("Car", 1000, 200, LoanStatus::Active),
        loan("Done", 500, 0, LoanStatus::PaidOff),
    ];
    let bills = vec![
        bill("Power", 50, day(2025, 6, 20), BillStatus::Pending, None, "2025-06-01 00:00:00"),
        bill("Water", 40, day(2025, 9, 1), BillStatus::Pending, None, "2025-06-01 00:00:00"),
        bill("Rent", 900, day(2025, 6, 18), BillStatus::Paid, None, "2025-06-01 00:00:00"),
        bill("Net", 60, day(2025, 6, 1), BillStatus::Overdue, None, "2025-06-01 00:00:00"),
    ];

    let s = analytics::summary(&subs, &members, &cards, &loans, &bills, today);
    assert_eq!(s.monthly_subscriptions, Decimal::from(11));
    assert_eq!(s.monthly_memberships, Decimal::from(25));
    assert_eq!(s.card_balance, Decimal::from(750));
    assert_eq!(s.card_limit, Decimal::from(1000));
    assert_eq!(s.utilization, 75);
    assert_eq!(s.loan_outstanding, Decimal::from(200));
    // the paid bill is out; the stored-overdue one is behind today, not ahead
    assert_eq!(s.upcoming_bill_total, Decimal::from(50));
    assert_eq!(s.upcoming_bill_count, 1);
    assert_eq!(s.unpaid_bill_count, 3);
}

#[test]
fn breakdown_merges_categories_descending() {
    let bills = vec![
        bill("A1", 50, day(2025, 6, 1), BillStatus::Pending, Some("A"), "x"),
        bill("A2", 30, day(2025, 6, 2), BillStatus::Pending, Some("A"), "x"),
        bill("B1", 20, day(2025, 6, 3), BillStatus::Pending, Some("B"), "x"),
    ];
    let breakdown = analytics::category_breakdown(&[], &bills);
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0].category, "A");
    assert_eq!(breakdown[0].total, Decimal::from(80));
    assert_eq!(breakdown[0].count, 2);
    assert_eq!(breakdown[1].category, "B");
    assert_eq!(breakdown[1].total, Decimal::from(20));
}

#[test]
fn breakdown_spans_subscriptions_and_defaults_to_other() {
    let subs = vec![
        subscription("Streaming", 12, "monthly", Some("Entertainment")),
        subscription("Unfiled", 5, "monthly", None),
    ];
    let bills = vec![bill(
        "Cinema",
        18,
        day(2025, 6, 1),
        BillStatus::Pending,
        Some("Entertainment"),
        "x",
    )];
    let breakdown = analytics::category_breakdown(&subs, &bills);
    assert_eq!(breakdown[0].category, "Entertainment");
    assert_eq!(breakdown[0].total, Decimal::from(30));
    assert_eq!(breakdown[0].count, 2);
    assert_eq!(breakdown[1].category, "Other");
    assert_eq!(breakdown[1].total, Decimal::from(5));
}

#[test]
fn trend_pins_recurring_load_to_every_month() {
    let subs = vec![subscription("Music", 12, "monthly", None)];
    let bills = vec![
        bill("March", 40, day(2025, 3, 1), BillStatus::Paid, None, "2025-03-10 12:00:00"),
        bill("March2", 10, day(2025, 3, 5), BillStatus::Paid, None, "2025-03-20 09:30:00"),
        bill("LastYear", 70, day(2024, 3, 1), BillStatus::Paid, None, "2024-03-10 12:00:00"),
        bill("Unpaid", 55, day(2025, 3, 1), BillStatus::Pending, None, "2025-03-10 12:00:00"),
        bill("BadStamp", 20, day(2025, 4, 1), BillStatus::Paid, None, "not a timestamp"),
    ];

    let trend = analytics::monthly_trend(&bills, &subs, 2025);
    assert_eq!(trend.len(), 12);
    for t in &trend {
        assert_eq!(t.subscriptions, Decimal::from(12));
    }
    assert_eq!(trend[2].month, 3);
    assert_eq!(trend[2].bills, Decimal::from(50));
    assert_eq!(trend[2].total, Decimal::from(62));
    // every other month carries only the recurring load
    assert_eq!(trend[0].bills, Decimal::ZERO);
    assert_eq!(trend[3].bills, Decimal::ZERO);
}

#[test]
fn cycle_breakdown_orders_by_monthly_equivalent() {
    let subs = vec![
        subscription("A", 10, "monthly", None),
        subscription("B", 6, "monthly", None),
        subscription("C", 60, "yearly", None),
        subscription("Legacy", 40, "biweekly", None),
    ];
    let cycles = analytics::cycle_breakdown(&subs);
    assert_eq!(cycles[0].cadence, "monthly");
    assert_eq!(cycles[0].monthly_equivalent, Decimal::from(16));
    assert_eq!(cycles[0].count, 2);
    assert_eq!(cycles[1].cadence, "yearly");
    assert_eq!(cycles[1].monthly_equivalent, Decimal::from(5));
    // the unknown cadence is present but contributes nothing
    assert_eq!(cycles[2].cadence, "biweekly");
    assert_eq!(cycles[2].monthly_equivalent, Decimal::ZERO);
    assert_eq!(cycles[2].total, Decimal::from(40));
}

#[test]
fn loan_progress_weights_by_amount_not_by_loan() {
    let loans = vec![
        loan("Big", 1000, 250, LoanStatus::Active),
        loan("Fresh", 100, 100, LoanStatus::Active),
    ];
    let report = analytics::loan_progress(&loans);

    assert_eq!(report.loans[0].name, "Big");
    assert_eq!(report.loans[0].progress, Decimal::from(75));
    assert_eq!(report.loans[1].progress, Decimal::ZERO);

    assert_eq!(report.total_original, Decimal::from(1100));
    assert_eq!(report.total_outstanding, Decimal::from(350));
    // (1100 - 350) / 1100 = 68.18%; a per-loan average would say 37.5%
    assert_eq!(
        report.overall_progress,
        Decimal::from_str_exact("68.18").unwrap()
    );
}

#[test]
fn loan_progress_guards_zero_original() {
    let report = analytics::loan_progress(&[loan("Odd", 0, 0, LoanStatus::Active)]);
    assert_eq!(report.loans[0].progress, Decimal::ZERO);
    assert_eq!(report.overall_progress, Decimal::ZERO);
}
