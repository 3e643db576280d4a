// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duebook::engine::ledger::record_payment;
use duebook::error::Error;
use duebook::models::LoanStatus;
use duebook::store::loans::{self, LoanPatch, NewLoan};
use duebook::{cli, commands};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    duebook::db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('ada')", [])
        .unwrap();
    conn.execute("INSERT INTO users(name) VALUES('grace')", [])
        .unwrap();
    conn
}

fn new_loan(original: i64, outstanding: i64) -> NewLoan {
    NewLoan {
        name: String::from("Car"),
        lender: Some(String::from("CU")),
        original_amount: Decimal::from(original),
        outstanding_amount: Decimal::from(outstanding),
        interest_rate: None,
        payment_amount: None,
        next_payment_date: None,
        status: LoanStatus::Active,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn partial_payment_reduces_balance() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    let outcome =
        record_payment(&mut conn, 1, loan.id, Decimal::from(400), day(2025, 3, 1), None).unwrap();
    assert_eq!(outcome.loan.outstanding_amount, Decimal::from(600));
    assert_eq!(outcome.loan.status, LoanStatus::Active);
    assert!(!outcome.paid_off);

    let history = loans::payments(&conn, loan.id, 1).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].amount, Decimal::from(400));
}

#[test]
fn payment_covering_balance_flips_to_paid_off() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 200)).unwrap();

    let outcome =
        record_payment(&mut conn, 1, loan.id, Decimal::from(500), day(2025, 3, 1), None).unwrap();
    assert_eq!(outcome.loan.outstanding_amount, Decimal::ZERO);
    assert_eq!(outcome.loan.status, LoanStatus::PaidOff);
    assert!(outcome.paid_off);
}

#[test]
fn overpayment_clamps_at_zero() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    let outcome =
        record_payment(&mut conn, 1, loan.id, Decimal::from(1100), day(2025, 3, 1), None).unwrap();
    assert_eq!(outcome.loan.outstanding_amount, Decimal::ZERO);
    assert_eq!(outcome.loan.status, LoanStatus::PaidOff);
    assert!(outcome.paid_off);
}

#[test]
fn payment_clears_deferred_back_to_active() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 800)).unwrap();
    loans::update(
        &conn,
        loan.id,
        1,
        &LoanPatch {
            status: Some(LoanStatus::Deferred),
            ..LoanPatch::default()
        },
    )
    .unwrap();

    let outcome =
        record_payment(&mut conn, 1, loan.id, Decimal::from(100), day(2025, 4, 1), None).unwrap();
    assert_eq!(outcome.loan.status, LoanStatus::Active);
    assert_eq!(outcome.loan.outstanding_amount, Decimal::from(700));
}

#[test]
fn non_positive_amount_is_rejected_without_a_ledger_row() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    let err = record_payment(&mut conn, 1, loan.id, Decimal::ZERO, day(2025, 3, 1), None)
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(loans::payments(&conn, loan.id, 1).unwrap().is_empty());
}

#[test]
fn foreign_loan_reads_as_not_found() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    let err = record_payment(&mut conn, 2, loan.id, Decimal::from(100), day(2025, 3, 1), None)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    // nothing changed for the real owner
    let unchanged = loans::get(&conn, loan.id, 1).unwrap();
    assert_eq!(unchanged.outstanding_amount, Decimal::from(1000));
    assert!(loans::payments(&conn, loan.id, 1).unwrap().is_empty());
}

#[test]
fn balance_stays_inside_bounds_over_any_sequence() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    for amount in [250, 250, 100, 900] {
        let outcome = record_payment(
            &mut conn,
            1,
            loan.id,
            Decimal::from(amount),
            day(2025, 5, 1),
            None,
        )
        .unwrap();
        let outstanding = outcome.loan.outstanding_amount;
        assert!(outstanding >= Decimal::ZERO);
        assert!(outstanding <= Decimal::from(1000));
        assert_eq!(
            outcome.loan.status == LoanStatus::PaidOff,
            outstanding.is_zero()
        );
    }

    // running balance agrees with the ledger, clamped at zero
    let final_loan = loans::get(&conn, loan.id, 1).unwrap();
    let paid: Decimal = loans::payments(&conn, loan.id, 1)
        .unwrap()
        .iter()
        .map(|p| p.amount)
        .sum();
    assert_eq!(
        final_loan.outstanding_amount,
        (Decimal::from(1000) - paid).max(Decimal::ZERO)
    );
}

#[test]
fn ledger_rows_accumulate_newest_first() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(1000, 1000)).unwrap();

    record_payment(&mut conn, 1, loan.id, Decimal::from(100), day(2025, 1, 10), None).unwrap();
    record_payment(
        &mut conn,
        1,
        loan.id,
        Decimal::from(200),
        day(2025, 2, 10),
        Some("extra"),
    )
    .unwrap();

    let history = loans::payments(&conn, loan.id, 1).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].payment_date, day(2025, 2, 10));
    assert_eq!(history[0].notes.as_deref(), Some("extra"));
    assert_eq!(history[1].payment_date, day(2025, 1, 10));
}

#[test]
fn loan_pay_flows_through_the_cli() {
    let mut conn = setup();
    let loan = loans::insert(&conn, 1, &new_loan(500, 500)).unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "duebook",
        "loan",
        "pay",
        "--user",
        "ada",
        "--id",
        &loan.id.to_string(),
        "--amount",
        "125.50",
        "--date",
        "2025-06-01",
    ]);
    if let Some(("loan", loan_m)) = matches.subcommand() {
        commands::loans::handle(&mut conn, loan_m).unwrap();
    } else {
        panic!("loan command not parsed");
    }

    let after = loans::get(&conn, loan.id, 1).unwrap();
    assert_eq!(
        after.outstanding_amount,
        Decimal::from_str_exact("374.50").unwrap()
    );
}
