// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use duebook::engine::utilization::{high_utilization, utilization};
use duebook::models::CreditCard;
use rust_decimal::Decimal;

fn card(name: &str, balance: i64, limit: Option<i64>) -> CreditCard {
    CreditCard {
        id: 0,
        user_id: 1,
        name: name.to_string(),
        bank: None,
        last_four: String::from("4242"),
        balance: Decimal::from(balance),
        credit_limit: limit.map(Decimal::from),
        due_date: None,
        created_at: String::from("2025-01-01 00:00:00"),
        updated_at: String::from("2025-01-01 00:00:00"),
    }
}

#[test]
fn zero_or_missing_limit_reads_as_zero() {
    assert_eq!(utilization(Decimal::from(500), None), 0);
    assert_eq!(utilization(Decimal::from(500), Some(Decimal::ZERO)), 0);
    assert_eq!(utilization(Decimal::from(500), Some(Decimal::from(-100))), 0);
}

#[test]
fn zero_or_negative_balance_reads_as_zero() {
    assert_eq!(utilization(Decimal::ZERO, Some(Decimal::from(1000))), 0);
    assert_eq!(utilization(Decimal::from(-20), Some(Decimal::from(1000))), 0);
}

#[test]
fn percentage_rounds_half_up() {
    assert_eq!(
        utilization(Decimal::from(700), Some(Decimal::from(1000))),
        70
    );
    assert_eq!(
        utilization(Decimal::from(701), Some(Decimal::from(1000))),
        70
    );
    assert_eq!(
        utilization(Decimal::from(705), Some(Decimal::from(1000))),
        71
    );
    assert_eq!(
        utilization(Decimal::from(750), Some(Decimal::from(1000))),
        75
    );
}

#[test]
fn over_limit_balance_exceeds_100() {
    assert_eq!(
        utilization(Decimal::from(1200), Some(Decimal::from(1000))),
        120
    );
}

#[test]
fn high_utilization_is_strictly_greater() {
    let cards = vec![
        card("at-threshold", 700, Some(1000)),
        card("rounds-to-threshold", 701, Some(1000)),
        card("above", 750, Some(1000)),
        card("no-limit", 900, None),
    ];
    let high = high_utilization(&cards, 70);
    let names: Vec<&str> = high.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["above"]);
}
