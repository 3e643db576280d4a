// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use duebook::engine::cadence::{monthly_equivalent, yearly_equivalent};
use rust_decimal::Decimal;

#[test]
fn yearly_subscription_normalizes_to_monthly() {
    let cost = Decimal::from(12);
    assert_eq!(monthly_equivalent(cost, "yearly"), Decimal::from(1));
    assert_eq!(yearly_equivalent(cost, "yearly"), Decimal::from(12));
}

#[test]
fn monthly_cadence_is_identity() {
    let cost = Decimal::from_str_exact("9.99").unwrap();
    assert_eq!(monthly_equivalent(cost, "monthly"), cost);
    assert_eq!(yearly_equivalent(cost, "monthly"), cost * Decimal::from(12));
}

#[test]
fn quarterly_splits_across_three_months() {
    let cost = Decimal::from(9);
    assert_eq!(monthly_equivalent(cost, "quarterly"), Decimal::from(3));
    assert_eq!(yearly_equivalent(cost, "quarterly"), Decimal::from(36));
}

#[test]
fn weekly_uses_four_week_months_and_52_week_years() {
    // the monthly figure is 4 weeks by convention, the yearly one is 52,
    // so weekly is the one cadence where yearly != monthly * 12
    let cost = Decimal::from(10);
    assert_eq!(monthly_equivalent(cost, "weekly"), Decimal::from(40));
    assert_eq!(yearly_equivalent(cost, "weekly"), Decimal::from(520));
}

#[test]
fn yearly_equals_twelve_monthly_for_non_weekly_cadences() {
    let cost = Decimal::from(36);
    for cadence in ["monthly", "quarterly", "yearly"] {
        assert_eq!(
            yearly_equivalent(cost, cadence),
            monthly_equivalent(cost, cadence) * Decimal::from(12),
            "cadence {}",
            cadence
        );
    }
}

#[test]
fn unrecognized_cadence_contributes_zero() {
    let cost = Decimal::from(100);
    for bad in ["biweekly", "annual", "", "MONTHLY"] {
        assert_eq!(monthly_equivalent(cost, bad), Decimal::ZERO, "'{}'", bad);
        assert_eq!(yearly_equivalent(cost, bad), Decimal::ZERO, "'{}'", bad);
    }
}

#[test]
fn no_internal_rounding_before_display() {
    // 10 / 3 keeps full precision; rounding happens only at the boundary
    let monthly = monthly_equivalent(Decimal::from(10), "quarterly");
    assert!(monthly > Decimal::from_str_exact("3.33").unwrap());
    assert!(monthly < Decimal::from_str_exact("3.34").unwrap());
}
