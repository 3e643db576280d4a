// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Cadence;
use rust_decimal::Decimal;

/// Cost per month for a given billing cadence. An unrecognized cadence
/// contributes zero so one legacy row cannot sink a whole rollup.
pub fn monthly_equivalent(cost: Decimal, cadence: &str) -> Decimal {
    match Cadence::parse(cadence) {
        Some(Cadence::Weekly) => cost * Decimal::from(4),
        Some(Cadence::Monthly) => cost,
        Some(Cadence::Quarterly) => cost / Decimal::from(3),
        Some(Cadence::Yearly) => cost / Decimal::from(12),
        None => Decimal::ZERO,
    }
}

/// Cost per year for a given billing cadence; zero when unrecognized.
pub fn yearly_equivalent(cost: Decimal, cadence: &str) -> Decimal {
    match Cadence::parse(cadence) {
        Some(Cadence::Weekly) => cost * Decimal::from(52),
        Some(Cadence::Monthly) => cost * Decimal::from(12),
        Some(Cadence::Quarterly) => cost * Decimal::from(4),
        Some(Cadence::Yearly) => cost,
        None => Decimal::ZERO,
    }
}
