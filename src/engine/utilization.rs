// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CreditCard;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Balance-to-limit ratio as an integer percentage, rounded half-up.
/// A missing or non-positive limit reads as 0% utilized, not as an error.
pub fn utilization(balance: Decimal, limit: Option<Decimal>) -> u32 {
    let limit = match limit {
        Some(l) if l > Decimal::ZERO => l,
        _ => return 0,
    };
    if balance <= Decimal::ZERO {
        return 0;
    }
    let pct = balance / limit * Decimal::from(100);
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(u32::MAX)
}

pub fn card_utilization(card: &CreditCard) -> u32 {
    utilization(card.balance, card.credit_limit)
}

/// Cards strictly above the threshold. A card sitting exactly at the
/// threshold is excluded.
pub fn high_utilization(cards: &[CreditCard], threshold: u32) -> Vec<&CreditCard> {
    cards
        .iter()
        .filter(|c| card_utilization(c) > threshold)
        .collect()
}
