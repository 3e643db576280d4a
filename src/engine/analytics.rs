// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{cadence, utilization, windows};
use crate::models::{
    Bill, BillStatus, CreditCard, Loan, LoanStatus, Membership, MembershipStatus, Subscription,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::HashMap;

const UPCOMING_BILL_DAYS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub monthly_subscriptions: Decimal,
    pub monthly_memberships: Decimal,
    pub card_balance: Decimal,
    pub card_limit: Decimal,
    pub utilization: u32,
    pub loan_outstanding: Decimal,
    pub upcoming_bill_total: Decimal,
    pub upcoming_bill_count: usize,
    pub unpaid_bill_count: usize,
}

/// Dashboard rollup. Utilization is computed once over the summed balance and
/// limit, not averaged per card, so a large card weighs as much as it should.
pub fn summary(
    subs: &[Subscription],
    memberships: &[Membership],
    cards: &[CreditCard],
    loans: &[Loan],
    bills: &[Bill],
    today: NaiveDate,
) -> Summary {
    let monthly_subscriptions: Decimal = subs
        .iter()
        .map(|s| cadence::monthly_equivalent(s.cost, &s.cadence))
        .sum();

    let monthly_memberships: Decimal = memberships
        .iter()
        .filter(|m| m.status == MembershipStatus::Active)
        .map(|m| m.cost)
        .sum();

    let card_balance: Decimal = cards.iter().map(|c| c.balance).sum();
    let card_limit: Decimal = cards.iter().filter_map(|c| c.credit_limit).sum();

    let loan_outstanding: Decimal = loans
        .iter()
        .filter(|l| l.status == LoanStatus::Active)
        .map(|l| l.outstanding_amount)
        .sum();

    let upcoming = windows::upcoming_within(bills, today, UPCOMING_BILL_DAYS);
    let upcoming_bill_total: Decimal = upcoming.iter().map(|b| b.amount).sum();
    let unpaid_bill_count = bills.iter().filter(|b| b.status != BillStatus::Paid).count();

    Summary {
        monthly_subscriptions,
        monthly_memberships,
        card_balance,
        card_limit,
        utilization: utilization::utilization(card_balance, Some(card_limit)),
        loan_outstanding,
        upcoming_bill_total,
        upcoming_bill_count: upcoming.len(),
        unpaid_bill_count,
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}

/// Subscription and bill totals merged per category, descending by total.
/// Rows without a category land in "Other".
pub fn category_breakdown(subs: &[Subscription], bills: &[Bill]) -> Vec<CategoryTotal> {
    let mut merged: HashMap<String, (Decimal, usize)> = HashMap::new();
    for (category, amount) in subs
        .iter()
        .map(|s| (s.category.as_deref(), s.cost))
        .chain(bills.iter().map(|b| (b.category.as_deref(), b.amount)))
    {
        let key = match category {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => String::from("Other"),
        };
        let entry = merged.entry(key).or_insert((Decimal::ZERO, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotal> = merged
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category,
            total,
            count,
        })
        .collect();
    // ties broken by name so output order is stable
    breakdown.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    breakdown
}

#[derive(Debug, Serialize)]
pub struct MonthlyTrend {
    pub month: u32,
    pub bills: Decimal,
    pub subscriptions: Decimal,
    pub total: Decimal,
}

/// Twelve entries for the given year: bills marked paid grouped by the month
/// they were last touched, plus the flat recurring subscription load. The
/// recurring component is constant across months by construction, not
/// reconstructed from history.
pub fn monthly_trend(bills: &[Bill], subs: &[Subscription], year: i32) -> Vec<MonthlyTrend> {
    let recurring: Decimal = subs
        .iter()
        .map(|s| cadence::monthly_equivalent(s.cost, &s.cadence))
        .sum();

    let mut paid_by_month = [Decimal::ZERO; 12];
    for bill in bills {
        if bill.status != BillStatus::Paid {
            continue;
        }
        if let Some((y, m)) = timestamp_month(&bill.updated_at) {
            if y == year {
                paid_by_month[(m - 1) as usize] += bill.amount;
            }
        }
    }

    (0..12u32)
        .map(|i| {
            let bills_total = paid_by_month[i as usize];
            MonthlyTrend {
                month: i + 1,
                bills: bills_total,
                subscriptions: recurring,
                total: bills_total + recurring,
            }
        })
        .collect()
}

// Timestamps come from SQLite datetime('now'); a bad row contributes nothing
// rather than failing the whole trend.
fn timestamp_month(ts: &str) -> Option<(i32, u32)> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S") {
        return Some((dt.year(), dt.month()));
    }
    if let Ok(d) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return Some((d.year(), d.month()));
    }
    None
}

#[derive(Debug, Serialize)]
pub struct CycleTotal {
    pub cadence: String,
    pub monthly_equivalent: Decimal,
    pub total: Decimal,
    pub count: usize,
}

/// Per-cadence subscription totals, descending by monthly equivalent.
pub fn cycle_breakdown(subs: &[Subscription]) -> Vec<CycleTotal> {
    let mut merged: HashMap<String, (Decimal, Decimal, usize)> = HashMap::new();
    for s in subs {
        let entry = merged
            .entry(s.cadence.clone())
            .or_insert((Decimal::ZERO, Decimal::ZERO, 0));
        entry.0 += cadence::monthly_equivalent(s.cost, &s.cadence);
        entry.1 += s.cost;
        entry.2 += 1;
    }
    let mut cycles: Vec<CycleTotal> = merged
        .into_iter()
        .map(|(cadence, (monthly_equivalent, total, count))| CycleTotal {
            cadence,
            monthly_equivalent,
            total,
            count,
        })
        .collect();
    cycles.sort_by(|a, b| {
        b.monthly_equivalent
            .cmp(&a.monthly_equivalent)
            .then_with(|| a.cadence.cmp(&b.cadence))
    });
    cycles
}

#[derive(Debug, Serialize)]
pub struct LoanProgress {
    pub id: i64,
    pub name: String,
    pub original_amount: Decimal,
    pub outstanding_amount: Decimal,
    pub progress: Decimal,
    pub status: LoanStatus,
}

#[derive(Debug, Serialize)]
pub struct LoanProgressReport {
    pub loans: Vec<LoanProgress>,
    pub total_original: Decimal,
    pub total_outstanding: Decimal,
    pub overall_progress: Decimal,
}

/// Payoff progress per loan plus an aggregate computed from the summed
/// totals. Averaging per-loan percentages would let a small loan swamp a
/// large one; the summed form weights correctly.
pub fn loan_progress(loans: &[Loan]) -> LoanProgressReport {
    let mut rows: Vec<LoanProgress> = loans
        .iter()
        .map(|l| LoanProgress {
            id: l.id,
            name: l.name.clone(),
            original_amount: l.original_amount,
            outstanding_amount: l.outstanding_amount,
            progress: percent_paid(l.original_amount, l.outstanding_amount),
            status: l.status,
        })
        .collect();
    rows.sort_by(|a, b| b.progress.cmp(&a.progress).then_with(|| a.name.cmp(&b.name)));

    let total_original: Decimal = loans.iter().map(|l| l.original_amount).sum();
    let total_outstanding: Decimal = loans.iter().map(|l| l.outstanding_amount).sum();

    LoanProgressReport {
        loans: rows,
        total_original,
        total_outstanding,
        overall_progress: percent_paid(total_original, total_outstanding),
    }
}

fn percent_paid(original: Decimal, outstanding: Decimal) -> Decimal {
    if original <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((original - outstanding) / original * Decimal::from(100))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
