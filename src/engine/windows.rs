// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Bill, BillStatus, Loan, LoanStatus, Membership, MembershipStatus, Subscription};
use chrono::{Duration, NaiveDate};

/// An obligation row that can be placed on the calendar. `is_open` means the
/// row still needs attention (pending-like); rows without a date never match
/// any window.
pub trait DueItem {
    fn due_on(&self) -> Option<NaiveDate>;
    fn is_open(&self) -> bool;
}

impl DueItem for Bill {
    fn due_on(&self) -> Option<NaiveDate> {
        Some(self.due_date)
    }
    fn is_open(&self) -> bool {
        self.status != BillStatus::Paid
    }
}

impl DueItem for Subscription {
    fn due_on(&self) -> Option<NaiveDate> {
        self.next_due_date
    }
    fn is_open(&self) -> bool {
        self.active
    }
}

impl DueItem for Membership {
    fn due_on(&self) -> Option<NaiveDate> {
        self.renewal_date
    }
    fn is_open(&self) -> bool {
        self.status == MembershipStatus::Active
    }
}

impl DueItem for Loan {
    fn due_on(&self) -> Option<NaiveDate> {
        self.next_payment_date
    }
    fn is_open(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

/// Open items dated strictly before `today`.
pub fn overdue<T: DueItem>(items: &[T], today: NaiveDate) -> Vec<&T> {
    items
        .iter()
        .filter(|i| i.is_open() && matches!(i.due_on(), Some(d) if d < today))
        .collect()
}

/// Open items dated inside [today, today + days], both ends inclusive.
/// Disjoint from `overdue` for the same `today` by construction.
pub fn upcoming_within<T: DueItem>(items: &[T], today: NaiveDate, days: i64) -> Vec<&T> {
    let end = today + Duration::days(days);
    items
        .iter()
        .filter(|i| i.is_open() && matches!(i.due_on(), Some(d) if today <= d && d <= end))
        .collect()
}

/// Items dated on or before `today + days`, regardless of status and with no
/// lower bound: something already past still needs attention now.
pub fn expiring_within<T: DueItem>(items: &[T], today: NaiveDate, days: i64) -> Vec<&T> {
    let end = today + Duration::days(days);
    items
        .iter()
        .filter(|i| matches!(i.due_on(), Some(d) if d <= end))
        .collect()
}
