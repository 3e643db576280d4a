// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Normalization and analytics over obligation rows. Everything here except
//! the loan ledger is pure: functions take already-fetched rows plus an
//! explicit reference date and return plain data.

pub mod analytics;
pub mod cadence;
pub mod ledger;
pub mod utilization;
pub mod windows;
