// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User-scoped persistence for the five obligation kinds. Every statement
//! filters by `user_id`; a row that is absent and a row owned by someone else
//! are reported identically as NotFound.

pub mod bills;
pub mod cards;
pub mod loans;
pub mod memberships;
pub mod settings;
pub mod subscriptions;

use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;

use crate::models::InvalidEnum;

pub(crate) fn decimal_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = row.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn opt_decimal_col(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let s: Option<String> = row.get(idx)?;
    match s {
        Some(s) => s
            .parse::<Decimal>()
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}

pub(crate) fn enum_col<T>(
    row: &Row<'_>,
    idx: usize,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let s: String = row.get(idx)?;
    parse(&s).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(InvalidEnum { field, value: s }))
    })
}
