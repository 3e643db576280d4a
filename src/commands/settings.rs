// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::settings::{self, SettingsPatch};
use crate::utils::{id_for_user, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(conn, sub)?,
        Some(("set", sub)) => set(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn show(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let prefs = settings::get_or_create(conn, user_id)?;
    if !maybe_print_json(json_flag, jsonl_flag, &prefs)? {
        let rows = vec![
            vec![
                "Bill reminder days".into(),
                prefs.bill_reminder_days.to_string(),
            ],
            vec![
                "Subscription reminder days".into(),
                prefs.subscription_reminder_days.to_string(),
            ],
            vec![
                "Membership reminder days".into(),
                prefs.membership_reminder_days.to_string(),
            ],
        ];
        println!("{}", pretty_table(&["Setting", "Value"], rows));
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user_id = id_for_user(conn, sub.get_one::<String>("user").unwrap())?;
    let patch = SettingsPatch {
        bill_reminder_days: sub.get_one::<i64>("bill-days").copied(),
        subscription_reminder_days: sub.get_one::<i64>("subscription-days").copied(),
        membership_reminder_days: sub.get_one::<i64>("membership-days").copied(),
    };
    let updated = settings::update(conn, user_id, &patch)?;
    println!(
        "Reminder windows: bills {}d, subscriptions {}d, memberships {}d",
        updated.bill_reminder_days,
        updated.subscription_reminder_days,
        updated.membership_reminder_days
    );
    Ok(())
}
