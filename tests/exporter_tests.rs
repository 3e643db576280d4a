// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use duebook::models::BillStatus;
use duebook::store::bills;
use duebook::{cli, commands};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    duebook::db::init_schema(&mut conn).unwrap();
    conn.execute("INSERT INTO users(name) VALUES('ada')", [])
        .unwrap();
    conn
}

#[test]
fn export_bills_writes_pretty_json() {
    let conn = setup();
    let created = bills::insert(
        &conn,
        1,
        &bills::NewBill {
            name: String::from("Internet"),
            amount: Decimal::from_str_exact("59.99").unwrap(),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status: BillStatus::Pending,
            is_recurring: true,
            category: Some(String::from("Utilities")),
            notes: None,
        },
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("bills.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "duebook", "export", "bills", "--user", "ada", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = parsed.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["id"], json!(created.id));
    assert_eq!(rows[0]["name"], json!("Internet"));
    assert_eq!(rows[0]["amount"], json!("59.99"));
    assert_eq!(rows[0]["due_date"], json!("2025-08-01"));
    assert_eq!(rows[0]["status"], json!("pending"));
    assert_eq!(rows[0]["is_recurring"], json!(true));
    assert_eq!(rows[0]["category"], json!("Utilities"));
}

#[test]
fn export_only_covers_the_requesting_user() {
    let conn = setup();
    conn.execute("INSERT INTO users(name) VALUES('grace')", [])
        .unwrap();
    bills::insert(
        &conn,
        2,
        &bills::NewBill {
            name: String::from("Private"),
            amount: Decimal::from(10),
            due_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            status: BillStatus::Pending,
            is_recurring: false,
            category: None,
            notes: None,
        },
    )
    .unwrap();

    let dir = tempdir().unwrap();
    let out_path = dir.path().join("bills.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "duebook", "export", "bills", "--user", "ada", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        commands::exporter::handle(&conn, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(parsed.as_array().unwrap().is_empty());
}

#[test]
fn export_rejects_unknown_format_before_writing() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("bills.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "duebook", "export", "bills", "--user", "ada", "--format", "xml", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(commands::exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}

#[test]
fn export_rejects_unknown_kind() {
    let conn = setup();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("things.json");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "duebook", "export", "things", "--user", "ada", "--format", "json", "--out", &out_str,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        assert!(commands::exporter::handle(&conn, export_m).is_err());
    } else {
        panic!("no export subcommand");
    }
    assert!(!out_path.exists());
}
