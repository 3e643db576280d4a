// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn user_arg() -> Arg {
    Arg::new("user")
        .long("user")
        .value_name("NAME")
        .required(true)
        .help("Owner of the records")
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .value_name("ID")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn days_arg(default: &'static str) -> Arg {
    Arg::new("days")
        .long("days")
        .value_name("N")
        .default_value(default)
        .value_parser(clap::value_parser!(i64))
}

fn json_output(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print JSON lines"),
    )
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Manage users")
        .subcommand(
            Command::new("add")
                .about("Add a user")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(json_output(Command::new("list").about("List users")))
        .subcommand(
            Command::new("rm")
                .about("Remove a user and every record they own")
                .arg(Arg::new("name").required(true)),
        )
}

fn sub_cmd() -> Command {
    Command::new("sub")
        .about("Manage subscriptions")
        .subcommand(
            Command::new("add")
                .about("Add a subscription")
                .arg(user_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("cost").long("cost").required(true))
                .arg(
                    Arg::new("cadence")
                        .long("cadence")
                        .required(true)
                        .help("weekly|monthly|quarterly|yearly"),
                )
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes"))
                .arg(
                    Arg::new("inactive")
                        .long("inactive")
                        .action(ArgAction::SetTrue)
                        .help("Create the subscription as inactive"),
                ),
        )
        .subcommand(json_output(
            Command::new("list")
                .about("List subscriptions")
                .arg(user_arg())
                .arg(
                    Arg::new("active")
                        .long("active")
                        .action(ArgAction::SetTrue)
                        .help("Only active subscriptions"),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a subscription")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("cost").long("cost"))
                .arg(Arg::new("cadence").long("cadence"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes"))
                .arg(
                    Arg::new("active")
                        .long("active")
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool)),
                ),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a subscription")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(json_output(
            Command::new("upcoming")
                .about("Active subscriptions renewing soon")
                .arg(user_arg())
                .arg(days_arg("7")),
        ))
}

fn membership_cmd() -> Command {
    Command::new("membership")
        .about("Manage memberships")
        .subcommand(
            Command::new("add")
                .about("Add a membership")
                .arg(user_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("cost").long("cost").required(true))
                .arg(Arg::new("organization").long("organization"))
                .arg(Arg::new("renewal").long("renewal").value_name("YYYY-MM-DD"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("active|inactive|expired"),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_output(
            Command::new("list").about("List memberships").arg(user_arg()),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a membership")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("cost").long("cost"))
                .arg(Arg::new("organization").long("organization"))
                .arg(Arg::new("renewal").long("renewal").value_name("YYYY-MM-DD"))
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a membership")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(json_output(
            Command::new("expiring")
                .about("Memberships renewing or already lapsed soon")
                .arg(user_arg())
                .arg(days_arg("30")),
        ))
}

fn bill_cmd() -> Command {
    Command::new("bill")
        .about("Manage bills")
        .subcommand(
            Command::new("add")
                .about("Add a bill")
                .arg(user_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("due")
                        .long("due")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(Arg::new("status").long("status").help("pending|paid|overdue"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_output(
            Command::new("list")
                .about("List bills")
                .arg(user_arg())
                .arg(Arg::new("status").long("status").help("pending|paid|overdue"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .action(ArgAction::SetTrue)
                        .help("Only recurring bills"),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a bill")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                .arg(Arg::new("status").long("status"))
                .arg(
                    Arg::new("recurring")
                        .long("recurring")
                        .value_name("BOOL")
                        .value_parser(clap::value_parser!(bool)),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a bill")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("pay")
                .about("Mark a bill as paid")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(json_output(
            Command::new("overdue")
                .about("Unpaid bills past their due date")
                .arg(user_arg()),
        ))
        .subcommand(json_output(
            Command::new("upcoming")
                .about("Unpaid bills due soon")
                .arg(user_arg())
                .arg(days_arg("7")),
        ))
}

fn card_cmd() -> Command {
    Command::new("card")
        .about("Manage credit cards")
        .subcommand(
            Command::new("add")
                .about("Add a credit card")
                .arg(user_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("last-four")
                        .long("last-four")
                        .value_name("DIGITS")
                        .required(true),
                )
                .arg(Arg::new("bank").long("bank"))
                .arg(Arg::new("balance").long("balance"))
                .arg(Arg::new("limit").long("limit"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD")),
        )
        .subcommand(json_output(
            Command::new("list")
                .about("List credit cards with utilization")
                .arg(user_arg()),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a credit card")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("last-four").long("last-four").value_name("DIGITS"))
                .arg(Arg::new("bank").long("bank"))
                .arg(Arg::new("balance").long("balance"))
                .arg(Arg::new("limit").long("limit"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a credit card")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(json_output(
            Command::new("high")
                .about("Cards above a utilization threshold")
                .arg(user_arg())
                .arg(
                    Arg::new("threshold")
                        .long("threshold")
                        .value_name("PCT")
                        .default_value("70")
                        .value_parser(clap::value_parser!(u32)),
                ),
        ))
}

fn loan_cmd() -> Command {
    Command::new("loan")
        .about("Manage loans and their payment ledger")
        .subcommand(
            Command::new("add")
                .about("Add a loan")
                .arg(user_arg())
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("original").long("original").required(true))
                .arg(Arg::new("outstanding").long("outstanding"))
                .arg(Arg::new("lender").long("lender"))
                .arg(Arg::new("rate").long("rate"))
                .arg(Arg::new("payment").long("payment"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("active|paid_off|deferred"),
                ),
        )
        .subcommand(json_output(
            Command::new("list")
                .about("List loans")
                .arg(user_arg())
                .arg(
                    Arg::new("status")
                        .long("status")
                        .help("active|paid_off|deferred"),
                ),
        ))
        .subcommand(
            Command::new("update")
                .about("Update a loan")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("original").long("original"))
                .arg(Arg::new("outstanding").long("outstanding"))
                .arg(Arg::new("lender").long("lender"))
                .arg(Arg::new("rate").long("rate"))
                .arg(Arg::new("payment").long("payment"))
                .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                .arg(Arg::new("status").long("status")),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove a loan and its payment history")
                .arg(user_arg())
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("pay")
                .about("Record a payment against a loan")
                .arg(user_arg())
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .value_name("YYYY-MM-DD")
                        .required(true),
                )
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(json_output(
            Command::new("payments")
                .about("Payment ledger for a loan")
                .arg(user_arg())
                .arg(id_arg()),
        ))
        .subcommand(json_output(
            Command::new("progress")
                .about("Payoff progress per loan")
                .arg(user_arg()),
        ))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Rollup analytics")
        .subcommand(json_output(
            Command::new("summary")
                .about("Dashboard summary")
                .arg(user_arg()),
        ))
        .subcommand(json_output(
            Command::new("breakdown")
                .about("Subscription and bill totals by category")
                .arg(user_arg()),
        ))
        .subcommand(json_output(
            Command::new("trend")
                .about("Monthly paid-bill and recurring totals for a year")
                .arg(user_arg())
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_name("YYYY")
                        .value_parser(clap::value_parser!(i32)),
                ),
        ))
        .subcommand(json_output(
            Command::new("cycles")
                .about("Subscription totals by billing cadence")
                .arg(user_arg()),
        ))
}

fn settings_cmd() -> Command {
    Command::new("settings")
        .about("Per-user reminder windows")
        .subcommand(json_output(
            Command::new("show").about("Show settings").arg(user_arg()),
        ))
        .subcommand(
            Command::new("set")
                .about("Change reminder windows")
                .arg(user_arg())
                .arg(
                    Arg::new("bill-days")
                        .long("bill-days")
                        .value_name("N")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("subscription-days")
                        .long("subscription-days")
                        .value_name("N")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(
                    Arg::new("membership-days")
                        .long("membership-days")
                        .value_name("N")
                        .value_parser(clap::value_parser!(i64)),
                ),
        )
}

fn export_cmd() -> Command {
    Command::new("export")
        .about("Export one obligation kind to a file")
        .arg(
            Arg::new("kind")
                .required(true)
                .help("subscriptions|memberships|bills|cards|loans"),
        )
        .arg(user_arg())
        .arg(
            Arg::new("format")
                .long("format")
                .required(true)
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").value_name("PATH").required(true))
}

pub fn build_cli() -> Command {
    Command::new("duebook")
        .about("Track subscriptions, memberships, bills, credit cards, and loans")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(user_cmd())
        .subcommand(sub_cmd())
        .subcommand(membership_cmd())
        .subcommand(bill_cmd())
        .subcommand(card_cmd())
        .subcommand(loan_cmd())
        .subcommand(report_cmd())
        .subcommand(
            Command::new("remind")
                .about("Everything needing attention, per your reminder windows")
                .arg(user_arg()),
        )
        .subcommand(settings_cmd())
        .subcommand(export_cmd())
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
