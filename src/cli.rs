// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::catalog::catalog;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Only include entries dated in this month")
}

fn report(name: &'static str, about: &'static str) -> Command {
    json_flags(Command::new(name).about(about).arg(month_arg()))
}

fn expense_add() -> Command {
    let mut cmd = Command::new("add")
        .about("Record a day's expenses")
        .arg(
            Arg::new("date")
                .long("date")
                .required(true)
                .value_name("YYYY-MM-DD"),
        )
        .arg(Arg::new("notes").long("notes"));
    for meta in catalog().iter() {
        cmd = cmd.arg(
            Arg::new(meta.key)
                .long(meta.flag)
                .value_name("AMOUNT")
                .default_value("0")
                .help(meta.label),
        );
    }
    cmd
}

pub fn build_cli() -> Command {
    Command::new("dailyspend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Daily expense log with income profile and monthly statistics")
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .value_name("USERNAME")
                .help("Act as this configured user instead of the logged-in one"),
        )
        .subcommand(Command::new("init").about("Create the local database"))
        .subcommand(
            Command::new("login")
                .about("Log in as a configured user")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the logged-in user"))
        .subcommand(Command::new("whoami").about("Show the acting user"))
        .subcommand(
            Command::new("expense")
                .about("Add, list and delete expense entries")
                .subcommand(expense_add())
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List entries, newest first")
                        .arg(month_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an entry by id")
                        .arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("income")
                .about("Show or edit the monthly income profile")
                .subcommand(json_flags(Command::new("show")))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("base-salary").long("base-salary"))
                        .arg(Arg::new("food-deduction").long("food-deduction"))
                        .arg(Arg::new("pf").long("pf")),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Derived statistics")
                .subcommand(report("summary", "Monthly totals, savings rate and insights"))
                .subcommand(report("categories", "Spending per category"))
                .subcommand(report("top", "Five largest spending categories"))
                .subcommand(report("weekly", "Totals per calendar week, oldest first"))
                .subcommand(report("daily", "Totals per day, newest first")),
        )
        .subcommand(json_flags(
            Command::new("categories").about("List expense categories"),
        ))
        .subcommand(
            Command::new("export").subcommand(
                Command::new("expenses")
                    .arg(Arg::new("format").long("format").required(true))
                    .arg(Arg::new("out").long("out").required(true))
                    .arg(month_arg()),
            ),
        )
        .subcommand(Command::new("doctor").about("Check stored entries for inconsistencies"))
}
