// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::DATA_DIR_ENV;
use crate::todo::SUGGESTED_CATEGORIES;
use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn category_help() -> String {
    format!("Any name, e.g. {}", SUGGESTED_CATEGORIES.join(", "))
}

fn ids_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .num_args(1..)
        .value_parser(value_parser!(i64))
        .help(help)
}

pub fn build_cli() -> Command {
    Command::new("pocketbook")
        .about("Personal wallet ledger, monthly budgets, and to-do list")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .env(DATA_DIR_ENV)
                .value_parser(value_parser!(PathBuf))
                .help("Directory holding wallet.json and tasks.json"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .default_value("warn")
                .help("Log verbosity when RUST_LOG is unset"),
        )
        .subcommand(Command::new("init").about("Create the wallet file"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("Income or Expense"),
                        )
                        .arg(Arg::new("category").long("category").help("Defaults to Other"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Positive amount"),
                        )
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete transactions")
                        .arg(ids_arg("Transaction ids")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand(
                    Command::new("add").arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(Arg::new("name").long("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("status")
                        .about("Spending against limits this month")
                        .arg(Arg::new("category").long("category")),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and groupings")
                .subcommand(json_flags(Command::new("totals")))
                .subcommand(json_flags(Command::new("by-category")))
                .subcommand(json_flags(Command::new("monthly")))
                .subcommand(json_flags(Command::new("stats"))),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .about("Merge a wallet JSON file")
                    .arg(Arg::new("path").long("path").required(true)),
            ),
        )
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("task")
                .about("To-do list")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("task").long("task").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help(category_help()),
                        )
                        .arg(
                            Arg::new("priority")
                                .long("priority")
                                .help("Low, Medium or High"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("priority").long("priority"))
                        .arg(
                            Arg::new("done")
                                .long("done")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("pending"),
                        )
                        .arg(
                            Arg::new("pending")
                                .long("pending")
                                .action(ArgAction::SetTrue),
                        ),
                ))
                .subcommand(
                    Command::new("toggle").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("task").long("task"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("priority").long("priority")),
                )
                .subcommand(Command::new("rm").arg(ids_arg("Task ids")))
                .subcommand(Command::new("clear").about("Delete all tasks"))
                .subcommand(
                    Command::new("import").arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check the wallet for inconsistencies"))
}
