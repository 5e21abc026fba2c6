// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn accounts_filter(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("accounts")
            .long("accounts")
            .value_name("IDS")
            .help("Comma-separated account ids to include"),
    )
}

pub fn build_cli() -> Command {
    Command::new("ledgerscope")
        .about("Personal finance analytics: cash flow, budgets, spending risk, rental tax reports")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("checking")
                                .value_parser([
                                    "checking",
                                    "savings",
                                    "credit_card",
                                    "investment",
                                    "cash",
                                ]),
                        )
                        .arg(
                            Arg::new("initial-balance")
                                .long("initial-balance")
                                .default_value("0"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List accounts with derived balances"),
                ))
                .subcommand(
                    Command::new("close")
                        .about("Deactivate an account (kept for history)")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Signed amount: positive inflow, negative expense"),
                        )
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("batch").long("batch").value_name("ID")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month"))
                        .arg(Arg::new("account").long("account"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("categorize")
                        .about("Re-label a transaction's category")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(
                    Command::new("verify")
                        .about("Mark a transaction as reviewed")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Create or update a budget")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("alert-threshold")
                                .long("alert-threshold")
                                .default_value("80")
                                .value_parser(value_parser!(u32)),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a budget")
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(accounts_filter(json_flags(
                    Command::new("status")
                        .about("Budget vs actual for a month")
                        .arg(Arg::new("month").long("month").value_name("YYYY-MM")),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics reports")
                .subcommand(accounts_filter(json_flags(
                    Command::new("monthly")
                        .about("Income, spending, and top transactions for a month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_name("YYYY-MM")
                                .required(true),
                        ),
                )))
                .subcommand(accounts_filter(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income vs expenses")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("12")
                                .value_parser(value_parser!(usize)),
                        ),
                )))
                .subcommand(accounts_filter(json_flags(
                    Command::new("risks").about("Categories spending hot against their baseline"),
                )))
                .subcommand(accounts_filter(json_flags(
                    Command::new("dashboard").about("Balance, month-to-date flow, budget alerts"),
                )))
                .subcommand(json_flags(
                    Command::new("balance-history")
                        .about("Daily balances for the trailing window")
                        .arg(
                            Arg::new("days")
                                .long("days")
                                .default_value("30")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("account").long("account")),
                ))
                .subcommand(json_flags(
                    Command::new("tax")
                        .about("T776-style rental summary for a year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("utilities")
                        .about("Tenant utility reconciliation for a year")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .about("Write the transaction register to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Data-quality checks"))
}
