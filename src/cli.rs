// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn sort_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("sort")
            .long("sort")
            .help("Sort column (name|category|type|status|actual|budget|date|mode|platform|card)"),
    )
    .arg(
        Arg::new("desc")
            .long("desc")
            .action(ArgAction::SetTrue)
            .requires("sort")
            .help("Sort descending"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneymesh")
        .about("MoneyMesh: personal budget and credit-card ledger")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("card")
                .about("Manage credit cards and card transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add or update a credit card")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("number").long("number").required(true))
                        .arg(
                            Arg::new("color")
                                .long("color")
                                .required(true)
                                .help("Red|Blue|Green|Purple|Yellow|Indigo|Pink|Teal"),
                        )
                        .arg(
                            Arg::new("settlement-day")
                                .long("settlement-day")
                                .required(true)
                                .value_parser(value_parser!(i64))
                                .help("Billing anchor, day of month (1-31)"),
                        )
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Edit the card with this id in place"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List credit cards")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a card and every transaction linked to it")
                        .arg(Arg::new("name").long("name").required(true)),
                )
                .subcommand(json_flags(
                    Command::new("report")
                        .about("Billing cycle and net spend per card")
                        .arg(
                            Arg::new("card")
                                .long("card")
                                .help("Restrict to one card, windowed to its current cycle"),
                        ),
                ))
                .subcommand(
                    Command::new("tx")
                        .about("Card-linked transactions")
                        .subcommand(
                            Command::new("add")
                                .about("Record a card expense or bill payment")
                                .arg(Arg::new("name").long("name").required(true))
                                .arg(Arg::new("actual").long("actual").required(true))
                                .arg(Arg::new("card").long("card").required(true))
                                .arg(
                                    Arg::new("category")
                                        .long("category")
                                        .default_value("Expense")
                                        .help("Expense|Bill (a bill is recorded as a Settlement)"),
                                )
                                .arg(Arg::new("date").long("date").required(true))
                                .arg(
                                    Arg::new("id")
                                        .long("id")
                                        .value_parser(value_parser!(i64))
                                        .help("Edit the entry with this id in place"),
                                ),
                        )
                        .subcommand(json_flags(sort_args(
                            Command::new("list")
                                .about("List card-linked transactions")
                                .arg(
                                    Arg::new("card")
                                        .long("card")
                                        .help("One card, windowed to its current billing cycle"),
                                )
                                .arg(
                                    Arg::new("category")
                                        .long("category")
                                        .help("Expense|Bill"),
                                )
                                .arg(Arg::new("search").long("search")),
                        ))),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Manage ledger entries")
                .subcommand(
                    Command::new("add")
                        .about("Add or update a ledger entry")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("Income|Expense|Investment|Other|Settlement"),
                        )
                        .arg(Arg::new("type").long("type").default_value(""))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("Not started")
                                .help("'Not started'|'In progress'|'Done'"),
                        )
                        .arg(Arg::new("actual").long("actual").required(true))
                        .arg(Arg::new("budget").long("budget").default_value("0"))
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("mode").long("mode").default_value(""))
                        .arg(Arg::new("platform").long("platform").default_value(""))
                        .arg(Arg::new("card").long("card").help("Credit card name, if any"))
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Edit the entry with this id in place"),
                        ),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a ledger entry")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(json_flags(sort_args(
                    Command::new("list")
                        .about("List ledger entries")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .value_parser(value_parser!(u32))
                                .requires("year")
                                .help("Calendar month 1-12"),
                        )
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .value_parser(value_parser!(i32))
                                .requires("month"),
                        )
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("status").long("status"))
                        .arg(Arg::new("search").long("search"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))),
        )
        .subcommand(json_flags(
            Command::new("summary")
                .about("Category totals and remaining balance for one month")
                .arg(
                    Arg::new("month")
                        .long("month")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .required(true)
                        .value_parser(value_parser!(i32)),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Export both collections")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("json")
                        .help("json | csv (csv writes CreditCards.csv and Transactions.csv)"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Replace both collections from an exported JSON document")
                .arg(Arg::new("path").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check the ledger for inconsistencies"))
}
