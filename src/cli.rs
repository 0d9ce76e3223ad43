// Copyright (c) 2025 Dompet Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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

fn id_arg() -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help("Record id")
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .about("Personal finance tracker: accounts, expenses, income, transfers, budgets, analytics")
        .version(clap::crate_version!())
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage profiles")
                .subcommand(
                    Command::new("add")
                        .about("Create a profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(
                    Command::new("use")
                        .about("Switch the active profile")
                        .arg(Arg::new("name").required(true)),
                )
                .subcommand(Command::new("list").about("List profiles")),
        )
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
                                .required(true)
                                .help("checking|savings|credit|ewallet"),
                        )
                        .arg(Arg::new("bank").long("bank").default_value(""))
                        .arg(Arg::new("number").long("number").default_value(""))
                        .arg(
                            Arg::new("balance")
                                .long("balance")
                                .default_value("0")
                                .help("Opening balance"),
                        )
                        .arg(Arg::new("color").long("color").default_value("")),
                )
                .subcommand(json_flags(Command::new("list").about("List accounts")))
                .subcommand(
                    Command::new("close")
                        .about("Mark an account inactive")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(expense_fields(
                    Command::new("add").about("Record an expense"),
                ))
                .subcommand(expense_fields(
                    Command::new("edit").about("Edit an expense").arg(id_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an expense (refunds its account)")
                        .arg(id_arg()),
                )
                .subcommand(list_cmd("List expenses")),
        )
        .subcommand(
            Command::new("income")
                .about("Record and manage income")
                .subcommand(income_fields(Command::new("add").about("Record income")))
                .subcommand(income_fields(
                    Command::new("edit").about("Edit an income").arg(id_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete an income (reverses the credit)")
                        .arg(id_arg()),
                )
                .subcommand(list_cmd("List income")),
        )
        .subcommand(
            Command::new("transfer")
                .about("Move money between accounts")
                .subcommand(
                    Command::new("add")
                        .about("Record a transfer")
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("fee").long("fee").default_value("0"))
                        .arg(Arg::new("desc").long("desc").default_value(""))
                        .arg(Arg::new("date").long("date").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List transfers"))),
        )
        .subcommand(
            Command::new("budget")
                .about("Per-category spending limits")
                .subcommand(
                    Command::new("set")
                        .about("Set a category limit")
                        .arg(Arg::new("category").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("color").long("color")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category limit")
                        .arg(Arg::new("category").required(true)),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets"))),
        )
        .subcommand(
            Command::new("invest")
                .about("Track investments")
                .subcommand(invest_fields(
                    Command::new("add").about("Add an investment"),
                ))
                .subcommand(invest_fields(
                    Command::new("edit")
                        .about("Edit an investment")
                        .arg(id_arg()),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an investment")
                        .arg(id_arg()),
                )
                .subcommand(json_flags(Command::new("list").about("List investments"))),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics")
                .subcommand(json_flags(
                    Command::new("cashflow")
                        .about("Monthly income vs expenses with recurring projection")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32))
                                .default_value("6"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Category breakdown (sum/count/average/share)")
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .value_parser(value_parser!(u32))
                                .default_value("6"),
                        )
                        .arg(
                            Arg::new("income")
                                .long("income")
                                .action(ArgAction::SetTrue)
                                .help("Break down income instead of expenses"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("balances").about("Current account balances"),
                ))
                .subcommand(json_flags(
                    Command::new("budget")
                        .about("Budget utilization for a month")
                        .arg(Arg::new("month").long("month").help("YYYY-MM, default current")),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Export records")
                .subcommand(export_cmd("expenses"))
                .subcommand(export_cmd("incomes"))
                .subcommand(export_cmd("transfers")),
        )
}

fn list_cmd(about: &'static str) -> Command {
    json_flags(
        Command::new("list")
            .about(about)
            .arg(Arg::new("month").long("month").help("Filter by YYYY-MM"))
            .arg(Arg::new("category").long("category"))
            .arg(
                Arg::new("limit")
                    .long("limit")
                    .value_parser(value_parser!(usize)),
            ),
    )
}

fn expense_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("category").long("category").required(true))
        .arg(Arg::new("desc").long("desc").default_value(""))
        .arg(Arg::new("date").long("date").required(true))
        .arg(
            Arg::new("tags")
                .long("tags")
                .help("Comma-separated tags")
                .default_value(""),
        )
        .arg(Arg::new("account").long("account").help("Account name"))
}

fn income_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("amount").long("amount").required(true))
        .arg(Arg::new("source").long("source").required(true))
        .arg(Arg::new("category").long("category").required(true))
        .arg(Arg::new("desc").long("desc"))
        .arg(Arg::new("date").long("date").required(true))
        .arg(
            Arg::new("recurring")
                .long("recurring")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("frequency")
                .long("frequency")
                .help("weekly|bi-weekly|monthly|quarterly|yearly"),
        )
        .arg(Arg::new("account").long("account").help("Account name"))
}

fn invest_fields(cmd: Command) -> Command {
    cmd.arg(Arg::new("symbol").long("symbol").required(true))
        .arg(Arg::new("name").long("name").required(true))
        .arg(Arg::new("type").long("type").default_value("stock"))
        .arg(Arg::new("quantity").long("quantity").required(true))
        .arg(Arg::new("price").long("price").required(true))
        .arg(Arg::new("current").long("current").required(true))
        .arg(Arg::new("date").long("date").required(true))
}

fn export_cmd(name: &'static str) -> Command {
    Command::new(name)
        .about("Export to csv or json")
        .arg(Arg::new("format").long("format").default_value("csv"))
        .arg(Arg::new("out").long("out").required(true))
}
