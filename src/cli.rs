// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn category_arg() -> Arg {
    Arg::new("category")
        .long("category")
        .short('c')
        .help("electricity | water")
        .default_value("electricity")
}

fn reading_args(cmd: Command) -> Command {
    cmd.arg(category_arg())
        .arg(
            Arg::new("current")
                .long("current")
                .help("Current meter reading"),
        )
        .arg(
            Arg::new("major-usage")
                .long("major-usage")
                .help("Total usage on the shared meter"),
        )
        .arg(
            Arg::new("major-bill")
                .long("major-bill")
                .help("Total amount of the shared bill"),
        )
}

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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("utilshare")
        .version(crate_version!())
        .about("Split electricity and water bills from your own meter readings")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Database file (defaults to $UTILSHARE_DB or the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug output to stderr"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(json_flags(reading_args(
            Command::new("calc").about("Compute consumption and sub-bill against the saved reading"),
        )))
        .subcommand(reading_args(
            Command::new("save").about("Save the current reading and its sub-bill to history"),
        ))
        .subcommand(reading_args(
            Command::new("share").about("Print the sub-bill as shareable text"),
        ))
        .subcommand(json_flags(
            Command::new("history")
                .about("Show saved entries, newest first")
                .arg(category_arg()),
        ))
        .subcommand(
            Command::new("export")
                .about("Write history to a file")
                .arg(category_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .help("csv | json")
                        .default_value("csv"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(Command::new("doctor").about("Check stored readings for corruption"))
}
