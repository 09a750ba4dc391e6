// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use utilshare::{cli, commands, db};

fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_max_level(if verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_logging(matches.get_flag("verbose"));

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let kv = db::open_or_init(&path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("calc", sub)) => commands::calc::handle(&kv, sub)?,
        Some(("save", sub)) => commands::save::handle(&kv, sub)?,
        Some(("share", sub)) => commands::share::handle(&kv, sub)?,
        Some(("history", sub)) => commands::history::handle(&kv, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&kv, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&kv)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
