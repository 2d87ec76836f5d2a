// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use pocketbook::{Ledger, cli, commands, config::Config};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let level = matches
        .get_one::<String>("log-level")
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::WARN);
    init_logger(level);

    let config = Config::resolve(matches.get_one::<PathBuf>("data-dir").map(PathBuf::as_path))?;
    debug!(data_dir = %config.data_dir().display(), "resolved data dir");

    let storage = config.storage();
    match matches.subcommand() {
        Some(("init", _)) => {
            if !storage.path().exists() {
                storage.save(&Ledger::new())?;
            }
            println!("Wallet initialized at {}", storage.path().display());
        }
        Some(("task", sub)) => commands::tasks::handle(&config.task_storage(), sub)?,
        Some((name, sub)) => {
            // A malformed wallet file is an error here, never silently replaced.
            let mut ledger = storage.load()?;
            match name {
                "tx" => commands::transactions::handle(&mut ledger, &storage, sub)?,
                "category" => commands::categories::handle(&mut ledger, &storage, sub)?,
                "budget" => commands::budgets::handle(&mut ledger, &storage, sub)?,
                "report" => commands::reports::handle(&ledger, sub)?,
                "import" => commands::importer::handle(&mut ledger, &storage, sub)?,
                "export" => commands::exporter::handle(&ledger, sub)?,
                "doctor" => commands::doctor::handle(&ledger)?,
                _ => {}
            }
        }
        None => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), level)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
