//! Command-line client for a local record store.
//!
//! # Responsibility
//! - Verify `recordstore_core` linkage (`ping`).
//! - Drive list/add/remove against a SQLite file without the HTTP server.

use clap::{Parser, Subcommand};
use recordstore_core::db::open_db;
use recordstore_core::{
    core_version, init_logging, ping, with_record_service, Access, Config, Record, RecordDraft,
    RecordId,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "recordstore", version, about = "Manage a local todo record store")]
struct Cli {
    /// SQLite file to operate on.
    #[arg(long, env = "RECORDSTORE_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print core linkage info.
    Ping,
    /// List every record.
    List,
    /// Add a record and print the updated list.
    Add {
        text: String,
        #[arg(long)]
        done: bool,
    },
    /// Remove a record by id and print the updated list.
    Remove { id: RecordId },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Ping = cli.command {
        println!("recordstore_core ping={}", ping());
        println!("recordstore_core version={}", core_version());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(records) => {
            print_records(&records);
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("recordstore: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<Vec<Record>, String> {
    let mut config = Config::load_without_listener().map_err(|err| err.to_string())?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    init_logging(&config.log_level, &config.log_dir, "cli")?;

    let mut conn = open_db(&config.db_path).map_err(|err| err.to_string())?;
    let result = match cli.command {
        Command::Ping | Command::List => {
            with_record_service(&mut conn, Access::Read, |service| service.list_all())
        }
        Command::Add { text, done } => {
            let draft = RecordDraft {
                text: Some(text),
                done: Some(done),
            };
            with_record_service(&mut conn, Access::Write, |service| service.create(&draft))
        }
        Command::Remove { id } => {
            with_record_service(&mut conn, Access::Write, |service| service.delete(id))
        }
    };

    result.map_err(|err| err.to_string())
}

fn print_records(records: &[Record]) {
    if records.is_empty() {
        println!("(no records)");
        return;
    }
    for record in records {
        let mark = if record.done { "x" } else { " " };
        println!("{:>4} [{mark}] {}", record.id, record.text);
    }
}
