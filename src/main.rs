//! Fair Split CLI
//!
//! Settles a CSV ledger of shared expenses, or maintains a stored group
//! snapshot one expense at a time.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- expenses.csv > report.csv
//! cargo run -- add group.json Alice 42.50 groceries
//! cargo run -- show group.json
//! cargo run -- reset group.json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use fair_split::{
    write_report, ExpenseEntry, GroupStore, JsonFileStore, Ledger, Report, Result, SplitError,
};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = args.split_first().ok_or(SplitError::MissingArgument)?;

    match command.as_str() {
        "add" => add(rest),
        "show" => show(rest),
        "reset" => reset(rest),
        path if !path.starts_with('-') => settle_file(path),
        other => Err(SplitError::UnknownCommand(other.to_string())),
    }
}

fn settle_file(input_path: &str) -> Result<()> {
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut ledger = Ledger::new();
    ledger.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    ledger.write_output(handle)?;

    Ok(())
}

fn add(args: &[String]) -> Result<()> {
    let [store_path, name, optional @ ..] = args else {
        return Err(SplitError::MissingArgument);
    };

    let entry = match optional {
        [] => None,
        [amount] => Some(ExpenseEntry::parse(amount, "")?),
        [amount, label, ..] => Some(ExpenseEntry::parse(amount, label.as_str())?),
    };

    let mut store = JsonFileStore::new(store_path);
    let mut group = store.load()?;
    if group.record(name, entry)? {
        info!("Added participant {}", name.trim());
    }
    store.save(&group)?;

    print_report(&Report::from_group(&group))
}

fn show(args: &[String]) -> Result<()> {
    let store_path = args.first().ok_or(SplitError::MissingArgument)?;
    let group = JsonFileStore::new(store_path).load()?;
    print_report(&Report::from_group(&group))
}

fn reset(args: &[String]) -> Result<()> {
    let store_path = args.first().ok_or(SplitError::MissingArgument)?;
    JsonFileStore::new(store_path).clear()?;
    info!("Cleared {}", store_path);
    Ok(())
}

fn print_report(report: &Report) -> Result<()> {
    let stdout = io::stdout();
    write_report(report, stdout.lock())
}
