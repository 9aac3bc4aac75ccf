mod args;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use expense_tracker_core::errors::CoreError;
use expense_tracker_core::logging;
use expense_tracker_core::models::settings::Settings;
use expense_tracker_core::models::view::{ListView, SummaryView};
use expense_tracker_core::storage::file::FileStore;
use expense_tracker_core::ExpenseTracker;

use args::Command;

const DATA_DIR_ENV: &str = "EXPENSES_DIR";
const APP_DIR_NAME: &str = "expense-tracker";
const SETTINGS_FILE: &str = "settings.json";

/// Shown for every rejected submission.
const INVALID_INPUT_NOTICE: &str = "Please fill out all fields correctly.";

fn main() -> ExitCode {
    logging::init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<CoreError>() {
            Some(core) if core.is_invalid_input() => {
                eprintln!("{INVALID_INPUT_NOTICE} ({core})");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run() -> Result<()> {
    let argv: Vec<String> = env::args().skip(1).collect();
    let command = args::parse(&argv)?;

    if command == Command::Help {
        println!("{}", args::USAGE);
        return Ok(());
    }

    let dir = data_dir()?;
    let settings = load_settings(&dir)?;
    debug!(dir = %dir.display(), "using data directory");

    let mut tracker = ExpenseTracker::open(FileStore::new(&dir), settings)
        .with_context(|| format!("failed to open ledger in {}", dir.display()))?;
    tracker.subscribe(Box::new(|list: &ListView, summary: &SummaryView| {
        print_list(list);
        println!();
        print_summary(summary);
    }));

    match command {
        Command::Add {
            amount,
            category,
            description,
        } => {
            tracker.submit(&amount, &category, &description)?;
        }
        Command::Delete { index } => {
            if tracker.delete(index)?.is_none() {
                println!("No expense at position {index}; nothing deleted.");
            }
        }
        Command::List => print_list(&tracker.views().list),
        Command::Summary => print_summary(&tracker.views().summary),
        Command::Help => println!("{}", args::USAGE),
    }

    Ok(())
}

fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir()
        .with_context(|| format!("no platform data directory; set {DATA_DIR_ENV}"))?;
    Ok(base.join(APP_DIR_NAME))
}

fn load_settings(dir: &Path) -> Result<Settings> {
    let path = dir.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let settings = Settings::from_json(&json)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(settings)
}

fn print_list(list: &ListView) {
    match list {
        ListView::Empty { placeholder } => println!("{placeholder}"),
        ListView::Items(items) => {
            for item in items {
                println!("[{}] {}", item.delete.index, item.line);
            }
        }
    }
}

fn print_summary(summary: &SummaryView) {
    match summary {
        SummaryView::Empty { placeholder } => println!("{placeholder}"),
        SummaryView::Totals {
            total_line,
            heading,
            category_lines,
        } => {
            println!("{total_line}");
            println!("{heading}");
            for line in category_lines {
                println!("  {line}");
            }
        }
    }
}
