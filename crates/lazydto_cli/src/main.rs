//! CLI entry point for paging JSON array files.
//!
//! # Responsibility
//! - Load a JSON array through a synced list and print one page of it.
//! - Keep output machine-readable (one JSON document per invocation).

use clap::{Parser, Subcommand};
use lazydto_core::{init_logging, LoggingConfig, PagedList, SyncedList};
use log::error;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(name = "lazydto", version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Log level: trace|debug|info|warn|error.
    #[clap(long, global = true, default_value = "warn")]
    log_level: String,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of a JSON array file
    Page {
        /// Path to a file holding a JSON array
        file: PathBuf,
        /// Zero-based page index
        #[clap(long, default_value_t = 0)]
        page: usize,
        /// Items per page
        #[clap(long, default_value_t = 10)]
        size: usize,
        /// Attribute to sort by before paging (dotted paths allowed)
        #[clap(long)]
        sort: Option<String>,
        /// Sort descending
        #[clap(long)]
        desc: bool,
    },
    /// Print the core crate version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = LoggingConfig {
        level: cli.log_level.clone(),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&config) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<Value, String> {
    match command {
        Command::Page {
            file,
            page,
            size,
            sort,
            desc,
        } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|err| format!("failed to read `{}`: {err}", file.display()))?;
            let mut list = SyncedList::<Value>::from_text(text);
            let mut paged = PagedList::from_list(&mut list, page, size).map_err(|err| err.to_string())?;
            if let Some(key) = sort.as_deref() {
                paged.reorder_items(key, desc, None);
            }
            let items = paged
                .paged_items(None, None)
                .map_err(|err| err.to_string())?
                .to_vec();
            Ok(json!({
                "items": items,
                "page": paged.page_info(),
            }))
        }
        Command::Version => Ok(json!({ "version": lazydto_core::core_version() })),
    }
}
