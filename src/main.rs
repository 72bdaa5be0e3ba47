use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use clap::Parser;
use foobs::cli::commands::Cli;
use foobs::cli::handlers;
use foobs::io::{config_io, paths};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

fn main() {
    let cli = Cli::parse();
    let config = config_io::load_config(&paths::config_path());
    init_logging(&config.log.level);
    log::info!("foobs {} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        // No subcommand → launch TUI
        None => handlers::resolve_store(cli.store.as_deref())
            .and_then(|store| foobs::tui::run(store, config)),
        Some(_) => handlers::dispatch(cli),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// The log starts over once it grows past this size.
const MAX_LOG_BYTES: u64 = 1024 * 1024;

/// Log to a file next to the config; the TUI owns the terminal.
fn init_logging(level: &str) {
    let level = level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);
    if level == LevelFilter::Off {
        return;
    }

    let log_path = paths::log_path();
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = open_log_file(&log_path, MAX_LOG_BYTES) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}

/// Open the log for appending, truncating it first when it exceeds `max_bytes`.
fn open_log_file(path: &Path, max_bytes: u64) -> io::Result<File> {
    let oversized = fs::metadata(path).is_ok_and(|m| m.len() > max_bytes);
    let mut options = OpenOptions::new();
    options.create(true);
    if oversized {
        options.write(true).truncate(true);
    } else {
        options.append(true);
    }
    options.open(path)
}
