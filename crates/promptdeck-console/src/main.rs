#![forbid(unsafe_code)]

//! PromptDeck console binary entry point.

mod app;
mod chrome;
mod cli;
mod error;
mod surface;
mod terminal;
mod theme;

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::error::ConsoleError;

fn main() {
    let opts = cli::Opts::parse();
    if let Err(e) = init_logging(&opts) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }
    if let Err(e) = app::App::new(&opts).run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}

/// Route tracing to the requested log file. With no file configured, events
/// are dropped: stdout belongs to the TUI.
fn init_logging(opts: &cli::Opts) -> Result<(), ConsoleError> {
    let Some(path) = &opts.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| ConsoleError::LogFile {
        path: path.clone(),
        source,
    })?;
    let filter = EnvFilter::try_from_env("PROMPTDECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
