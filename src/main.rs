//! Typeahead - interactive autocomplete prompt
//!
//! Hosts one autocomplete engine in the terminal: type to filter a list of
//! items, move through the suggestions with the arrow keys and pick one with
//! Enter. The result is printed to stdout so the prompt can be used in
//! shell pipelines; the prompt itself draws on stderr.
//!
//! # Usage
//!
//! ```bash
//! # Pick a US state
//! typeahead
//!
//! # Pick from a file, with a slow simulated lookup
//! typeahead --items fruits.txt --delay-ms 150 --latency-ms 300
//! ```

use std::fs::OpenOptions;
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use typeahead::cli::CliInterface;
use typeahead::engine::{Autocomplete, StaticListProvider};
use typeahead::error::{Result, TypeaheadError};
use typeahead::prompt::{Prompt, PromptOutcome, TerminalListRenderer, items};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the prompt
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli)?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli).await
}

/// Run the autocomplete prompt and print the result
async fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let items = items::load_items(cli.args().items.as_deref())?;
    info!(count = items.len(), "starting prompt");

    let provider = StaticListProvider::from_strings(items).with_latency(cli.latency());
    let (engine, notifications) =
        Autocomplete::with_display(cli.config().autocomplete.clone(), provider);
    let renderer = TerminalListRenderer::new(std::io::stderr(), &cli.config().display);
    let prompt = Prompt::new(engine, notifications, renderer, &cli.config().display);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    let ctrl_c_handle = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let outcome = prompt.run(shutdown).await;
    ctrl_c_handle.abort();

    match outcome? {
        PromptOutcome::Submitted { text, selected } => {
            info!(selected = selected.is_some(), "prompt submitted");
            println!("{}", selected.unwrap_or(text));
        }
        PromptOutcome::Cancelled => info!("prompt cancelled"),
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Logs go to stderr unless `logging.file_path` is set; with the prompt
/// drawing on stderr, a log file keeps debug output readable.
///
/// # Arguments
/// * `cli` - CLI interface with verbosity settings
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        logging.level.to_tracing_level()
    };

    let writer = match &logging.file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    TypeaheadError::Generic(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    // RUST_LOG, when set, overrides the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(logging.file_path.is_none())
        .with_writer(writer);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }

    Ok(())
}
