//! Command-line interface for the typeahead demo
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Command-line overrides of configuration values
//! - The `version` and `config` subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{Config, LogLevel};
use crate::error::Result;

/// Interactive autocomplete prompt
#[derive(Parser, Debug)]
#[command(
    name = "typeahead",
    version,
    about = "Interactive autocomplete prompt",
    long_about = "Type to filter a list of items, pick one with the arrow keys and Enter.
The chosen item (or the typed text) is printed to stdout."
)]
pub struct CliArgs {
    /// File with the items to complete
    ///
    /// Either a JSON array of strings or one item per line.
    /// A list of US states is used when omitted.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub items: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Debounce delay in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Minimum query length before searching
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Maximum number of suggestions
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Simulated lookup latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Do not cache lookup results
    #[arg(long)]
    pub no_cache: bool,

    /// Highlight the first suggestion automatically
    #[arg(long)]
    pub autoselect: bool,

    /// Select a suggestion that exactly matches the typed text
    #[arg(long)]
    pub select_on_match: bool,

    /// Compare typed text with suggestions case-insensitively
    #[arg(long)]
    pub case_insensitive: bool,

    /// Only accept text that matches a selected suggestion
    #[arg(long)]
    pub require_match: bool,

    /// Show a message when nothing matches
    #[arg(long)]
    pub not_found: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for typeahead
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::from_args(args)
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Simulated lookup latency
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.args.latency_ms.unwrap_or(0))
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_engine_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    /// Apply autocomplete-related CLI arguments to configuration
    fn apply_engine_args(config: &mut Config, args: &CliArgs) {
        let engine = &mut config.autocomplete;

        if let Some(delay_ms) = args.delay_ms {
            engine.delay_ms = delay_ms;
        }
        if let Some(min_length) = args.min_length {
            engine.min_length = min_length;
        }
        if let Some(limit) = args.limit {
            engine.dropdown_items = Some(limit);
        }

        engine.no_cache |= args.no_cache;
        engine.autoselect |= args.autoselect;
        engine.select_on_match |= args.select_on_match;
        engine.match_case_insensitive |= args.case_insensitive;
        engine.require_match |= args.require_match;
        engine.not_found |= args.not_found;
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("typeahead version {}", crate::VERSION);
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(path.as_path())) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("# Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml_string()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print key help before the prompt starts
    pub fn print_banner(&self) {
        if !self.args.quiet {
            eprintln!("typeahead {}", crate::VERSION);
            eprintln!("Arrows move, Enter picks, Esc clears, Ctrl+U erases, Ctrl+C quits");
        }
    }
}
