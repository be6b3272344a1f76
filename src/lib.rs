//! Typeahead Library
//!
//! A headless autocomplete engine: it turns keystrokes into debounced,
//! optionally cached lookups, discards stale results, tracks the highlighted
//! suggestion and resolves selections. Drawing the list is left to a
//! [`engine::ListRenderer`] supplied by the host.
//!
//! # Modules
//!
//! - `cli`: Command-line interface of the demo binary
//! - `config`: Configuration management
//! - `engine`: The autocomplete engine
//! - `error`: Error types and handling
//! - `prompt`: Terminal prompt hosting an engine
//!
//! # Example
//!
//! ```no_run
//! use typeahead::config::EngineConfig;
//! use typeahead::engine::{Autocomplete, Notification, StaticListProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = StaticListProvider::from_strings(["Oregon", "Ohio", "Oklahoma"]);
//!     let (mut engine, mut notifications) =
//!         Autocomplete::with_display(EngineConfig::default(), provider);
//!
//!     engine.focus();
//!     engine.set_query("o");
//!     engine.settle().await;
//!     engine.commit_at(1);
//!
//!     while let Ok(notification) = notifications.try_recv() {
//!         if let Notification::SelectedItemChanged(item) = notification {
//!             println!("selected {:?}", item);
//!         }
//!     }
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod prompt;

// Re-export commonly used types
pub use config::{Config, EngineConfig};
pub use engine::{Autocomplete, MatchProvider};
pub use error::{Result, TypeaheadError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
