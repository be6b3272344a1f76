//! Error handling for typeahead.
//!
//! The autocomplete engine degrades every failure to "no suggestions" plus an
//! observable notification, so errors here surface only from configuration
//! loading, item sources and the terminal host.
//!
//! # Example
//!
//! ```rust
//! use typeahead::error::{ProviderError, Result, TypeaheadError};
//!
//! fn lookup(query: &str) -> Result<Vec<String>> {
//!     if query.is_empty() {
//!         return Err(ProviderError::new("empty query").into());
//!     }
//!     Ok(vec![query.to_uppercase()])
//! }
//!
//! assert!(matches!(lookup(""), Err(TypeaheadError::Provider(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, ProviderError, Result, TypeaheadError};
