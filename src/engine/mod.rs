//! Autocomplete interaction engine
//!
//! This module turns keystrokes in a text input into an ordered list of
//! suggestions, tracks which suggestion is highlighted and commits the chosen
//! one back to the host.
//!
//! # Architecture
//!
//! The engine is split into focused modules:
//! - `cache`: per-instance memo of query results
//! - `pipeline`: normalization, minimum length, debounce and stale-result discard
//! - `navigation`: dropdown open/close and highlight state machine
//! - `selection`: committed item, exact-match detection and require-match validity
//! - `provider`: the [`MatchProvider`] trait and closure adapters
//! - `facade`: [`Autocomplete`], which composes all of the above
//!
//! # Examples
//!
//! ```no_run
//! use typeahead::config::EngineConfig;
//! use typeahead::engine::{Autocomplete, Key, StaticListProvider};
//!
//! # async fn demo() {
//! let provider = StaticListProvider::from_strings(["Alabama", "Alaska", "Arizona"]);
//! let (mut engine, _notifications) =
//!     Autocomplete::with_display(EngineConfig::default(), provider);
//!
//! engine.focus();
//! engine.set_query("ala");
//! engine.settle().await;
//!
//! engine.handle_key(Key::Down);
//! engine.handle_key(Key::Enter);
//! assert_eq!(engine.selected_item().map(String::as_str), Some("Alabama"));
//! # }
//! ```

mod cache;
mod facade;
mod navigation;
mod pipeline;
mod provider;
mod selection;
mod state;

pub use facade::{Autocomplete, ExternalUpdate, ItemText, Notifications};
pub use provider::{
    AsyncFnProvider, MatchProvider, ProviderResult, StaticListProvider, SyncProvider, from_async_fn,
    from_fn, try_from_fn,
};
pub use state::{
    Direction, EngineState, Key, KeyOutcome, ListAction, ListRenderer, ListView, MatchSet,
    NavState, NavigationState, Notification,
};
