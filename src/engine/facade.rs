//! Engine façade - the public contract of one autocomplete instance
//!
//! The façade owns the cache, the query pipeline, the navigation machine and
//! the selection resolver, and serializes every transition through `&mut
//! self`. Timers and provider calls run as tokio tasks; they post their
//! outcome into a channel owned by the instance and the host applies those
//! posts with [`Autocomplete::process_pending`], [`Autocomplete::tick`] or
//! [`Autocomplete::settle`]. Transitions are therefore applied in the order
//! the host accepts them, never concurrently.
//!
//! Methods that schedule work (`set_query`, `focus`, `external_update`) must
//! be called from within a tokio runtime.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace, warn};
use uuid::Uuid;

use super::cache::MatchCache;
use super::navigation::{NavContext, Navigation};
use super::pipeline::{QueryPipeline, Transition};
use super::provider::MatchProvider;
use super::selection::SelectionResolver;
use super::state::{
    Direction, EngineState, Key, KeyOutcome, ListAction, ListView, MatchSet, NavState,
    Notification,
};
use crate::config::{EngineConfig, EscapeOptions};

/// Converts an item to the text shown in the input after selection
pub type ItemText<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Receiving end of an engine's notifications
pub type Notifications<T> = UnboundedReceiver<Notification<T>>;

/// Host-side writes to the state shared with the engine.
///
/// `None` leaves a value untouched; `selected_item: Some(None)` clears the
/// selection.
#[derive(Debug, Clone)]
pub struct ExternalUpdate<T> {
    pub query: Option<String>,
    pub selected_item: Option<Option<T>>,
}

impl<T> Default for ExternalUpdate<T> {
    fn default() -> Self {
        Self {
            query: None,
            selected_item: None,
        }
    }
}

/// One autocomplete instance
pub struct Autocomplete<T> {
    id: Uuid,
    config: EngineConfig,
    escape: EscapeOptions,
    item_limit: Option<usize>,
    provider: Arc<dyn MatchProvider<T>>,
    item_text: ItemText<T>,
    cache: MatchCache<T>,
    pipeline: QueryPipeline,
    navigation: Navigation,
    selection: SelectionResolver<T>,
    query: String,
    matches: MatchSet<T>,
    focused: bool,
    pointer_in_list: bool,
    disabled: bool,
    transitions_tx: UnboundedSender<Transition<T>>,
    transitions_rx: UnboundedReceiver<Transition<T>>,
    notifications: UnboundedSender<Notification<T>>,
}

/// Construction.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create an engine and the receiver for its notifications
    ///
    /// # Arguments
    /// * `config` - Options for this instance; invalid values fall back to defaults
    /// * `provider` - Source of matches
    /// * `item_text` - Display text of an item
    pub fn new<P, F>(config: EngineConfig, provider: P, item_text: F) -> (Self, Notifications<T>)
    where
        P: MatchProvider<T> + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::with_shared(config, Arc::new(provider), Arc::new(item_text))
    }

    /// Create an engine around an already shared provider
    pub fn with_shared(
        config: EngineConfig,
        provider: Arc<dyn MatchProvider<T>>,
        item_text: ItemText<T>,
    ) -> (Self, Notifications<T>) {
        let (transitions_tx, transitions_rx) = mpsc::unbounded_channel();
        let (notifications, receiver) = mpsc::unbounded_channel();

        let engine = Self {
            id: Uuid::new_v4(),
            escape: config.escape(),
            item_limit: config.item_limit(),
            cache: MatchCache::new(!config.no_cache),
            pipeline: QueryPipeline::new(&config),
            navigation: Navigation::new(),
            selection: SelectionResolver::new(config.match_case_insensitive, config.require_match),
            query: String::new(),
            matches: MatchSet::empty(""),
            focused: false,
            pointer_in_list: false,
            disabled: false,
            provider,
            item_text,
            config,
            transitions_tx,
            transitions_rx,
            notifications,
        };
        debug!(id = %engine.id, "autocomplete engine created");

        (engine, receiver)
    }

    /// Create an engine for items that display themselves
    pub fn with_display<P>(config: EngineConfig, provider: P) -> (Self, Notifications<T>)
    where
        P: MatchProvider<T> + 'static,
        T: fmt::Display,
    {
        Self::new(config, provider, |item: &T| item.to_string())
    }
}

/// Input operations.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// The user changed the input text
    pub fn set_query(&mut self, raw: &str) {
        let query = self.pipeline.normalize(raw);
        if query == self.query {
            return;
        }

        trace!(%query, "query changed");
        self.query = query.clone();
        self.emit(Notification::QueryChanged(query));
        self.on_query_changed();
    }

    /// The input gained focus
    pub fn focus(&mut self) {
        self.focused = true;

        if self.disabled
            || self.has_committed_selection()
            || !self.pipeline.meets_min_length(&self.query)
            || self.pipeline.is_busy()
        {
            return;
        }

        if self.matches.query == self.query && self.matches.seq != 0 {
            let ctx = self.nav_context();
            self.navigation.reopen(ctx);
        } else {
            self.fetch(self.query.clone());
        }
    }

    /// The input lost focus
    ///
    /// A blur caused by pressing on the dropdown keeps it open so the click
    /// can land.
    pub fn blur(&mut self) {
        self.focused = false;
        if !self.pointer_in_list {
            self.navigation.close();
        }
    }

    /// Handle a key pressed in the input
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.disabled {
            return KeyOutcome::Ignored;
        }

        match key {
            Key::Down => {
                if self.matches.is_empty() {
                    return KeyOutcome::Ignored;
                }
                self.navigate(Direction::Down);
                KeyOutcome::Consumed
            }
            Key::Up => {
                if !self.navigation.is_visible() {
                    return KeyOutcome::Ignored;
                }
                self.navigate(Direction::Up);
                KeyOutcome::Consumed
            }
            Key::Enter => {
                if self.commit_highlighted() {
                    KeyOutcome::Consumed
                } else {
                    KeyOutcome::Ignored
                }
            }
            Key::Tab => {
                // Focus still moves on
                self.commit_highlighted();
                KeyOutcome::Ignored
            }
            Key::Escape => self.escape(),
        }
    }

    /// Move the highlight; returns whether it moved
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.navigation.navigate(direction)
    }

    /// Apply an event reported by the list renderer
    pub fn apply_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::Hover(index) => {
                self.navigation.hover(index);
            }
            ListAction::Click(index) => {
                self.commit_at(index);
            }
            ListAction::PointerEnter => self.pointer_in_list = true,
            ListAction::PointerLeave => {
                self.pointer_in_list = false;
                if !self.focused {
                    self.navigation.close();
                }
            }
        }
    }

    /// Fold host-side writes to the query or selected item back in
    ///
    /// Host writes are authoritative and are not echoed as notifications.
    /// Clearing both values resets the engine to its initial state.
    pub fn external_update(&mut self, update: ExternalUpdate<T>) {
        if let Some(selected) = update.selected_item {
            if self.selection.set(selected) {
                debug!("selected item replaced by host");
            }
        }

        let mut query_changed = false;
        if let Some(raw) = update.query {
            let query = self.pipeline.normalize(&raw);
            if query != self.query {
                debug!(%query, "query replaced by host");
                self.query = query;
                query_changed = true;
            }
        }

        if self.query.is_empty() && self.selection.selected().is_none() {
            self.reset();
            return;
        }

        if query_changed {
            self.on_query_changed();
        }
    }

    /// Enable or disable the input
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.pipeline.cancel();
            self.navigation.close();
        }
    }

    /// Forget every cached result
    pub fn clear_cache(&mut self) {
        if self.cache.is_empty() {
            return;
        }
        debug!(entries = self.cache.len(), "match cache cleared");
        self.cache.clear();
    }
}

/// Selection operations.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Commit the highlighted entry; false when nothing is highlighted
    pub fn commit_highlighted(&mut self) -> bool {
        match self.navigation.state() {
            NavState::OpenHighlighted(index) => self.commit_at(index),
            _ => false,
        }
    }

    /// Commit the entry at `index`; false when out of range
    pub fn commit_at(&mut self, index: usize) -> bool {
        match self.matches.items.get(index).cloned() {
            Some(item) => {
                self.commit(item);
                true
            }
            None => false,
        }
    }

    /// Make `item` the selected item and show its text in the input
    pub fn commit(&mut self, item: T) {
        let text = (self.item_text)(&item);
        debug!(%text, "item committed");

        self.pipeline.cancel();
        if self.selection.set(Some(item.clone())) {
            self.emit(Notification::SelectedItemChanged(Some(item)));
        }
        if text != self.query {
            self.query = text.clone();
            self.emit(Notification::QueryChanged(text));
        }
        // The list belonged to the text that was replaced
        self.matches = MatchSet::empty(self.query.clone());
        self.navigation.reset();
    }

    /// Clear the query and the selected item together
    pub fn clear(&mut self) {
        if self.selection.set(None) {
            self.emit(Notification::SelectedItemChanged(None));
        }
        if !self.query.is_empty() {
            self.query.clear();
            self.emit(Notification::QueryChanged(String::new()));
        }
        self.reset();
    }
}

/// Driving asynchronous work.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Apply every transition posted so far without waiting
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(transition) = self.transitions_rx.try_recv() {
            self.apply(transition);
            applied += 1;
        }
        applied
    }

    /// Wait for the next posted transition and apply it
    ///
    /// Cancel-safe, so it can sit in a `tokio::select!` next to input events.
    /// Never completes while nothing is outstanding.
    pub async fn tick(&mut self) {
        if let Some(transition) = self.transitions_rx.recv().await {
            self.apply(transition);
        }
    }

    /// Apply transitions until no timer or wanted request is outstanding
    ///
    /// A provider that never settles keeps this pending forever.
    pub async fn settle(&mut self) {
        while self.pipeline.is_busy() {
            self.tick().await;
        }
        self.process_pending();
    }

    /// Whether a debounce timer or a provider request is outstanding
    pub fn is_busy(&self) -> bool {
        self.pipeline.is_busy()
    }
}

/// Read access.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Snapshot of everything a host or renderer may need
    pub fn current_state(&self) -> EngineState<T> {
        EngineState {
            query: self.query.clone(),
            matches: self.matches.clone(),
            navigation: self.navigation.snapshot(),
            nav_state: self.navigation.state(),
            selected_item: self.selection.selected().cloned(),
            loading: self.pipeline.is_loading(),
            not_found_visible: self.not_found_visible(),
            match_valid: self.is_match_valid(),
            focused: self.focused,
        }
    }

    /// What the list renderer draws
    pub fn list_view(&self) -> ListView<'_, T> {
        ListView {
            items: &self.matches.items,
            highlighted: self.navigation.highlighted(),
            visible: self.navigation.is_visible(),
            not_found_visible: self.not_found_visible(),
            loading: self.pipeline.is_loading(),
            item_text: &*self.item_text,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &MatchSet<T> {
        &self.matches
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.selection.selected()
    }

    pub fn nav_state(&self) -> NavState {
        self.navigation.state()
    }

    pub fn is_loading(&self) -> bool {
        self.pipeline.is_loading()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Require-match validity for the host's form validation
    pub fn is_match_valid(&self) -> bool {
        self.selection.is_valid(&self.query, &*self.item_text)
    }

    /// Whether the renderer should show the not-found indicator
    pub fn not_found_visible(&self) -> bool {
        if !self.not_found_eligible() || !self.navigation.is_visible() {
            return false;
        }
        if self.matches.is_empty() {
            return true;
        }
        self.config.show_not_complete
            && !self.query.is_empty()
            && !self
                .matches
                .items
                .iter()
                .any(|item| self.selection.text_matches(&(self.item_text)(item), &self.query))
    }

    /// Instance identifier, stable for the engine's lifetime
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Element id of the dropdown list
    pub fn listbox_id(&self) -> String {
        format!("ul-{}", self.id)
    }

    /// Element id of the entry at `index`
    pub fn option_id(&self, index: usize) -> String {
        format!("option-{}-{}", self.id, index)
    }

    /// Element id of the highlighted entry while the dropdown is open
    pub fn active_option_id(&self) -> Option<String> {
        self.navigation.highlighted().map(|i| self.option_id(i))
    }
}

/// Internal transitions.
impl<T> Autocomplete<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    fn on_query_changed(&mut self) {
        self.pipeline.invalidate();

        if self.disabled {
            self.pipeline.cancel();
            return;
        }

        if !self.pipeline.meets_min_length(&self.query) {
            self.pipeline.cancel();
            self.matches = MatchSet::empty(self.query.clone());
            self.navigation.reset();
            return;
        }

        self.pipeline
            .schedule(self.query.clone(), &self.transitions_tx);
    }

    fn fetch(&mut self, query: String) {
        if let Some(cached) = self.cache.get(&query) {
            debug!(%query, "serving matches from cache");
            let set = cached.clone();
            self.pipeline.invalidate();
            self.deliver(set);
            return;
        }

        let seq = self.pipeline.dispatch(
            Arc::clone(&self.provider),
            query.clone(),
            &self.transitions_tx,
        );
        debug!(seq, %query, "provider request issued");
    }

    fn apply(&mut self, transition: Transition<T>) {
        match transition {
            Transition::DebounceElapsed { generation, query } => {
                if self.pipeline.accept_debounce(generation) {
                    self.fetch(query);
                }
            }
            Transition::Resolved { seq, query, result } => {
                if !self.pipeline.accept_result(seq) {
                    trace!(seq, %query, "stale result discarded");
                    return;
                }

                match result {
                    Ok(items) => {
                        let set = MatchSet { query, seq, items };
                        if self.cache.is_enabled() {
                            self.cache.put(set.query.clone(), set.clone());
                        }
                        self.deliver(set);
                    }
                    Err(error) => {
                        warn!(seq, %query, %error, "match provider failed");
                        self.emit(Notification::ProviderFailed {
                            query: query.clone(),
                            error,
                        });
                        self.deliver(MatchSet {
                            query,
                            seq,
                            items: Vec::new(),
                        });
                    }
                }
            }
        }
    }

    fn deliver(&mut self, mut set: MatchSet<T>) {
        if let Some(limit) = self.item_limit {
            set.items.truncate(limit);
        }
        debug!(query = %set.query, seq = set.seq, count = set.len(), "matches delivered");

        self.matches = set;
        let ctx = self.nav_context();
        self.navigation.on_matches_changed(self.matches.len(), ctx);

        if self.config.select_on_match {
            let exact = self.selection.evaluate_auto_match(
                &self.matches.items,
                &self.query,
                &*self.item_text,
            );
            if let Some(index) = exact {
                debug!("exact match auto-committed");
                self.commit_at(index);
            }
        }
    }

    fn escape(&mut self) -> KeyOutcome {
        if self.escape.is_none() {
            return KeyOutcome::Ignored;
        }

        self.pipeline.cancel();
        if self.escape.clear {
            self.clear();
        }
        self.navigation.close();

        if self.escape.blur {
            self.focused = false;
            self.pointer_in_list = false;
            KeyOutcome::Blur
        } else {
            KeyOutcome::Consumed
        }
    }

    fn reset(&mut self) {
        self.pipeline.cancel();
        self.matches = MatchSet::empty(self.query.clone());
        self.navigation.reset();
    }

    fn nav_context(&self) -> NavContext {
        NavContext {
            focused: self.focused && !self.disabled,
            autoselect: self.config.autoselect,
            not_found_eligible: self.not_found_eligible(),
        }
    }

    /// Not-found may show: nothing loading, query long enough and the input
    /// not showing a committed selection
    fn not_found_eligible(&self) -> bool {
        self.config.not_found
            && !self.pipeline.is_loading()
            && self.pipeline.meets_min_length(&self.query)
            && !self.has_committed_selection()
    }

    /// The input shows exactly the text of the selected item
    fn has_committed_selection(&self) -> bool {
        self.selection
            .selected()
            .is_some_and(|item| (self.item_text)(item) == self.query)
    }

    fn emit(&self, notification: Notification<T>) {
        // The host may have dropped its receiver; that only mutes notifications
        let _ = self.notifications.send(notification);
    }
}
