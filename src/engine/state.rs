//! Values exchanged between the engine, the host and the list renderer.

use crate::error::{ProviderError, Result};

/// Ordered result of one query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet<T> {
    /// Normalized query that produced the items
    pub query: String,
    /// Request sequence number; `0` for sets the engine built itself
    pub seq: u64,
    /// Candidate items in provider order
    pub items: Vec<T>,
}

impl<T> MatchSet<T> {
    /// Empty set for `query`
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            seq: 0,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Dropdown state as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    /// Dropdown hidden
    Closed,
    /// Dropdown shown, nothing highlighted
    OpenNoHighlight,
    /// Dropdown shown with the entry at the index highlighted
    OpenHighlighted(usize),
    /// Dropdown shown with no entries, only the not-found indicator
    OpenEmpty,
}

impl NavState {
    pub fn is_open(&self) -> bool {
        !matches!(self, NavState::Closed)
    }
}

/// Raw navigation fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub highlighted_index: Option<usize>,
    pub dropdown_visible: bool,
}

/// Read-only snapshot of an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineState<T> {
    pub query: String,
    pub matches: MatchSet<T>,
    pub navigation: NavigationState,
    pub nav_state: NavState,
    pub selected_item: Option<T>,
    pub loading: bool,
    pub not_found_visible: bool,
    pub match_valid: bool,
    pub focused: bool,
}

/// Change notifications delivered to the host.
///
/// Each variant fires once per committed change; identical successive values
/// are suppressed and host-originated updates are never echoed back.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T> {
    /// The query text changed
    QueryChanged(String),
    /// The selected item was committed or cleared
    SelectedItemChanged(Option<T>),
    /// The provider failed; the query was answered with an empty set
    ProviderFailed { query: String, error: ProviderError },
}

/// Highlight movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Tab,
    Escape,
}

/// What the host should do with a key after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not handled; perform the default action
    Ignored,
    /// Handled; suppress the default action
    Consumed,
    /// Handled, and the host should move focus away from the input
    Blur,
}

/// Events the list renderer reports back to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Pointer moved over the entry at the index
    Hover(usize),
    /// Entry at the index was clicked
    Click(usize),
    /// Pointer entered the dropdown
    PointerEnter,
    /// Pointer left the dropdown
    PointerLeave,
}

/// What a list renderer needs to draw the dropdown.
pub struct ListView<'a, T> {
    pub items: &'a [T],
    pub highlighted: Option<usize>,
    pub visible: bool,
    pub not_found_visible: bool,
    pub loading: bool,
    pub(crate) item_text: &'a (dyn Fn(&T) -> String + Send + Sync),
}

impl<T> ListView<'_, T> {
    /// Display text of an entry, as declared by the host
    pub fn text(&self, item: &T) -> String {
        (self.item_text)(item)
    }

    /// Whether anything should be drawn at all
    pub fn is_empty(&self) -> bool {
        !self.visible || (self.items.is_empty() && !self.not_found_visible)
    }
}

/// Presents the match list.
///
/// Implementations may render every entry or only a window of them; the
/// engine does not care which.
pub trait ListRenderer<T> {
    /// Draw the current list state
    fn render(&mut self, view: &ListView<'_, T>) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_match_set() {
        let set: MatchSet<String> = MatchSet::empty("al");
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.query, "al");
        assert_eq!(set.seq, 0);
    }

    #[test]
    fn test_nav_state_open() {
        assert!(!NavState::Closed.is_open());
        assert!(NavState::OpenEmpty.is_open());
        assert!(NavState::OpenHighlighted(2).is_open());
    }

    #[test]
    fn test_list_view_text_and_emptiness() {
        let items = vec![1u32, 22, 333];
        let to_text = |n: &u32| format!("#{n}");
        let view = ListView {
            items: &items,
            highlighted: Some(1),
            visible: true,
            not_found_visible: false,
            loading: false,
            item_text: &to_text,
        };
        assert_eq!(view.text(&items[1]), "#22");
        assert!(!view.is_empty());

        let hidden = ListView {
            visible: false,
            ..view
        };
        assert!(hidden.is_empty());
    }
}
