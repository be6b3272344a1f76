//! Dropdown navigation state machine
//!
//! Tracks the highlighted entry and whether the dropdown is shown. The
//! machine never looks at the items themselves, only at how many there are;
//! the façade supplies the facts it cannot know (focus, not-found
//! eligibility) through [`NavContext`].
//!
//! Invariant: `highlighted` is `None` or a valid index into the current
//! match list.

use super::state::{Direction, NavState, NavigationState};

/// Facts about the surrounding engine used for open/close decisions
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NavContext {
    /// Input currently has focus
    pub focused: bool,
    /// Highlight the first entry when a list opens
    pub autoselect: bool,
    /// An empty list may be shown with the not-found indicator
    pub not_found_eligible: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Navigation {
    highlighted: Option<usize>,
    visible: bool,
    len: usize,
}

impl Navigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new match list of `len` entries replaced the previous one
    pub fn on_matches_changed(&mut self, len: usize, ctx: NavContext) {
        self.len = len;
        self.highlighted = if ctx.autoselect && len > 0 {
            Some(0)
        } else {
            None
        };
        self.visible = ctx.focused && (len > 0 || ctx.not_found_eligible);
    }

    /// Show the current list again without touching the highlight
    pub fn reopen(&mut self, ctx: NavContext) {
        self.visible = ctx.focused && (self.len > 0 || ctx.not_found_eligible);
    }

    /// Hide the dropdown
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Hide the dropdown and forget the list
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Move the highlight; returns whether anything changed
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let before = *self;
        match direction {
            Direction::Down => self.move_down(),
            Direction::Up => self.move_up(),
        }
        before != *self
    }

    fn move_down(&mut self) {
        if self.len == 0 {
            return;
        }
        let last = self.len - 1;
        self.highlighted = match (self.visible, self.highlighted) {
            (true, Some(i)) => Some((i + 1).min(last)),
            _ => Some(0),
        };
        self.visible = true;
    }

    fn move_up(&mut self) {
        if !self.visible {
            return;
        }
        self.highlighted = match self.highlighted {
            Some(0) | None => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Pointer hovers over entry `index`
    pub fn hover(&mut self, index: usize) -> bool {
        if !self.visible || index >= self.len || self.highlighted == Some(index) {
            return false;
        }
        self.highlighted = Some(index);
        true
    }

    pub fn highlighted(&self) -> Option<usize> {
        if self.visible { self.highlighted } else { None }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn state(&self) -> NavState {
        match (self.visible, self.len, self.highlighted) {
            (false, _, _) => NavState::Closed,
            (true, 0, _) => NavState::OpenEmpty,
            (true, _, Some(i)) => NavState::OpenHighlighted(i),
            (true, _, None) => NavState::OpenNoHighlight,
        }
    }

    pub fn snapshot(&self) -> NavigationState {
        NavigationState {
            highlighted_index: self.highlighted(),
            dropdown_visible: self.visible,
        }
    }
}
