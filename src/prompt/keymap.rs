//! Terminal key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::Key;

/// What the prompt does with a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Forward to the engine
    Engine(Key),
    /// Append a character to the input
    Insert(char),
    /// Delete the last character
    Backspace,
    /// Erase the input and the selection
    ClearLine,
    /// Leave without a result
    Quit,
    /// Nothing to do
    Ignore,
}

/// Map a terminal key event to a prompt action
pub fn map_key(event: &KeyEvent) -> PromptAction {
    if !matches!(event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return PromptAction::Ignore;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('d') if ctrl => PromptAction::Quit,
        KeyCode::Char('u') if ctrl => PromptAction::ClearLine,
        KeyCode::Char('n') if ctrl => PromptAction::Engine(Key::Down),
        KeyCode::Char('p') if ctrl => PromptAction::Engine(Key::Up),
        KeyCode::Char(_) if ctrl || event.modifiers.contains(KeyModifiers::ALT) => {
            PromptAction::Ignore
        }
        KeyCode::Char(c) => PromptAction::Insert(c),
        KeyCode::Backspace => PromptAction::Backspace,
        KeyCode::Up => PromptAction::Engine(Key::Up),
        KeyCode::Down => PromptAction::Engine(Key::Down),
        KeyCode::Enter => PromptAction::Engine(Key::Enter),
        KeyCode::Tab => PromptAction::Engine(Key::Tab),
        KeyCode::Esc => PromptAction::Engine(Key::Escape),
        _ => PromptAction::Ignore,
    }
}
