//! Interactive terminal prompt hosting one autocomplete engine
//!
//! The prompt owns the input line and forwards edits and keys to the engine.
//! Terminal events are read on a blocking task and handed over through a
//! channel, so the main loop can wait on input and on engine work at once.

pub mod items;
pub mod keymap;
pub mod renderer;

use std::io::{self, Stderr, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use nu_ansi_term::Color;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::DisplayConfig;
use crate::engine::{Autocomplete, Key, KeyOutcome, ListRenderer, Notification, Notifications};
use crate::error::Result;
use keymap::PromptAction;

pub use renderer::TerminalListRenderer;

const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a prompt session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Enter on valid input
    Submitted {
        text: String,
        selected: Option<String>,
    },
    /// Ctrl+C, Ctrl+D or shutdown
    Cancelled,
}

/// Terminal prompt
pub struct Prompt<R> {
    engine: Autocomplete<String>,
    notifications: Notifications<String>,
    renderer: R,
    prompt: String,
    color: bool,
    /// Text as typed; the engine holds its normalized form
    input: String,
    /// Engine query the input was last synchronized with
    synced_query: String,
}

impl<R> Prompt<R>
where
    R: ListRenderer<String>,
{
    pub fn new(
        engine: Autocomplete<String>,
        notifications: Notifications<String>,
        renderer: R,
        display: &DisplayConfig,
    ) -> Self {
        Self {
            engine,
            notifications,
            renderer,
            prompt: display.prompt.clone(),
            color: display.color_output,
            input: String::new(),
            synced_query: String::new(),
        }
    }

    /// Run until the user submits or quits, or `shutdown` is cancelled
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<PromptOutcome> {
        let mut out = io::stderr();
        let raw = RawModeGuard::enable()?;
        let (tx, mut events) = mpsc::unbounded_channel();
        let reader = spawn_event_reader(tx, shutdown.clone());

        self.engine.focus();
        self.draw(&mut out)?;

        let result: Result<PromptOutcome> = loop {
            tokio::select! {
                _ = shutdown.cancelled() => break Ok(PromptOutcome::Cancelled),
                event = events.recv() => {
                    let event = match event {
                        Some(Ok(event)) => event,
                        Some(Err(e)) => break Err(e.into()),
                        None => break Ok(PromptOutcome::Cancelled),
                    };
                    if let Some(outcome) = self.handle_event(event) {
                        break Ok(outcome);
                    }
                }
                _ = self.engine.tick() => {}
            }

            self.engine.process_pending();
            self.after_update();
            if let Err(e) = self.draw(&mut out) {
                break Err(e);
            }
        };

        shutdown.cancel();
        let _ = reader.await;
        self.finish(&mut out)?;
        drop(raw);

        result
    }

    fn handle_event(&mut self, event: Event) -> Option<PromptOutcome> {
        match event {
            Event::Key(key) => self.handle_key_event(&key),
            Event::FocusGained => {
                self.engine.focus();
                None
            }
            Event::FocusLost => {
                self.engine.blur();
                None
            }
            _ => None,
        }
    }

    fn handle_key_event(&mut self, key: &KeyEvent) -> Option<PromptOutcome> {
        let action = keymap::map_key(key);
        trace!(?action, "key pressed");
        self.apply(action)
    }

    /// Apply one prompt action; returns the outcome when the session ends
    fn apply(&mut self, action: PromptAction) -> Option<PromptOutcome> {
        match action {
            PromptAction::Quit => return Some(PromptOutcome::Cancelled),
            PromptAction::Ignore => {}
            PromptAction::Insert(c) => {
                self.refocus();
                self.input.push(c);
                self.engine.set_query(&self.input);
            }
            PromptAction::Backspace => {
                self.refocus();
                self.input.pop();
                self.engine.set_query(&self.input);
            }
            PromptAction::ClearLine => {
                self.input.clear();
                self.engine.clear();
            }
            PromptAction::Engine(Key::Escape) => {
                self.engine.handle_key(Key::Escape);
            }
            PromptAction::Engine(key) => {
                self.refocus();
                let outcome = self.engine.handle_key(key);
                if key == Key::Enter && outcome == KeyOutcome::Ignored {
                    return self.submit();
                }
            }
        }

        self.after_update();
        None
    }

    /// Enter that the engine did not consume accepts the input
    fn submit(&mut self) -> Option<PromptOutcome> {
        self.after_update();
        if !self.engine.is_match_valid() {
            debug!(query = self.engine.query(), "input rejected, no matching item selected");
            return None;
        }

        Some(PromptOutcome::Submitted {
            text: self.engine.query().to_string(),
            selected: self.engine.selected_item().cloned(),
        })
    }

    fn refocus(&mut self) {
        if !self.engine.is_focused() {
            self.engine.focus();
        }
    }

    /// Pick up engine-side query changes and log notifications
    fn after_update(&mut self) {
        while let Ok(notification) = self.notifications.try_recv() {
            match notification {
                Notification::QueryChanged(query) => trace!(%query, "query changed"),
                Notification::SelectedItemChanged(item) => debug!(?item, "selection changed"),
                Notification::ProviderFailed { query, error } => {
                    debug!(%query, %error, "lookup failed")
                }
            }
        }

        // Commit and clear rewrite the query; typed text is kept otherwise
        if self.engine.query() != self.synced_query {
            if self.engine.query() != self.typed_query() {
                self.input = self.engine.query().to_string();
            }
            self.synced_query = self.engine.query().to_string();
        }
    }

    /// The typed text as the engine would normalize it
    fn typed_query(&self) -> &str {
        if self.engine.config().trim {
            self.input.trim()
        } else {
            &self.input
        }
    }

    fn draw(&mut self, out: &mut Stderr) -> Result<()> {
        let prompt = if self.color {
            Color::Green.bold().paint(&self.prompt).to_string()
        } else {
            self.prompt.clone()
        };
        let input = if self.color && !self.engine.is_match_valid() {
            Color::Red.paint(&self.input).to_string()
        } else {
            self.input.clone()
        };

        queue!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(prompt),
            Print(input)
        )?;
        out.flush()?;

        self.renderer.render(&self.engine.list_view())?;

        let column = self.prompt.chars().count() + self.input.chars().count();
        queue!(out, cursor::MoveToColumn(column as u16))?;
        out.flush()?;

        Ok(())
    }

    fn finish(&mut self, out: &mut Stderr) -> Result<()> {
        queue!(
            out,
            cursor::MoveToColumn(0),
            Clear(ClearType::FromCursorDown),
            Print(&self.prompt),
            Print(&self.input),
            Print("\r\n")
        )?;
        out.flush()?;
        Ok(())
    }
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Forward terminal events until `shutdown` is cancelled or the receiver goes away
fn spawn_event_reader(
    tx: UnboundedSender<io::Result<Event>>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !shutdown.is_cancelled() {
            match event::poll(EVENT_POLL_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {
                    let event = event::read();
                    let failed = event.is_err();
                    if tx.send(event).is_err() || failed {
                        break;
                    }
                }
                Err(e) => {
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
    })
}
