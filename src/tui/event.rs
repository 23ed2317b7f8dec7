//! Event types for the TUI
//!
//! This module implements a dual-channel event architecture:
//! - InputEvent: Priority channel for user input (never dropped)
//! - DataEvent: Fetch completions and refresh ticks
//!
//! Both are funnelled into [`AppEvent`] before reaching the state machine,
//! and the state machine answers with an optional [`Command`].

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::{GpuUsage, Job};
use crate::source::FetchError;

/// Input events from the terminal (priority channel - never dropped)
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// The kinds of data the dashboard fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    Jobs,
    Gpus,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchKind::Jobs => write!(f, "jobs"),
            FetchKind::Gpus => write!(f, "gpu usage"),
        }
    }
}

/// Identifier of one issued fetch. Strictly increasing across all kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Data and timer events (data channel)
#[derive(Debug, Clone)]
pub enum DataEvent {
    /// A job fetch completed
    JobsLoaded {
        request: RequestId,
        jobs: Vec<Job>,
        fetched_at: DateTime<Local>,
    },

    /// A GPU usage fetch completed
    GpusLoaded {
        request: RequestId,
        gpus: Vec<GpuUsage>,
        fetched_at: DateTime<Local>,
    },

    /// A fetch failed
    FetchFailed {
        kind: FetchKind,
        request: RequestId,
        error: FetchError,
    },

    /// Auto-refresh timer fired
    RefreshTick,
}

/// Everything the state machine consumes
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyAction),
    Data(DataEvent),
    /// Terminal size changed (columns, rows)
    Resize(u16, u16),
}

impl From<InputEvent> for AppEvent {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Key(key) => AppEvent::Key(KeyAction::from_key_event(key)),
            InputEvent::Resize(cols, rows) => AppEvent::Resize(cols, rows),
        }
    }
}

impl From<DataEvent> for AppEvent {
    fn from(event: DataEvent) -> Self {
        AppEvent::Data(event)
    }
}

impl From<KeyAction> for AppEvent {
    fn from(action: KeyAction) -> Self {
        AppEvent::Key(action)
    }
}

/// Side effects requested by a transition, executed by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a fetch of `kind` tagged with `request`
    Fetch { kind: FetchKind, request: RequestId },
    /// Leave the event loop without waiting for outstanding fetches
    Quit,
}

/// Key action mappings for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,

    // Actions
    Select,
    Back,
    Refresh,
    ToggleCluster,

    // UI
    ShowHelp,
    Quit,

    // Unknown/unhandled
    Unknown,
}

impl KeyAction {
    /// Map a key event to an action
    pub fn from_key_event(event: KeyEvent) -> Self {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Only presses count; some terminals also report releases
        if kind == KeyEventKind::Release {
            return KeyAction::Unknown;
        }

        match code {
            // Ctrl+ combinations must come before bare character matches
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

            KeyCode::Char('q') => KeyAction::Quit,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Home => KeyAction::MoveToTop,
            KeyCode::End => KeyAction::MoveToBottom,

            // Actions
            KeyCode::Enter => KeyAction::Select,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Char('r') => KeyAction::Refresh,
            KeyCode::Char('g') => KeyAction::ToggleCluster,

            // Help
            KeyCode::Char('?') | KeyCode::F(1) => KeyAction::ShowHelp,

            _ => KeyAction::Unknown,
        }
    }
}
