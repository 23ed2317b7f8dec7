//! Async runtime and task management for the TUI
//!
//! This module implements the dual-channel event-driven architecture:
//! - Input channel (priority): user input events that are never dropped
//! - Data channel: fetch completions and auto-refresh ticks
//!
//! The main loop uses `tokio::select!` with bias toward the input channel
//! to prevent input starvation while completions pile up. Transitions are
//! strictly sequential: one event, one call to [`update`], one render.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::tui::app::{DashboardState, update};
use crate::tui::event::{AppEvent, Command, DataEvent, InputEvent};
use crate::tui::pipeline::FetchPipeline;

/// Channel capacities
const INPUT_CHANNEL_CAPACITY: usize = 16;
const DATA_CHANNEL_CAPACITY: usize = 32;

/// How long shutdown waits for the reader and ticker tasks
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// TUI runtime managing the long-lived background tasks.
///
/// Fetch tasks are not tracked here; they are abandoned on quit.
pub struct TuiRuntime {
    cancel_token: CancellationToken,
    task_handles: Vec<JoinHandle<()>>,
}

impl Default for TuiRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiRuntime {
    /// Create a new TUI runtime
    pub fn new() -> Self {
        Self {
            cancel_token: CancellationToken::new(),
            task_handles: Vec::new(),
        }
    }

    /// Get a clone of the cancellation token for spawning tasks
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Add a task handle to track
    pub fn track(&mut self, handle: JoinHandle<()>) {
        self.task_handles.push(handle);
    }

    /// Signal shutdown and wait for tasks to complete
    pub async fn shutdown(self) {
        self.cancel_token.cancel();

        let shutdown = async {
            for handle in self.task_handles {
                let _ = handle.await;
            }
        };

        tokio::select! {
            _ = shutdown => {}
            _ = tokio::time::sleep(SHUTDOWN_GRACE) => {
                tracing::warn!("background tasks did not stop in time");
            }
        }
    }
}

/// Spawn the input event reader task
pub fn spawn_input_task(tx: mpsc::Sender<InputEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = EventStream::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            let input_event = match event {
                                Event::Key(key) => Some(InputEvent::Key(key)),
                                Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
                                _ => None,
                            };

                            if let Some(evt) = input_event
                                && tx.send(evt).await.is_err()
                            {
                                break; // Receiver dropped
                            }
                        }
                        Some(Err(e)) => {
                            let is_fatal = matches!(
                                e.kind(),
                                std::io::ErrorKind::BrokenPipe
                                    | std::io::ErrorKind::ConnectionReset
                                    | std::io::ErrorKind::UnexpectedEof
                            );

                            if is_fatal {
                                tracing::info!("Terminal disconnected: {:?}", e);
                                break;
                            }
                            tracing::warn!("Terminal event read error: {:?}", e);
                        }
                        None => break, // Stream ended
                    }
                }
            }
        }
    })
}

/// Spawn the auto-refresh ticker. The first tick fires one full period after
/// startup, since the initial fetch is already issued.
pub fn spawn_refresh_tick(
    tx: mpsc::Sender<DataEvent>,
    cancel: CancellationToken,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    // A tick while the loop is busy is redundant
                    if let Err(mpsc::error::TrySendError::Closed(_)) =
                        tx.try_send(DataEvent::RefreshTick)
                    {
                        break;
                    }
                }
            }
        }
    })
}

/// Run the main TUI event loop.
///
/// Renders once up front and after every event, executes fetch commands
/// through `pipeline`, and returns the final state on quit or when both
/// channels are closed.
pub async fn run_event_loop(
    mut state: DashboardState,
    mut input_rx: mpsc::Receiver<InputEvent>,
    mut data_rx: mpsc::Receiver<DataEvent>,
    pipeline: &FetchPipeline,
    mut render_fn: impl FnMut(&DashboardState) -> Result<()>,
) -> Result<DashboardState> {
    render_fn(&state)?;

    loop {
        let event: AppEvent = tokio::select! {
            // Bias toward input channel to prevent input starvation
            biased;

            Some(input) = input_rx.recv() => input.into(),
            Some(data) = data_rx.recv() => data.into(),

            else => break,
        };

        let (next, command) = update(state, event);
        state = next;

        match command {
            Some(Command::Quit) => {
                tracing::debug!("quit requested");
                break;
            }
            Some(fetch) => {
                // Detached; a superseded result is discarded on arrival
                let _ = pipeline.dispatch(fetch);
            }
            None => {}
        }

        render_fn(&state)?;
    }

    Ok(state)
}

/// Create the dual channels for the TUI
pub fn create_channels() -> (
    mpsc::Sender<InputEvent>,
    mpsc::Receiver<InputEvent>,
    mpsc::Sender<DataEvent>,
    mpsc::Receiver<DataEvent>,
) {
    let (input_tx, input_rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
    let (data_tx, data_rx) = mpsc::channel(DATA_CHANNEL_CAPACITY);
    (input_tx, input_rx, data_tx, data_rx)
}
