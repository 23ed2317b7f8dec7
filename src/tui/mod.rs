//! Terminal dashboard for gmon
//!
//! Features:
//! - Job list, job detail, cluster GPU and help views
//! - Dual-channel event architecture (priority input, fetch completions)
//! - Background fetches whose stale results are discarded by request id
//! - Optional auto-refresh

pub mod app;
pub mod event;
pub mod pipeline;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::models::TuiConfig;
use crate::source::ClusterSource;
use crate::tui::app::DashboardState;
use crate::tui::pipeline::FetchPipeline;
use crate::tui::runtime::{
    TuiRuntime, create_channels, run_event_loop, spawn_input_task, spawn_refresh_tick,
};
use crate::tui::theme::Theme;

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let term_type = std::env::var("TERM").unwrap_or_default();
        Self::from_parts(stdout().is_terminal(), term_type)
    }

    fn from_parts(is_tty: bool, term_type: String) -> Self {
        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");
        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    /// Check if terminal is suitable for TUI mode
    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    /// Get error message for unsuitable terminal
    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use 'gmon jobs' or 'gmon gpus' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use CLI mode.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the dashboard until the user quits
pub async fn run_tui(
    config: TuiConfig,
    warnings: Vec<String>,
    source: Arc<dyn ClusterSource>,
) -> Result<()> {
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let theme = Theme::from_name(&config.display.theme);
    let (input_tx, input_rx, data_tx, data_rx) = create_channels();
    let pipeline = FetchPipeline::new(source, data_tx.clone());

    let mut runtime = TuiRuntime::new();
    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    if config.refresh.auto_refresh_secs > 0 {
        runtime.track(spawn_refresh_tick(
            data_tx,
            runtime.cancel_token(),
            Duration::from_secs(config.refresh.auto_refresh_secs),
        ));
    }

    let (mut state, initial_fetch) = DashboardState::start(config.display.bar_width, warnings);
    pipeline.dispatch(initial_fetch);

    let mut terminal = setup_terminal()?;
    if let Ok(size) = terminal.size() {
        state.terminal_rows = size.height;
    }

    tracing::info!("dashboard started");
    let result = run_event_loop(state, input_rx, data_rx, &pipeline, |state| {
        terminal.draw(|frame| ui::render(state, &theme, frame))?;
        Ok(())
    })
    .await;

    runtime.shutdown().await;
    restore_terminal(&mut terminal)?;

    result.map(|_| ())
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI with the tokio runtime (entry point from main).
///
/// Outstanding fetches are abandoned when the runtime is dropped.
pub fn run(config: TuiConfig, warnings: Vec<String>, source: Arc<dyn ClusterSource>) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let result = rt.block_on(run_tui(config, warnings, source));
    // Do not block exit on fetches still running on the blocking pool
    rt.shutdown_background();
    result
}
