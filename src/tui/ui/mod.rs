//! UI rendering for the TUI
//!
//! Rendering is a pure function of [`DashboardState`]: [`render_text`] builds
//! the whole frame as styled text, and [`render`] only hands it to ratatui.
//! The driver renders after every event, never on a fixed frame rate.

mod cluster;
mod detail;
mod help;
mod jobs;
mod widgets;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::app::{DashboardState, Mode};
use crate::tui::theme::Theme;

use cluster::render_cluster_view;
use detail::render_detail_view;
use help::render_help_view;
use jobs::render_jobs_view;

pub use detail::NO_SELECTION;
pub use jobs::JOB_COLUMNS;
pub use widgets::calculate_scroll_offset;

/// Draw the current state into a terminal frame
pub fn render(state: &DashboardState, theme: &Theme, frame: &mut Frame) {
    frame.render_widget(Paragraph::new(render_text(state, theme)), frame.area());
}

/// Build the full frame for `state`. Deterministic: equal states give equal text.
pub fn render_text(state: &DashboardState, theme: &Theme) -> Text<'static> {
    let status = status_lines(state, theme);

    // Title, blank line, table header, blank line, footer, status lines
    let chrome = 5 + status.len();
    let rows = (state.terminal_rows > 0)
        .then(|| usize::from(state.terminal_rows).saturating_sub(chrome));

    let mut lines = vec![title_line(state, theme), Line::default()];
    lines.extend(match state.mode {
        Mode::List => render_jobs_view(state, rows, theme),
        Mode::Detail => render_detail_view(state, theme),
        Mode::Cluster => render_cluster_view(state, theme),
        Mode::Help => render_help_view(theme),
    });
    lines.push(Line::default());
    lines.extend(status);
    lines.push(footer_line(state.mode, theme));

    Text::from(lines)
}

/// Unstyled rendering, one terminal row per line
pub fn render_plain(state: &DashboardState) -> String {
    render_text(state, &Theme::default())
        .lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_line(state: &DashboardState, theme: &Theme) -> Line<'static> {
    let muted = Style::default().fg(theme.muted);

    let mut spans = vec![
        Span::styled(" gmon", Style::default().fg(theme.accent).bold()),
        Span::styled(" - ", muted),
        Span::styled(state.mode.label(), Style::default().fg(theme.fg).bold()),
        Span::styled(" | ", muted),
        Span::styled(
            format!("{} jobs", state.jobs.len()),
            Style::default().fg(theme.fg),
        ),
        Span::styled(" (", muted),
        Span::styled(
            format!("{} running", state.running_job_count()),
            Style::default().fg(theme.running),
        ),
        Span::styled(", ", muted),
        Span::styled(
            format!("{} pending", state.pending_job_count()),
            Style::default().fg(theme.pending),
        ),
        Span::styled(")", muted),
        Span::styled(" | ", muted),
        Span::styled(
            format!("{} GPUs", state.gpus.len()),
            Style::default().fg(theme.fg),
        ),
    ];

    if let Some(at) = state.requests.kind(state.data_kind()).fetched_at {
        spans.push(Span::styled(
            format!(" | updated {}", at.format("%H:%M:%S")),
            muted,
        ));
    }
    if state.loading() {
        spans.push(Span::styled(
            " | loading...",
            Style::default().fg(theme.pending),
        ));
    }

    Line::from(spans)
}

/// Error and config warning lines, empty when there is nothing to report
fn status_lines(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = &state.error {
        lines.push(Line::styled(
            format!(" Error ({}): {}", error.kind, error.message),
            Style::default().fg(theme.error).bold(),
        ));
    }

    // First warning with count if multiple
    if let Some(first) = state.warnings.first() {
        let text = match state.warnings.len() {
            1 => format!(" Warning: {first}"),
            n => format!(" Warning: {first} (+{} more)", n - 1),
        };
        lines.push(Line::styled(text, Style::default().fg(theme.warning)));
    }

    lines
}

fn footer_line(mode: Mode, theme: &Theme) -> Line<'static> {
    let keybinds = match mode {
        Mode::List => " j/k:move  Enter:detail  r:refresh  g:cluster  ?:help  q:quit ",
        Mode::Detail => " Esc:back  ?:help  q:quit ",
        Mode::Cluster => " r:refresh  g:jobs  ?:help  q:quit ",
        Mode::Help => " Esc/?:close  q:quit ",
    };
    Line::styled(keybinds, Style::default().fg(theme.muted))
}
