//! Single-job detail panel

use ratatui::prelude::*;

use crate::models::JobState;
use crate::tui::app::DashboardState;
use crate::tui::theme::Theme;

pub const NO_SELECTION: &str = "No job selected.";

const BACK_HINT: &str = "  Press Esc to return to the list.";

pub fn render_detail_view(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    let muted = Style::default().fg(theme.muted);
    let Some(job) = state.selected_job() else {
        return vec![
            Line::styled(format!("  {NO_SELECTION}"), muted),
            Line::default(),
            Line::styled(BACK_HINT, muted),
        ];
    };

    let label = Style::default().fg(theme.accent).bold();
    let value = Style::default().fg(theme.fg);
    let field = |name: &str, text: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {:<11}", format!("{name}:")), label),
            Span::styled(text, style),
        ])
    };

    let job_state = job.job_state();
    let state_text = match job_state {
        JobState::Other => job.state.clone(),
        classified => format!("{} ({})", job.state, classified.label()),
    };

    vec![
        Line::styled(format!("  Job {}", job.id), label),
        Line::default(),
        field("ID", job.id.clone(), value),
        field("User", job.user.clone(), value),
        field("Partition", job.partition.clone(), value),
        field(
            "State",
            state_text,
            value.fg(theme.job_state_color(job_state)),
        ),
        field("Time", job.elapsed_time.clone(), value),
        field("Nodes", job.node_count.clone(), value),
        field("Name", job.name.clone(), value),
        Line::default(),
        Line::styled(BACK_HINT, muted),
    ]
}
