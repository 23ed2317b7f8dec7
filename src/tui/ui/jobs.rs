//! Job list view

use ratatui::prelude::*;

use crate::formatting::{fit_column, truncate_string};
use crate::models::Job;
use crate::tui::app::DashboardState;
use crate::tui::theme::Theme;

use super::widgets::{calculate_scroll_offset, table_header};

/// Column names and widths, in display order. The name column is last and
/// only truncated, never padded.
pub const JOB_COLUMNS: [(&str, usize); 7] = [
    ("ID", 8),
    ("User", 10),
    ("Partition", 10),
    ("State", 8),
    ("Time", 10),
    ("Nodes", 6),
    ("Name", 24),
];

pub fn render_jobs_view(
    state: &DashboardState,
    rows: Option<usize>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    if state.loading() {
        return vec![Line::styled(
            "  Loading jobs...",
            Style::default().fg(theme.pending),
        )];
    }

    if state.jobs.is_empty() {
        let msg = if state.error.is_some() {
            "  No jobs loaded. Press r to retry."
        } else {
            "  No jobs found."
        };
        return vec![Line::styled(msg, Style::default().fg(theme.muted))];
    }

    let mut lines = vec![table_header(&JOB_COLUMNS, theme)];

    let total = state.jobs.len();
    let selected = state.selected_index();
    let visible = rows.unwrap_or(total).max(1);
    let offset = calculate_scroll_offset(selected, visible, total);

    lines.extend(
        state
            .jobs
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(idx, job)| job_row(job, idx == selected, theme)),
    );

    lines
}

fn job_row(job: &Job, is_selected: bool, theme: &Theme) -> Line<'static> {
    let [id, user, partition, state, time, nodes, name] = JOB_COLUMNS.map(|(_, width)| width);

    let base = if is_selected {
        Style::default().fg(theme.selected_fg).bg(theme.selected_bg)
    } else {
        Style::default().fg(theme.fg)
    };
    let marker = if is_selected { "> " } else { "  " };

    let lead = format!(
        "{}{} {} {} ",
        marker,
        fit_column(&job.id, id),
        fit_column(&job.user, user),
        fit_column(&job.partition, partition),
    );
    let tail = format!(
        " {} {} {}",
        fit_column(&job.elapsed_time, time),
        fit_column(&job.node_count, nodes),
        truncate_string(&job.name, name),
    );

    Line::from(vec![
        Span::styled(lead, base),
        Span::styled(
            fit_column(&job.state, state),
            base.fg(theme.job_state_color(job.job_state())),
        ),
        Span::styled(tail, base),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            id: "123".to_string(),
            user: "alice".to_string(),
            partition: "gpu".to_string(),
            state: "R".to_string(),
            elapsed_time: "00:10:00".to_string(),
            node_count: "2".to_string(),
            name: "a-very-long-training-job-name-that-overflows".to_string(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_row_layout() {
        let row = text(&job_row(&job(), true, &Theme::dark()));
        assert!(row.starts_with("> 123      alice      gpu        R        00:10:00   2      "));
        assert!(row.ends_with("a-very-long-training-..."));
        assert_eq!(row.chars().count(), 2 + 8 + 10 + 10 + 8 + 10 + 6 + 24 + 6);
    }

    #[test]
    fn test_unselected_row_has_no_marker() {
        let row = text(&job_row(&job(), false, &Theme::dark()));
        assert!(row.starts_with("  123 "));
    }
}
