//! Reusable rendering helpers shared by the views

use ratatui::prelude::*;

use crate::formatting::{fit_column, usage_bar};
use crate::models::GpuUsage;
use crate::tui::theme::Theme;

/// Build a styled, fixed-width header line from `(name, width)` columns
pub fn table_header(columns: &[(&str, usize)], theme: &Theme) -> Line<'static> {
    let style = Style::default()
        .fg(theme.header_fg)
        .bg(theme.header_bg)
        .bold();
    let text = columns
        .iter()
        .map(|(name, width)| fit_column(name, *width))
        .collect::<Vec<_>>()
        .join(" ");
    Line::from(Span::styled(format!("  {}", text.trim_end()), style))
}

/// Calculate scroll offset to keep selection visible
pub fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if visible_height == 0 || total == 0 {
        return 0;
    }

    if selected < visible_height / 2 {
        0
    } else if selected > total.saturating_sub(visible_height / 2) {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(visible_height / 2)
    }
}

/// GPU memory bar as `[███───]`, coloured by utilization
pub fn gpu_bar(gpu: &GpuUsage, width: usize, theme: &Theme) -> Vec<Span<'static>> {
    let filled = gpu.fill_segments(width);
    // Two spans so filled and empty segments can be coloured separately
    let full = usage_bar(filled, filled);
    let empty = usage_bar(0, width - filled);

    vec![
        Span::raw("["),
        Span::styled(
            full,
            Style::default().fg(theme.progress_color(f64::from(gpu.utilization_percent))),
        ),
        Span::styled(empty, Style::default().fg(theme.progress_empty)),
        Span::raw("]"),
    ]
}
