//! Per-GPU utilization view

use ratatui::prelude::*;

use crate::models::GpuUsage;
use crate::tui::app::DashboardState;
use crate::tui::theme::Theme;

use super::widgets::gpu_bar;

pub fn render_cluster_view(state: &DashboardState, theme: &Theme) -> Vec<Line<'static>> {
    if state.gpus.is_empty() {
        let (msg, color) = if state.loading() {
            ("  Loading GPU usage...", theme.pending)
        } else if state.error.is_some() {
            ("  No GPU data available. Press r to retry.", theme.muted)
        } else {
            ("  No GPUs reported by the cluster.", theme.muted)
        };
        return vec![Line::styled(msg, Style::default().fg(color))];
    }

    let node_width = state
        .gpus
        .iter()
        .map(|g| g.node.chars().count())
        .max()
        .unwrap_or(0);

    state
        .gpus
        .iter()
        .map(|gpu| gpu_line(gpu, node_width, state.bar_width, theme))
        .collect()
}

/// `<node> GPU<idx> [<bar>] <util>% <used>/<total>MB <job|idle>`
fn gpu_line(gpu: &GpuUsage, node_width: usize, bar_width: usize, theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::styled(
            format!("  {:<node_width$} ", gpu.node),
            Style::default().fg(theme.accent),
        ),
        Span::styled(
            format!("GPU{:<2} ", gpu.gpu_index),
            Style::default().fg(theme.fg),
        ),
    ];
    spans.extend(gpu_bar(gpu, bar_width, theme));
    spans.push(Span::styled(
        format!(
            " {:>3}% {}/{}MB ",
            gpu.utilization_percent, gpu.mem_used_mb, gpu.mem_total_mb
        ),
        Style::default().fg(theme.fg),
    ));

    match gpu.job_id.as_deref() {
        Some(job) if !gpu.is_idle() => spans.push(Span::styled(
            format!("job {job}"),
            Style::default().fg(theme.running),
        )),
        _ => spans.push(Span::styled("idle", Style::default().fg(theme.idle))),
    }

    Line::from(spans)
}
