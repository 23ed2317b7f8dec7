//! Key binding reference

use ratatui::prelude::*;

use crate::tui::theme::Theme;

const BINDINGS: &[(&str, &str)] = &[
    ("j / Down", "Move selection down"),
    ("k / Up", "Move selection up"),
    ("Home / End", "Jump to first / last job"),
    ("Enter", "Show job detail"),
    ("Esc", "Back to job list"),
    ("r", "Refresh jobs (GPU usage in cluster view)"),
    ("g", "Toggle cluster GPU view"),
    ("? / F1", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

pub fn render_help_view(theme: &Theme) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(theme.accent).bold();
    let text_style = Style::default().fg(theme.fg);

    let mut lines = vec![
        Line::styled("  Key bindings", Style::default().fg(theme.fg).bold()),
        Line::default(),
    ];
    lines.extend(BINDINGS.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {key:<12}"), key_style),
            Span::styled(*action, text_style),
        ])
    }));
    lines
}
