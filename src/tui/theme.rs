//! Theme definitions for the TUI
//!
//! Colorblind-safe themes for both dark and light terminals. The default is
//! "dark"; "light" can be selected via config file or `GMON_THEME`.

use ratatui::style::Color;

use crate::formatting::thresholds::{UTILIZATION_CRITICAL, UTILIZATION_HIGH};
use crate::models::JobState;

/// Available theme names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "light" => ThemeName::Light,
            _ => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,

    // Base colors
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,

    // Job state colors (colorblind-safe)
    pub running: Color,
    pub pending: Color,
    pub completed: Color,
    pub failed: Color,
    pub cancelled: Color,
    pub timeout: Color,

    // GPU ownership
    pub idle: Color,

    // UI elements
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub error: Color,
    pub warning: Color,

    // Progress bars
    pub progress_full: Color,
    pub progress_empty: Color,
    pub progress_warn: Color,
    pub progress_crit: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,

            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,

            running: Color::Rgb(0, 200, 0),      // Bright green
            pending: Color::Rgb(255, 180, 0),    // Orange (not yellow - better visibility)
            completed: Color::Rgb(80, 160, 255), // Light blue
            failed: Color::Rgb(255, 80, 80),     // Bright red
            cancelled: Color::DarkGray,
            timeout: Color::Magenta,

            idle: Color::Rgb(100, 180, 100), // Muted green

            selected_bg: Color::Rgb(60, 60, 80),
            selected_fg: Color::White,
            header_bg: Color::Rgb(40, 80, 120),
            header_fg: Color::White,
            error: Color::Rgb(255, 100, 100),
            warning: Color::Rgb(255, 200, 100),

            progress_full: Color::Rgb(0, 200, 0),
            progress_empty: Color::DarkGray,
            progress_warn: Color::Rgb(255, 180, 0),
            progress_crit: Color::Rgb(255, 80, 80),
        }
    }

    /// Create a light theme
    /// Uses darker, more saturated colors for visibility on light backgrounds
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,

            fg: Color::Black,
            muted: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(0, 100, 180),

            running: Color::Rgb(0, 140, 0),       // Dark green
            pending: Color::Rgb(200, 120, 0),     // Dark orange
            completed: Color::Rgb(0, 80, 180),    // Dark blue
            failed: Color::Rgb(200, 0, 0),        // Dark red
            cancelled: Color::Rgb(100, 100, 100), // Medium gray
            timeout: Color::Rgb(160, 0, 160),     // Dark magenta

            idle: Color::Rgb(60, 120, 60),

            selected_bg: Color::Rgb(200, 220, 255),
            selected_fg: Color::Black,
            header_bg: Color::Rgb(180, 200, 230),
            header_fg: Color::Black,
            error: Color::Rgb(200, 0, 0),
            warning: Color::Rgb(180, 140, 60),

            progress_full: Color::Rgb(0, 140, 0),
            progress_empty: Color::Rgb(180, 180, 180),
            progress_warn: Color::Rgb(200, 120, 0),
            progress_crit: Color::Rgb(200, 0, 0),
        }
    }

    /// Create theme from name string
    pub fn from_name(name: &str) -> Self {
        match ThemeName::parse(name) {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Get color for a job state
    pub fn job_state_color(&self, state: JobState) -> Color {
        match state {
            JobState::Running | JobState::Completing => self.running,
            JobState::Pending => self.pending,
            JobState::Completed => self.completed,
            JobState::Failed => self.failed,
            JobState::Cancelled => self.cancelled,
            JobState::Timeout => self.timeout,
            JobState::Other => self.fg,
        }
    }

    /// Get appropriate progress bar color based on utilization percentage
    pub fn progress_color(&self, percent: f64) -> Color {
        if percent >= UTILIZATION_CRITICAL {
            self.progress_crit
        } else if percent >= UTILIZATION_HIGH {
            self.progress_warn
        } else {
            self.progress_full
        }
    }
}
