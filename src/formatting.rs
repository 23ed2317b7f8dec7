//! Shared formatting utilities used by both the one-shot CLI output and the TUI

/// Layout constants
pub mod layout {
    /// Default width of the GPU memory bar, in segments
    pub const BAR_LENGTH: usize = 20;
    pub const BAR_FILLED: char = '█';
    pub const BAR_EMPTY: char = '─';
}

/// Utilization thresholds for color coding
pub mod thresholds {
    pub const UTILIZATION_HIGH: f64 = 80.0;
    pub const UTILIZATION_CRITICAL: f64 = 95.0;
}

/// Truncate a string to a maximum length (in characters), adding "..." at the end if truncated.
///
/// This function is Unicode-safe and counts characters, not bytes.
///
/// # Examples
/// ```
/// use gmon::formatting::truncate_string;
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 8), "hello...");
/// assert_eq!(truncate_string("ab", 2), "ab");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Fit a value into a fixed-width column: truncate if too long, pad with spaces otherwise.
///
/// # Examples
/// ```
/// use gmon::formatting::fit_column;
/// assert_eq!(fit_column("abc", 5), "abc  ");
/// assert_eq!(fit_column("abcdefgh", 6), "abc...");
/// ```
#[must_use]
pub fn fit_column(s: &str, width: usize) -> String {
    let truncated = truncate_string(s, width);
    let len = truncated.chars().count();
    format!("{}{}", truncated, " ".repeat(width.saturating_sub(len)))
}

/// Build a bar of `width` segments with `filled` of them drawn as filled.
///
/// # Examples
/// ```
/// use gmon::formatting::usage_bar;
/// assert_eq!(usage_bar(2, 4), "██──");
/// ```
#[must_use]
pub fn usage_bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    let mut bar = String::with_capacity(width * 3);
    bar.extend(std::iter::repeat_n(layout::BAR_FILLED, filled));
    bar.extend(std::iter::repeat_n(layout::BAR_EMPTY, width - filled));
    bar
}

/// Format a size given in megabytes to a short human-readable string
#[must_use]
pub fn format_mb(mb: u64) -> String {
    const GB: u64 = 1024;
    if mb >= GB {
        format!("{:.1}G", mb as f64 / GB as f64)
    } else {
        format!("{}M", mb)
    }
}
