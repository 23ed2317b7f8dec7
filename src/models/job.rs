//! Job snapshot records as reported by the scheduler.

use serde::Serialize;

/// One job from a scheduler snapshot.
///
/// All fields are kept as the scheduler reports them; the dashboard never
/// edits a job, it replaces the whole list on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub id: String,
    pub user: String,
    pub partition: String,
    /// Raw scheduler state code (e.g. `R`, `PD`, `RUNNING`)
    pub state: String,
    /// Elapsed time as reported (e.g. `1-02:03:04`)
    pub elapsed_time: String,
    /// Node count, may be a range for pending jobs (e.g. `2-4`)
    pub node_count: String,
    pub name: String,
}

impl Job {
    /// Classified state used for colouring and summary counts
    #[must_use]
    pub fn job_state(&self) -> JobState {
        JobState::from_state_code(&self.state)
    }
}

/// Coarse classification of the open-ended scheduler state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobState {
    Running,
    Pending,
    Completing,
    Completed,
    Failed,
    Cancelled,
    Timeout,
    #[default]
    Other,
}

impl JobState {
    /// Classify a state code.
    ///
    /// Handles both full names (`RUNNING`) and short codes (`R`), and ignores
    /// trailing detail such as `CANCELLED by 1234`.
    #[must_use]
    pub fn from_state_code(code: &str) -> Self {
        let head = code.split_whitespace().next().unwrap_or_default();
        match head.to_ascii_uppercase().as_str() {
            "R" | "RUNNING" => Self::Running,
            "PD" | "PENDING" | "S" | "SUSPENDED" => Self::Pending,
            "CG" | "COMPLETING" => Self::Completing,
            "CD" | "COMPLETED" => Self::Completed,
            "F" | "FAILED" | "NF" | "NODE_FAIL" | "BF" | "BOOT_FAIL" | "OOM"
            | "OUT_OF_MEMORY" => Self::Failed,
            "CA" | "CANCELLED" | "PR" | "PREEMPTED" => Self::Cancelled,
            "TO" | "TIMEOUT" | "DL" | "DEADLINE" => Self::Timeout,
            _ => Self::Other,
        }
    }

    /// Human-readable name shown next to the raw code
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Pending => "Pending",
            Self::Completing => "Completing",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Timeout => "Timeout",
            Self::Other => "Other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_short_and_long_codes() {
        assert_eq!(JobState::from_state_code("R"), JobState::Running);
        assert_eq!(JobState::from_state_code("RUNNING"), JobState::Running);
        assert_eq!(JobState::from_state_code("PD"), JobState::Pending);
        assert_eq!(JobState::from_state_code("pending"), JobState::Pending);
        assert_eq!(JobState::from_state_code("CG"), JobState::Completing);
    }

    #[test]
    fn test_state_with_trailing_detail() {
        assert_eq!(
            JobState::from_state_code("CANCELLED by 12345"),
            JobState::Cancelled
        );
    }

    #[test]
    fn test_unknown_state_is_other() {
        assert_eq!(JobState::from_state_code("XYZ"), JobState::Other);
        assert_eq!(JobState::from_state_code(""), JobState::Other);
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(JobState::Pending.label(), "Pending");
        assert_eq!(JobState::from_state_code("TO").label(), "Timeout");
        assert_eq!(JobState::Other.label(), "Other");
    }
}
