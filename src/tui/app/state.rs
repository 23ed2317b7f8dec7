//! State building blocks for the dashboard
//!
//! - View modes
//! - Selection state (ListState)
//! - Per-kind request tracking used to discard stale fetch results
//! - Fetch failure feedback

use chrono::{DateTime, Local};

use crate::tui::event::{FetchKind, RequestId};

// ============================================================================
// View Modes
// ============================================================================

/// The active view. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Detail,
    Cluster,
    Help,
}

impl Mode {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Mode::List => "Jobs",
            Mode::Detail => "Job Detail",
            Mode::Cluster => "Cluster GPUs",
            Mode::Help => "Help",
        }
    }
}

// ============================================================================
// List Navigation State
// ============================================================================

/// Selection within the job list. Moves clamp at both ends, no wraparound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListState {
    pub selected: usize,
}

impl ListState {
    pub fn clamp(&mut self, list_len: usize) {
        self.selected = if list_len == 0 {
            0
        } else {
            self.selected.min(list_len - 1)
        };
    }

    pub fn move_up(&mut self, list_len: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp(list_len);
    }

    pub fn move_down(&mut self, list_len: usize) {
        if list_len > 0 && self.selected < list_len - 1 {
            self.selected += 1;
        }
        self.clamp(list_len);
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_bottom(&mut self, list_len: usize) {
        self.selected = list_len.saturating_sub(1);
    }
}

// ============================================================================
// Request Tracking
// ============================================================================

/// Bookkeeping for one data kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindTracker {
    /// Most recently issued request; only its completion is honored
    pub latest: Option<RequestId>,
    /// True while `latest` has not completed
    pub outstanding: bool,
    /// When the current snapshot was fetched (None until the first success)
    pub fetched_at: Option<DateTime<Local>>,
}

/// Monotonic request ids for every fetch kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestTracker {
    last_issued: u64,
    pub jobs: KindTracker,
    pub gpus: KindTracker,
}

impl RequestTracker {
    #[must_use]
    pub fn kind(&self, kind: FetchKind) -> &KindTracker {
        match kind {
            FetchKind::Jobs => &self.jobs,
            FetchKind::Gpus => &self.gpus,
        }
    }

    fn kind_mut(&mut self, kind: FetchKind) -> &mut KindTracker {
        match kind {
            FetchKind::Jobs => &mut self.jobs,
            FetchKind::Gpus => &mut self.gpus,
        }
    }

    /// Allocate a new request id for `kind`, superseding any earlier one
    pub fn issue(&mut self, kind: FetchKind) -> RequestId {
        self.last_issued += 1;
        let id = RequestId(self.last_issued);
        let tracker = self.kind_mut(kind);
        tracker.latest = Some(id);
        tracker.outstanding = true;
        id
    }

    /// Accept a completion if it belongs to the latest outstanding request.
    ///
    /// Returns false for superseded or already-completed requests.
    pub fn complete(&mut self, kind: FetchKind, request: RequestId) -> bool {
        let tracker = self.kind_mut(kind);
        if tracker.outstanding && tracker.latest == Some(request) {
            tracker.outstanding = false;
            true
        } else {
            false
        }
    }

    /// Record a successful snapshot time for `kind`
    pub fn mark_fetched(&mut self, kind: FetchKind, at: DateTime<Local>) {
        self.kind_mut(kind).fetched_at = Some(at);
    }

    #[must_use]
    pub fn is_outstanding(&self, kind: FetchKind) -> bool {
        self.kind(kind).outstanding
    }

    #[must_use]
    pub fn has_loaded(&self, kind: FetchKind) -> bool {
        self.kind(kind).fetched_at.is_some()
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// The last fetch failure, shown until the next fetch of the same kind
/// starts or succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchKind,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_state_clamps_at_bounds() {
        let mut list = ListState::default();
        list.move_up(3);
        assert_eq!(list.selected, 0);

        list.move_down(3);
        list.move_down(3);
        list.move_down(3);
        assert_eq!(list.selected, 2);

        list.move_to_top();
        assert_eq!(list.selected, 0);
        list.move_to_bottom(3);
        assert_eq!(list.selected, 2);
    }

    #[test]
    fn test_list_state_empty_list() {
        let mut list = ListState { selected: 5 };
        list.clamp(0);
        assert_eq!(list.selected, 0);
        list.move_down(0);
        assert_eq!(list.selected, 0);
        list.move_to_bottom(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_request_ids_are_monotonic_across_kinds() {
        let mut tracker = RequestTracker::default();
        let a = tracker.issue(FetchKind::Jobs);
        let b = tracker.issue(FetchKind::Gpus);
        let c = tracker.issue(FetchKind::Jobs);
        assert!(a < b && b < c);
        assert_eq!(tracker.jobs.latest, Some(c));
        assert_eq!(tracker.gpus.latest, Some(b));
    }

    #[test]
    fn test_only_latest_request_completes() {
        let mut tracker = RequestTracker::default();
        let old = tracker.issue(FetchKind::Jobs);
        let new = tracker.issue(FetchKind::Jobs);

        assert!(!tracker.complete(FetchKind::Jobs, old));
        assert!(tracker.is_outstanding(FetchKind::Jobs));

        assert!(tracker.complete(FetchKind::Jobs, new));
        assert!(!tracker.is_outstanding(FetchKind::Jobs));

        // A duplicate completion is ignored too
        assert!(!tracker.complete(FetchKind::Jobs, new));
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut tracker = RequestTracker::default();
        let jobs = tracker.issue(FetchKind::Jobs);
        let gpus = tracker.issue(FetchKind::Gpus);

        // A jobs id is never valid for gpus
        assert!(!tracker.complete(FetchKind::Gpus, jobs));
        assert!(tracker.complete(FetchKind::Gpus, gpus));
        assert!(tracker.is_outstanding(FetchKind::Jobs));
    }
}
