//! Dashboard state and the view-mode state machine
//!
//! [`update`] is the single transition function: it takes the current
//! [`DashboardState`] by value together with one [`AppEvent`] and returns
//! the next state plus an optional [`Command`] for the driver to execute.
//! It never blocks and performs no I/O, so every transition can be tested
//! directly.

mod state;

pub use state::{FetchFailure, KindTracker, ListState, Mode, RequestTracker};

use crate::formatting::layout::BAR_LENGTH;
use crate::models::{GpuUsage, Job};
use crate::tui::event::{AppEvent, Command, DataEvent, FetchKind, KeyAction};

/// Everything the renderer needs, owned by the driver and replaced on every
/// transition
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub mode: Mode,
    /// Mode to return to when leaving Help
    pub help_return: Mode,

    /// Latest job snapshot, in fetch order
    pub jobs: Vec<Job>,
    /// Latest GPU snapshot, in fetch order
    pub gpus: Vec<GpuUsage>,

    pub selection: ListState,
    pub requests: RequestTracker,
    pub error: Option<FetchFailure>,

    /// Configuration warnings shown in the status area
    pub warnings: Vec<String>,
    /// GPU bar width in segments
    pub bar_width: usize,
    /// Terminal height in rows (0 = unknown, render everything)
    pub terminal_rows: u16,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            mode: Mode::List,
            help_return: Mode::List,
            jobs: Vec::new(),
            gpus: Vec::new(),
            selection: ListState::default(),
            requests: RequestTracker::default(),
            error: None,
            warnings: Vec::new(),
            bar_width: BAR_LENGTH,
            terminal_rows: 0,
        }
    }
}

impl DashboardState {
    /// Startup state: List mode with the initial job fetch already issued.
    ///
    /// The returned command must be executed by the driver.
    pub fn start(bar_width: usize, warnings: Vec<String>) -> (Self, Command) {
        let mut state = Self {
            bar_width,
            warnings,
            ..Self::default()
        };
        let command = state.begin_fetch(FetchKind::Jobs);
        (state, command)
    }

    /// Index of the selected job (0 when the list is empty)
    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selection.selected
    }

    #[must_use]
    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selection.selected)
    }

    /// The data kind the current view shows
    #[must_use]
    pub fn data_kind(&self) -> FetchKind {
        let mode = if self.mode == Mode::Help {
            self.help_return
        } else {
            self.mode
        };
        match mode {
            Mode::Cluster => FetchKind::Gpus,
            _ => FetchKind::Jobs,
        }
    }

    /// True while a fetch for the current view's data is outstanding
    #[must_use]
    pub fn loading(&self) -> bool {
        self.requests.is_outstanding(self.data_kind())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Number of jobs in a running state
    #[must_use]
    pub fn running_job_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.job_state() == crate::models::JobState::Running)
            .count()
    }

    /// Number of jobs in a pending state
    #[must_use]
    pub fn pending_job_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|j| j.job_state() == crate::models::JobState::Pending)
            .count()
    }

    fn clear_error(&mut self, kind: FetchKind) {
        if self.error.as_ref().is_some_and(|e| e.kind == kind) {
            self.error = None;
        }
    }

    fn begin_fetch(&mut self, kind: FetchKind) -> Command {
        let request = self.requests.issue(kind);
        self.clear_error(kind);
        tracing::debug!(%kind, %request, "issuing fetch");
        Command::Fetch { kind, request }
    }

    fn open_help(&mut self) {
        self.help_return = self.mode;
        self.mode = Mode::Help;
    }

    fn enter_cluster(&mut self) -> Option<Command> {
        self.mode = Mode::Cluster;
        let needs_fetch = !self.requests.has_loaded(FetchKind::Gpus)
            && !self.requests.is_outstanding(FetchKind::Gpus);
        needs_fetch.then(|| self.begin_fetch(FetchKind::Gpus))
    }

    /// Handle a key action
    fn handle_action(&mut self, action: KeyAction) -> Option<Command> {
        if action == KeyAction::Quit {
            return Some(Command::Quit);
        }

        match self.mode {
            Mode::List => self.handle_list_action(action),
            Mode::Detail => {
                match action {
                    KeyAction::Back => self.mode = Mode::List,
                    KeyAction::ShowHelp => self.open_help(),
                    _ => {}
                }
                None
            }
            Mode::Cluster => match action {
                KeyAction::ToggleCluster => {
                    self.mode = Mode::List;
                    None
                }
                KeyAction::Refresh => Some(self.begin_fetch(FetchKind::Gpus)),
                KeyAction::ShowHelp => {
                    self.open_help();
                    None
                }
                _ => None,
            },
            Mode::Help => {
                if matches!(action, KeyAction::Back | KeyAction::ShowHelp) {
                    self.mode = self.help_return;
                }
                None
            }
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) -> Option<Command> {
        let len = self.jobs.len();
        match action {
            KeyAction::Refresh => return Some(self.begin_fetch(FetchKind::Jobs)),
            KeyAction::ToggleCluster => return self.enter_cluster(),
            KeyAction::MoveUp => self.selection.move_up(len),
            KeyAction::MoveDown => self.selection.move_down(len),
            KeyAction::MoveToTop => self.selection.move_to_top(),
            KeyAction::MoveToBottom => self.selection.move_to_bottom(len),
            KeyAction::Select => self.mode = Mode::Detail,
            KeyAction::ShowHelp => self.open_help(),
            KeyAction::Back | KeyAction::Quit | KeyAction::Unknown => {}
        }
        None
    }

    /// Handle a data event
    fn handle_data(&mut self, event: DataEvent) -> Option<Command> {
        match event {
            DataEvent::JobsLoaded {
                request,
                jobs,
                fetched_at,
            } => {
                if !self.requests.complete(FetchKind::Jobs, request) {
                    tracing::debug!(%request, "discarding stale jobs result");
                    return None;
                }
                tracing::debug!(%request, count = jobs.len(), "jobs loaded");
                self.jobs = jobs;
                self.requests.mark_fetched(FetchKind::Jobs, fetched_at);
                self.selection.clamp(self.jobs.len());
                self.clear_error(FetchKind::Jobs);
                None
            }
            DataEvent::GpusLoaded {
                request,
                gpus,
                fetched_at,
            } => {
                if !self.requests.complete(FetchKind::Gpus, request) {
                    tracing::debug!(%request, "discarding stale gpu result");
                    return None;
                }
                tracing::debug!(%request, count = gpus.len(), "gpu usage loaded");
                self.gpus = gpus;
                self.requests.mark_fetched(FetchKind::Gpus, fetched_at);
                self.clear_error(FetchKind::Gpus);
                None
            }
            DataEvent::FetchFailed {
                kind,
                request,
                error,
            } => {
                if !self.requests.complete(kind, request) {
                    tracing::debug!(%kind, %request, "discarding stale fetch failure");
                    return None;
                }
                tracing::warn!(%kind, %request, error = %error, "fetch failed");
                self.error = Some(FetchFailure {
                    kind,
                    message: error.to_string(),
                });
                None
            }
            DataEvent::RefreshTick => {
                let kind = self.data_kind();
                if self.requests.is_outstanding(kind) {
                    None
                } else {
                    Some(self.begin_fetch(kind))
                }
            }
        }
    }
}

/// Apply one event to the state, returning the next state and an optional
/// side effect for the driver.
pub fn update(mut state: DashboardState, event: AppEvent) -> (DashboardState, Option<Command>) {
    let command = match event {
        AppEvent::Key(action) => state.handle_action(action),
        AppEvent::Data(data) => state.handle_data(data),
        AppEvent::Resize(_, rows) => {
            state.terminal_rows = rows;
            None
        }
    };
    (state, command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FetchError;
    use crate::tui::event::RequestId;
    use chrono::{Local, TimeZone};

    fn job(id: &str) -> Job {
        Job {
            id: id.to_string(),
            user: "alice".to_string(),
            partition: "gpu".to_string(),
            state: "R".to_string(),
            elapsed_time: "00:10:00".to_string(),
            node_count: "1".to_string(),
            name: format!("job-{id}"),
        }
    }

    fn gpu(index: u32) -> GpuUsage {
        GpuUsage {
            node: "gpu01".to_string(),
            gpu_index: index,
            mem_used_mb: 4000,
            mem_total_mb: 8000,
            utilization_percent: 50,
            job_id: None,
        }
    }

    fn at() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn key(state: DashboardState, action: KeyAction) -> (DashboardState, Option<Command>) {
        update(state, AppEvent::Key(action))
    }

    fn fetch_request(command: Option<Command>, expected: FetchKind) -> RequestId {
        match command {
            Some(Command::Fetch { kind, request }) if kind == expected => request,
            other => panic!("expected {expected} fetch, got {other:?}"),
        }
    }

    fn jobs_loaded(request: RequestId, jobs: Vec<Job>) -> AppEvent {
        AppEvent::Data(DataEvent::JobsLoaded {
            request,
            jobs,
            fetched_at: at(),
        })
    }

    fn gpus_loaded(request: RequestId, gpus: Vec<GpuUsage>) -> AppEvent {
        AppEvent::Data(DataEvent::GpusLoaded {
            request,
            gpus,
            fetched_at: at(),
        })
    }

    fn failed(kind: FetchKind, request: RequestId, msg: &str) -> AppEvent {
        AppEvent::Data(DataEvent::FetchFailed {
            kind,
            request,
            error: FetchError::Unavailable(msg.to_string()),
        })
    }

    /// Started state with `n` jobs loaded
    fn loaded(n: usize) -> DashboardState {
        let (state, command) = DashboardState::start(20, Vec::new());
        let request = fetch_request(Some(command), FetchKind::Jobs);
        let jobs = (0..n).map(|i| job(&(100 + i).to_string())).collect();
        update(state, jobs_loaded(request, jobs)).0
    }

    #[test]
    fn test_start_state() {
        let (state, command) = DashboardState::start(20, Vec::new());
        assert_eq!(state.mode, Mode::List);
        assert!(state.loading());
        assert!(state.jobs.is_empty());
        assert!(state.gpus.is_empty());
        assert_eq!(state.selected_index(), 0);
        assert_eq!(state.error, None);
        fetch_request(Some(command), FetchKind::Jobs);
    }

    #[test]
    fn test_jobs_loaded_clears_loading() {
        let state = loaded(3);
        assert!(!state.loading());
        assert_eq!(state.jobs.len(), 3);
        assert_eq!(state.requests.jobs.fetched_at, Some(at()));
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        // Deterministic pseudo-random walk over up/down/top/bottom
        for n in [0usize, 1, 2, 5] {
            let mut state = loaded(n);
            let mut seed: u32 = 0x2545_f491;
            for _ in 0..500 {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                let action = match (seed >> 16) % 4 {
                    0 => KeyAction::MoveUp,
                    1 => KeyAction::MoveDown,
                    2 => KeyAction::MoveToTop,
                    _ => KeyAction::MoveToBottom,
                };
                state = key(state, action).0;
                if n == 0 {
                    assert_eq!(state.selected_index(), 0);
                } else {
                    assert!(state.selected_index() < n);
                }
            }
        }
    }

    #[test]
    fn test_selection_no_wraparound() {
        let state = loaded(2);
        let state = key(state, KeyAction::MoveUp).0;
        assert_eq!(state.selected_index(), 0);

        let state = key(state, KeyAction::MoveDown).0;
        let state = key(state, KeyAction::MoveDown).0;
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_selection_clamped_when_list_shrinks() {
        let state = loaded(5);
        let state = key(state, KeyAction::MoveToBottom).0;
        assert_eq!(state.selected_index(), 4);

        let (state, command) = key(state, KeyAction::Refresh);
        let request = fetch_request(command, FetchKind::Jobs);
        let state = update(state, jobs_loaded(request, vec![job("1"), job("2")])).0;
        assert_eq!(state.selected_index(), 1);

        let (state, command) = key(state, KeyAction::Refresh);
        let request = fetch_request(command, FetchKind::Jobs);
        let state = update(state, jobs_loaded(request, Vec::new())).0;
        assert_eq!(state.selected_index(), 0);
    }

    #[test]
    fn test_refresh_sets_loading() {
        let (state, command) = key(loaded(1), KeyAction::Refresh);
        fetch_request(command, FetchKind::Jobs);
        assert!(state.loading());
        // Data is kept until the new snapshot arrives
        assert_eq!(state.jobs.len(), 1);
    }

    #[test]
    fn test_latest_refresh_wins_regardless_of_completion_order() {
        let base = loaded(1);
        let (base, first) = key(base, KeyAction::Refresh);
        let first = fetch_request(first, FetchKind::Jobs);
        let (base, second) = key(base, KeyAction::Refresh);
        let second = fetch_request(second, FetchKind::Jobs);

        let old = vec![job("old")];
        let new = vec![job("new-1"), job("new-2")];

        // In order: first then second
        let in_order = update(base.clone(), jobs_loaded(first, old.clone())).0;
        assert!(in_order.loading(), "stale result must not clear loading");
        let in_order = update(in_order, jobs_loaded(second, new.clone())).0;

        // Reversed: second then first
        let reversed = update(base, jobs_loaded(second, new.clone())).0;
        let reversed = update(reversed, jobs_loaded(first, old)).0;

        assert_eq!(in_order, reversed);
        assert_eq!(reversed.jobs, new);
        assert!(!reversed.loading());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let (state, first) = key(loaded(1), KeyAction::Refresh);
        let first = fetch_request(first, FetchKind::Jobs);
        let (state, second) = key(state, KeyAction::Refresh);
        let second = fetch_request(second, FetchKind::Jobs);

        let state = update(state, jobs_loaded(second, vec![job("fresh")])).0;
        let state = update(state, failed(FetchKind::Jobs, first, "timeout")).0;
        assert_eq!(state.error, None);
        assert_eq!(state.jobs[0].id, "fresh");
    }

    #[test]
    fn test_failure_then_success() {
        let (state, command) = DashboardState::start(20, Vec::new());
        let request = fetch_request(Some(command), FetchKind::Jobs);
        assert!(state.loading());

        let state = update(state, failed(FetchKind::Jobs, request, "squeue not found")).0;
        assert!(!state.loading());
        assert_eq!(state.error_message(), Some("squeue not found"));

        let (state, command) = key(state, KeyAction::Refresh);
        let request = fetch_request(command, FetchKind::Jobs);
        // Starting a new fetch of the same kind clears the error
        assert_eq!(state.error, None);

        let state = update(state, failed(FetchKind::Jobs, request, "again")).0;
        assert_eq!(state.error_message(), Some("again"));

        let state = update(state, jobs_loaded(request, vec![job("1")])).0;
        // Already completed by the failure; a duplicate completion is stale
        assert_eq!(state.error_message(), Some("again"));

        let (state, command) = key(state, KeyAction::Refresh);
        let request = fetch_request(command, FetchKind::Jobs);
        let state = update(state, jobs_loaded(request, vec![job("1")])).0;
        assert_eq!(state.error, None);
        assert_eq!(state.jobs.len(), 1);
    }

    #[test]
    fn test_jobs_loaded_clears_jobs_error() {
        let (state, command) = DashboardState::start(20, Vec::new());
        let first = fetch_request(Some(command), FetchKind::Jobs);
        let state = update(state, failed(FetchKind::Jobs, first, "boom")).0;

        // Auto-refresh issues the next fetch; its success clears the message
        let (state, command) = update(state, AppEvent::Data(DataEvent::RefreshTick));
        let second = fetch_request(command, FetchKind::Jobs);
        let state = update(state, jobs_loaded(second, vec![job("1")])).0;
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_enter_and_escape() {
        let (state, command) = key(loaded(2), KeyAction::MoveDown);
        assert_eq!(command, None);
        let (state, command) = key(state, KeyAction::Select);
        assert_eq!(command, None);
        assert_eq!(state.mode, Mode::Detail);
        assert_eq!(state.selected_job().map(|j| j.id.as_str()), Some("101"));

        let (state, _) = key(state, KeyAction::Back);
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.selected_index(), 1);
    }

    #[test]
    fn test_detail_with_no_jobs_is_valid() {
        let state = key(loaded(0), KeyAction::Select).0;
        assert_eq!(state.mode, Mode::Detail);
        assert!(state.selected_job().is_none());
    }

    #[test]
    fn test_detail_ignores_navigation() {
        let state = key(loaded(3), KeyAction::Select).0;
        let (state, command) = key(state, KeyAction::MoveDown);
        assert_eq!(command, None);
        assert_eq!(state.selected_index(), 0);
        let (state, command) = key(state, KeyAction::Refresh);
        assert_eq!(command, None);
        assert!(!state.loading());
    }

    #[test]
    fn test_first_cluster_entry_fetches_gpus() {
        let (state, command) = key(loaded(1), KeyAction::ToggleCluster);
        assert_eq!(state.mode, Mode::Cluster);
        let request = fetch_request(command, FetchKind::Gpus);
        assert!(state.loading());

        // Leaving and re-entering while the fetch is outstanding does not refetch
        let (state, command) = key(state, KeyAction::ToggleCluster);
        assert_eq!(state.mode, Mode::List);
        assert_eq!(command, None);
        let (state, command) = key(state, KeyAction::ToggleCluster);
        assert_eq!(command, None);

        let state = update(state, gpus_loaded(request, vec![gpu(0), gpu(1)])).0;
        assert!(!state.loading());
        assert_eq!(state.gpus.len(), 2);

        // Already loaded: no fetch on later entries
        let (state, _) = key(state, KeyAction::ToggleCluster);
        let (_, command) = key(state, KeyAction::ToggleCluster);
        assert_eq!(command, None);
    }

    #[test]
    fn test_cluster_entry_retries_after_failed_gpu_fetch() {
        let (state, command) = key(loaded(1), KeyAction::ToggleCluster);
        let request = fetch_request(command, FetchKind::Gpus);
        let failure = failed(FetchKind::Gpus, request, "nvidia-smi missing");
        let (state, _) = update(state, failure);
        assert_eq!(state.error_message(), Some("nvidia-smi missing"));

        let (state, _) = key(state, KeyAction::ToggleCluster);
        let (state, command) = key(state, KeyAction::ToggleCluster);
        fetch_request(command, FetchKind::Gpus);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_cluster_refresh_fetches_gpus() {
        let (state, command) = key(loaded(1), KeyAction::ToggleCluster);
        let request = fetch_request(command, FetchKind::Gpus);
        let state = update(state, gpus_loaded(request, vec![gpu(0)])).0;

        let (state, command) = key(state, KeyAction::Refresh);
        fetch_request(command, FetchKind::Gpus);
        assert!(state.loading());
    }

    #[test]
    fn test_toggle_does_not_touch_data() {
        let (state, command) = key(loaded(3), KeyAction::ToggleCluster);
        let request = fetch_request(command, FetchKind::Gpus);
        let state = update(state, gpus_loaded(request, vec![gpu(0)])).0;
        let state = key(state, KeyAction::ToggleCluster).0;

        let jobs_before = state.jobs.clone();
        let gpus_before = state.gpus.clone();

        let mut state = state;
        for _ in 0..4 {
            state = key(state, KeyAction::ToggleCluster).0;
        }
        assert_eq!(state.mode, Mode::List);
        assert_eq!(state.jobs, jobs_before);
        assert_eq!(state.gpus, gpus_before);
    }

    #[test]
    fn test_cluster_toggle_does_not_cancel_jobs_fetch() {
        let (state, command) = DashboardState::start(20, Vec::new());
        let jobs_request = fetch_request(Some(command), FetchKind::Jobs);
        let (state, command) = key(state, KeyAction::ToggleCluster);
        let gpu_request = fetch_request(command, FetchKind::Gpus);

        assert!(state.requests.is_outstanding(FetchKind::Jobs));
        assert!(state.requests.is_outstanding(FetchKind::Gpus));

        // Completions of different kinds may arrive in any order
        let state = update(state, gpus_loaded(gpu_request, vec![gpu(0)])).0;
        let state = update(state, jobs_loaded(jobs_request, vec![job("1")])).0;
        assert_eq!(state.jobs.len(), 1);
        assert_eq!(state.gpus.len(), 1);
        assert!(!state.loading());
    }

    #[test]
    fn test_loading_follows_current_view() {
        let (state, command) = DashboardState::start(20, Vec::new());
        let jobs_request = fetch_request(Some(command), FetchKind::Jobs);
        let (state, command) = key(state, KeyAction::ToggleCluster);
        let gpu_request = fetch_request(command, FetchKind::Gpus);

        let state = update(state, gpus_loaded(gpu_request, Vec::new())).0;
        // Cluster view: gpu fetch done, jobs fetch irrelevant
        assert!(!state.loading());

        let state = key(state, KeyAction::ToggleCluster).0;
        assert!(state.loading());
        let state = update(state, jobs_loaded(jobs_request, Vec::new())).0;
        assert!(!state.loading());
    }

    #[test]
    fn test_gpu_failure_does_not_clear_jobs_loading() {
        let (state, command) = DashboardState::start(20, Vec::new());
        fetch_request(Some(command), FetchKind::Jobs);
        let (state, command) = key(state, KeyAction::ToggleCluster);
        let gpu_request = fetch_request(command, FetchKind::Gpus);

        let state = update(state, failed(FetchKind::Gpus, gpu_request, "no gpus")).0;
        assert!(state.requests.is_outstanding(FetchKind::Jobs));
        assert_eq!(state.error.as_ref().map(|e| e.kind), Some(FetchKind::Gpus));
    }

    #[test]
    fn test_quit_from_every_mode() {
        let list = loaded(2);
        let detail = key(list.clone(), KeyAction::Select).0;
        let cluster = key(list.clone(), KeyAction::ToggleCluster).0;
        let help = key(list.clone(), KeyAction::ShowHelp).0;

        for state in [list, detail, cluster, help] {
            let (_, command) = key(state, KeyAction::Quit);
            assert_eq!(command, Some(Command::Quit));
        }
    }

    #[test]
    fn test_quit_with_outstanding_fetches() {
        let (state, _) = DashboardState::start(20, Vec::new());
        let (state, _) = key(state, KeyAction::ToggleCluster);
        assert!(state.requests.is_outstanding(FetchKind::Jobs));
        let (_, command) = key(state, KeyAction::Quit);
        assert_eq!(command, Some(Command::Quit));
    }

    #[test]
    fn test_help_returns_to_previous_mode() {
        let state = key(loaded(1), KeyAction::ToggleCluster).0;
        let state = key(state, KeyAction::ShowHelp).0;
        assert_eq!(state.mode, Mode::Help);
        assert_eq!(state.data_kind(), FetchKind::Gpus);

        // Other keys are ignored in help
        let (state, command) = key(state, KeyAction::Refresh);
        assert_eq!(command, None);
        assert_eq!(state.mode, Mode::Help);

        let state = key(state, KeyAction::Back).0;
        assert_eq!(state.mode, Mode::Cluster);

        let state = key(loaded(1), KeyAction::Select).0;
        let state = key(state, KeyAction::ShowHelp).0;
        let state = key(state, KeyAction::ShowHelp).0;
        assert_eq!(state.mode, Mode::Detail);
    }

    #[test]
    fn test_unknown_keys_are_noops() {
        for state in [loaded(2), key(loaded(2), KeyAction::Select).0] {
            let (next, command) = key(state.clone(), KeyAction::Unknown);
            assert_eq!(command, None);
            assert_eq!(next, state);
        }
    }

    #[test]
    fn test_refresh_tick_skips_outstanding_kind() {
        let (state, _) = DashboardState::start(20, Vec::new());
        let (state, command) = update(state, AppEvent::Data(DataEvent::RefreshTick));
        assert_eq!(command, None);

        let state = loaded(1);
        let (state, command) = update(state, AppEvent::Data(DataEvent::RefreshTick));
        fetch_request(command, FetchKind::Jobs);

        let (state, command) = key(state, KeyAction::ToggleCluster);
        let request = fetch_request(command, FetchKind::Gpus);
        let state = update(state, gpus_loaded(request, Vec::new())).0;
        let (_, command) = update(state, AppEvent::Data(DataEvent::RefreshTick));
        fetch_request(command, FetchKind::Gpus);
    }

    #[test]
    fn test_resize_records_rows() {
        let (state, command) = update(loaded(1), AppEvent::Resize(120, 40));
        assert_eq!(command, None);
        assert_eq!(state.terminal_rows, 40);
    }
}
