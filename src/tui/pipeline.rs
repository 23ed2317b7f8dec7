//! Fetch execution
//!
//! Turns [`Command::Fetch`] into a detached tokio task that runs the blocking
//! [`ClusterSource`] call on the blocking pool and posts the tagged outcome
//! to the data channel. Tasks are never awaited or aborted: a superseded
//! result is discarded by the state machine when it arrives.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::source::{ClusterSource, FetchError};
use crate::tui::event::{Command, DataEvent, FetchKind, RequestId};

/// Executes fetch commands against a shared source
#[derive(Clone)]
pub struct FetchPipeline {
    source: Arc<dyn ClusterSource>,
    data_tx: mpsc::Sender<DataEvent>,
}

impl FetchPipeline {
    pub fn new(source: Arc<dyn ClusterSource>, data_tx: mpsc::Sender<DataEvent>) -> Self {
        Self { source, data_tx }
    }

    /// Start the work for a fetch command. Returns the task handle, or `None`
    /// for commands that are not fetches.
    pub fn dispatch(&self, command: Command) -> Option<JoinHandle<()>> {
        match command {
            Command::Fetch { kind, request } => Some(self.spawn_fetch(kind, request)),
            Command::Quit => None,
        }
    }

    fn spawn_fetch(&self, kind: FetchKind, request: RequestId) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let tx = self.data_tx.clone();

        tokio::spawn(async move {
            let result =
                tokio::task::spawn_blocking(move || fetch_event(source.as_ref(), kind, request))
                    .await;

            let event = match result {
                Ok(event) => event,
                Err(e) => DataEvent::FetchFailed {
                    kind,
                    request,
                    error: FetchError::Unavailable(format!("{kind} fetch task failed: {e}")),
                },
            };

            // Completions must not be dropped or the request stays outstanding,
            // so wait for channel capacity instead of try_send
            if tx.send(event).await.is_err() {
                tracing::debug!(%kind, %request, "event loop gone, dropping fetch result");
            }
        })
    }
}

/// Run one blocking fetch and wrap the outcome as a data event
fn fetch_event(source: &dyn ClusterSource, kind: FetchKind, request: RequestId) -> DataEvent {
    let outcome = match kind {
        FetchKind::Jobs => source.fetch_jobs().map(|jobs| DataEvent::JobsLoaded {
            request,
            jobs,
            fetched_at: Local::now(),
        }),
        FetchKind::Gpus => source.fetch_gpu_usage().map(|gpus| DataEvent::GpusLoaded {
            request,
            gpus,
            fetched_at: Local::now(),
        }),
    };

    outcome.unwrap_or_else(|error| DataEvent::FetchFailed {
        kind,
        request,
        error,
    })
}
