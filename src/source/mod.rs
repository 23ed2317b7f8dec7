//! Data sources for job and GPU snapshots
//!
//! The dashboard only depends on the [`ClusterSource`] contract: produce a
//! full snapshot of jobs or GPU samples, or fail with a [`FetchError`].
//! Implementations are blocking; the fetch pipeline runs them off the UI
//! thread.

mod memory;
mod nvidia;
mod slurm;

pub use memory::MemorySource;
pub use nvidia::{GpuRecord, NvidiaSmi, job_id_from_cgroup, parse_compute_apps, parse_gpu_query};
pub use slurm::{SQUEUE_FORMAT, SlurmSource, find_slurm_bin_path, parse_squeue_output};

use thiserror::Error;

use crate::models::{GpuUsage, Job};

/// Why a fetch produced no snapshot.
///
/// This is the only error the dashboard recovers from; it is shown in the
/// UI and cleared by the next fetch of the same kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The command could not be started (not installed, permission denied)
    #[error("failed to execute {command}: {reason}")]
    Spawn { command: String, reason: String },

    /// The command ran but exited unsuccessfully
    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The command produced no output at all
    #[error("{command} returned an empty response")]
    EmptyResponse { command: String },

    /// Output could not be parsed
    #[error("malformed {command} output at line {line}: {reason}")]
    Malformed {
        command: String,
        line: usize,
        reason: String,
    },

    /// Source is unreachable for another reason (e.g. the fetch task died)
    #[error("{0}")]
    Unavailable(String),
}

/// A provider of cluster snapshots.
pub trait ClusterSource: Send + Sync {
    /// Fetch the full job list
    fn fetch_jobs(&self) -> Result<Vec<Job>, FetchError>;

    /// Fetch per-GPU usage samples
    fn fetch_gpu_usage(&self) -> Result<Vec<GpuUsage>, FetchError>;
}

/// Run a command and return its stdout, mapping every failure to a [`FetchError`].
pub(crate) fn run_command(
    mut cmd: std::process::Command,
    name: &str,
) -> Result<String, FetchError> {
    tracing::debug!(command = name, "running data source command");

    let output = cmd.output().map_err(|e| FetchError::Spawn {
        command: name.to_string(),
        reason: e.to_string(),
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FetchError::CommandFailed {
            command: name.to_string(),
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let cmd = std::process::Command::new("/nonexistent/gmon-test-binary");
        let err = run_command(cmd, "squeue").unwrap_err();
        assert!(matches!(err, FetchError::Spawn { .. }));
        assert!(err.to_string().starts_with("failed to execute squeue"));
    }

    #[test]
    fn test_error_messages() {
        let err = FetchError::EmptyResponse {
            command: "nvidia-smi".to_string(),
        };
        assert_eq!(err.to_string(), "nvidia-smi returned an empty response");

        let err = FetchError::Malformed {
            command: "squeue".to_string(),
            line: 3,
            reason: "expected 7 fields, got 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed squeue output at line 3: expected 7 fields, got 2"
        );
    }
}
