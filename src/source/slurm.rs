//! Slurm-backed source
//!
//! Jobs come from `squeue` with a fixed pipe-separated output format; GPU
//! samples come from `nvidia-smi` on the local node (see [`NvidiaSmi`]).

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{ClusterSource, FetchError, NvidiaSmi, run_command};
use crate::models::{GpuUsage, Job};

/// `squeue` output format: id, user, partition, state, elapsed, nodes, name.
///
/// The name goes last because it is the only field that may contain `|`.
pub const SQUEUE_FORMAT: &str = "%i|%u|%P|%t|%M|%D|%j";

const SQUEUE_FIELDS: usize = 7;

/// Find the directory containing Slurm binaries.
///
/// Resolution order:
/// 1. Explicit path from configuration, if it is an existing directory
/// 2. The directory of `squeue` found on PATH
/// 3. `/usr/bin`
pub fn find_slurm_bin_path(config_path: Option<&Path>) -> PathBuf {
    if let Some(path) = config_path {
        if path.is_dir() {
            return path.to_path_buf();
        }
        tracing::warn!(
            path = %path.display(),
            "configured slurm_bin_path is not a directory, trying auto-detection"
        );
    }

    if let Ok(squeue_path) = which::which("squeue")
        && let Some(parent) = squeue_path.parent()
    {
        return parent.to_path_buf();
    }

    let fallback = PathBuf::from("/usr/bin");
    if !fallback.join("squeue").exists() {
        tracing::warn!("squeue not found in PATH or /usr/bin, job fetches will fail");
    }
    fallback
}

/// Parse `squeue -o SQUEUE_FORMAT` output (header line included).
///
/// No output at all is an empty response. A header without rows is a valid,
/// empty snapshot.
pub fn parse_squeue_output(output: &str) -> Result<Vec<Job>, FetchError> {
    let malformed = |line: usize, reason: String| FetchError::Malformed {
        command: "squeue".to_string(),
        line,
        reason,
    };

    let mut lines = output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_idx, header)) = lines.next() else {
        return Err(FetchError::EmptyResponse {
            command: "squeue".to_string(),
        });
    };

    let header_fields = header.split('|').count();
    if header_fields != SQUEUE_FIELDS {
        return Err(malformed(
            header_idx + 1,
            format!("expected a {SQUEUE_FIELDS}-column header, got {header_fields} column(s)"),
        ));
    }

    lines
        .map(|(idx, line)| {
            let fields: Vec<&str> = line.splitn(SQUEUE_FIELDS, '|').map(str::trim).collect();
            if fields.len() < SQUEUE_FIELDS {
                return Err(malformed(
                    idx + 1,
                    format!("expected {SQUEUE_FIELDS} fields, got {}", fields.len()),
                ));
            }
            if fields[0].is_empty() {
                return Err(malformed(idx + 1, "missing job id".to_string()));
            }

            Ok(Job {
                id: fields[0].to_string(),
                user: fields[1].to_string(),
                partition: fields[2].to_string(),
                state: fields[3].to_string(),
                elapsed_time: fields[4].to_string(),
                node_count: fields[5].to_string(),
                name: fields[6].to_string(),
            })
        })
        .collect()
}

/// Source backed by `squeue` and the local `nvidia-smi`.
#[derive(Debug, Clone)]
pub struct SlurmSource {
    slurm_bin_path: PathBuf,
    user: Option<String>,
    gpu: NvidiaSmi,
}

impl SlurmSource {
    pub fn new(slurm_bin_path: PathBuf, user: Option<String>, gpu: NvidiaSmi) -> Self {
        Self {
            slurm_bin_path,
            user,
            gpu,
        }
    }

    /// Build a source from configuration, auto-detecting binaries as needed
    pub fn from_config(config: &crate::models::TuiConfig) -> Self {
        Self::new(
            find_slurm_bin_path(config.system.slurm_bin_path.as_deref()),
            config.job_user_filter(),
            NvidiaSmi::from_config(config.system.nvidia_smi_path.as_deref()),
        )
    }

    fn squeue_command(&self) -> Command {
        let mut cmd = Command::new(self.slurm_bin_path.join("squeue"));
        cmd.arg("-o").arg(SQUEUE_FORMAT);
        if let Some(user) = &self.user {
            cmd.arg("-u").arg(user);
        }
        cmd
    }
}

impl ClusterSource for SlurmSource {
    fn fetch_jobs(&self) -> Result<Vec<Job>, FetchError> {
        let stdout = run_command(self.squeue_command(), "squeue")?;
        let jobs = parse_squeue_output(&stdout)?;
        tracing::debug!(count = jobs.len(), "parsed squeue output");
        Ok(jobs)
    }

    fn fetch_gpu_usage(&self) -> Result<Vec<GpuUsage>, FetchError> {
        self.gpu.query()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "JOBID|USER|PARTITION|ST|TIME|NODES|NAME";

    #[test]
    fn test_parse_rows() {
        let output = format!(
            "{HEADER}\n123|alice|gpu|R|10:00|2|train-model\n124|bob|cpu|PD|0:00|1-4|data-prep\n"
        );
        let jobs = parse_squeue_output(&output).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "123");
        assert_eq!(jobs[0].user, "alice");
        assert_eq!(jobs[0].state, "R");
        assert_eq!(jobs[0].elapsed_time, "10:00");
        assert_eq!(jobs[1].node_count, "1-4");
        assert_eq!(jobs[1].name, "data-prep");
    }

    #[test]
    fn test_name_may_contain_separator() {
        let output = format!("{HEADER}\n7|carol|gpu|R|1:00|1|sweep|lr=0.1\n");
        let jobs = parse_squeue_output(&output).unwrap();
        assert_eq!(jobs[0].name, "sweep|lr=0.1");
    }

    #[test]
    fn test_header_only_is_empty_snapshot() {
        let jobs = parse_squeue_output(&format!("{HEADER}\n")).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_no_output_is_empty_response() {
        assert!(matches!(
            parse_squeue_output(""),
            Err(FetchError::EmptyResponse { .. })
        ));
        assert!(matches!(
            parse_squeue_output("\n  \n"),
            Err(FetchError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn test_short_row_is_malformed() {
        let output = format!("{HEADER}\n123|alice|gpu\n");
        match parse_squeue_output(&output) {
            Err(FetchError::Malformed { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("got 3"));
            }
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_header_is_malformed() {
        let output = "JOBID PARTITION NAME USER ST TIME NODES\n";
        assert!(matches!(
            parse_squeue_output(output),
            Err(FetchError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn test_squeue_command_includes_user_filter() {
        let source = SlurmSource::new(
            PathBuf::from("/opt/slurm/bin"),
            Some("alice".to_string()),
            NvidiaSmi::new(PathBuf::from("nvidia-smi"), "node01".to_string()),
        );
        let cmd = source.squeue_command();
        assert_eq!(cmd.get_program(), "/opt/slurm/bin/squeue");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["-o", SQUEUE_FORMAT, "-u", "alice"]);
    }

    #[test]
    fn test_missing_squeue_is_fetch_error() {
        let gpu = NvidiaSmi::new(
            PathBuf::from("/nonexistent/nvidia-smi"),
            "node01".to_string(),
        );
        let source = SlurmSource::new(PathBuf::from("/nonexistent/slurm"), None, gpu);
        assert!(matches!(source.fetch_jobs(), Err(FetchError::Spawn { .. })));
        assert!(matches!(
            source.fetch_gpu_usage(),
            Err(FetchError::Spawn { .. })
        ));
    }
}
