//! GPU telemetry via `nvidia-smi`
//!
//! Samples every GPU visible on the local node and attributes each one to a
//! Slurm job through the cgroup of the processes running on it.

use std::path::{Path, PathBuf};
use std::process::Command;

use super::{FetchError, run_command};
use crate::models::GpuUsage;

const GPU_QUERY: &str = "--query-gpu=index,uuid,memory.used,memory.total,utilization.gpu";
const APPS_QUERY: &str = "--query-compute-apps=gpu_uuid,pid";
const CSV_FORMAT: &str = "--format=csv,noheader,nounits";

/// One row of the `--query-gpu` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuRecord {
    pub index: u32,
    pub uuid: String,
    pub mem_used_mb: u64,
    pub mem_total_mb: u64,
    pub utilization_percent: u8,
}

/// Parse a numeric nvidia-smi field; `[N/A]` and friends read as zero.
fn parse_metric(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.starts_with('[') || field.eq_ignore_ascii_case("n/a") {
        return Some(0);
    }
    field.parse().ok()
}

/// Parse `nvidia-smi --query-gpu=index,uuid,memory.used,memory.total,utilization.gpu` CSV.
pub fn parse_gpu_query(output: &str) -> Result<Vec<GpuRecord>, FetchError> {
    let malformed = |line: usize, reason: String| FetchError::Malformed {
        command: "nvidia-smi".to_string(),
        line,
        reason,
    };

    let rows: Vec<(usize, &str)> = output
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(FetchError::EmptyResponse {
            command: "nvidia-smi".to_string(),
        });
    }

    rows.into_iter()
        .map(|(idx, line)| {
            let parts: Vec<&str> = line.split(',').map(str::trim).collect();
            if parts.len() != 5 {
                return Err(malformed(
                    idx + 1,
                    format!("expected 5 fields, got {}", parts.len()),
                ));
            }

            let invalid = |field: &str, value: &str| {
                malformed(idx + 1, format!("invalid {field} '{value}'"))
            };

            let index = parts[0]
                .parse()
                .map_err(|_| invalid("GPU index", parts[0]))?;
            let mem_used_mb = parse_metric(parts[2])
                .ok_or_else(|| invalid("memory.used", parts[2]))?;
            let mem_total_mb = parse_metric(parts[3])
                .ok_or_else(|| invalid("memory.total", parts[3]))?;
            let utilization = parse_metric(parts[4])
                .ok_or_else(|| invalid("utilization.gpu", parts[4]))?;

            Ok(GpuRecord {
                index,
                uuid: parts[1].to_string(),
                mem_used_mb,
                mem_total_mb,
                utilization_percent: utilization.min(100) as u8,
            })
        })
        .collect()
}

/// Parse `--query-compute-apps=gpu_uuid,pid` CSV into `(gpu_uuid, pid)` pairs.
///
/// Unparseable rows are skipped; job attribution is best-effort.
pub fn parse_compute_apps(output: &str) -> Vec<(String, u32)> {
    output
        .lines()
        .filter_map(|line| {
            let (uuid, pid) = line.split_once(',')?;
            let pid = pid.trim().parse().ok()?;
            Some((uuid.trim().to_string(), pid))
        })
        .collect()
}

/// Extract the Slurm job id from the contents of `/proc/<pid>/cgroup`.
///
/// Slurm places job processes under a `job_<id>` cgroup on both cgroup v1
/// (`/slurm/uid_1000/job_42/step_0`) and v2 (`/system.slice/slurmstepd.scope/job_42/...`).
pub fn job_id_from_cgroup(contents: &str) -> Option<String> {
    contents
        .lines()
        .flat_map(|line| line.split('/'))
        .find_map(|segment| {
            let id = segment.strip_prefix("job_")?;
            (!id.is_empty() && id.chars().all(|c| c.is_ascii_digit())).then(|| id.to_string())
        })
}

/// Short hostname of this node
fn local_hostname() -> String {
    let name = std::fs::read_to_string("/proc/sys/kernel/hostname")
        .ok()
        .or_else(|| std::env::var("HOSTNAME").ok())
        .unwrap_or_default();
    let short = name.trim().split('.').next().unwrap_or_default();
    if short.is_empty() {
        "localhost".to_string()
    } else {
        short.to_string()
    }
}

/// `nvidia-smi` wrapper for one node
#[derive(Debug, Clone)]
pub struct NvidiaSmi {
    path: PathBuf,
    node: String,
}

impl NvidiaSmi {
    pub fn new(path: PathBuf, node: String) -> Self {
        Self { path, node }
    }

    /// Use the configured binary, else the one on PATH, for the local node
    pub fn from_config(config_path: Option<&Path>) -> Self {
        let path = config_path
            .map(Path::to_path_buf)
            .or_else(|| which::which("nvidia-smi").ok())
            .unwrap_or_else(|| PathBuf::from("nvidia-smi"));
        Self::new(path, local_hostname())
    }

    fn command(&self, query: &str) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.arg(query).arg(CSV_FORMAT);
        cmd
    }

    /// Sample all GPUs on this node
    pub fn query(&self) -> Result<Vec<GpuUsage>, FetchError> {
        let stdout = run_command(self.command(GPU_QUERY), "nvidia-smi")?;
        let records = parse_gpu_query(&stdout)?;

        // Attribution failures only lose the job column, not the sample
        let apps = match run_command(self.command(APPS_QUERY), "nvidia-smi") {
            Ok(out) => parse_compute_apps(&out),
            Err(e) => {
                tracing::warn!(error = %e, "could not list GPU compute processes");
                Vec::new()
            }
        };

        let owners: Vec<(String, String)> = apps
            .into_iter()
            .filter_map(|(uuid, pid)| {
                let cgroup = std::fs::read_to_string(format!("/proc/{pid}/cgroup")).ok()?;
                job_id_from_cgroup(&cgroup).map(|job| (uuid, job))
            })
            .collect();

        Ok(attach_jobs(&self.node, records, &owners))
    }
}

/// Combine GPU records with `(gpu_uuid, job_id)` ownership pairs.
///
/// A GPU shared by several jobs lists them comma-separated in first-seen order.
fn attach_jobs(node: &str, records: Vec<GpuRecord>, owners: &[(String, String)]) -> Vec<GpuUsage> {
    records
        .into_iter()
        .map(|record| {
            let mut jobs: Vec<&str> = Vec::new();
            for (uuid, job) in owners {
                if *uuid == record.uuid && !jobs.contains(&job.as_str()) {
                    jobs.push(job);
                }
            }

            GpuUsage {
                node: node.to_string(),
                gpu_index: record.index,
                mem_used_mb: record.mem_used_mb,
                mem_total_mb: record.mem_total_mb,
                utilization_percent: record.utilization_percent,
                job_id: (!jobs.is_empty()).then(|| jobs.join(",")),
            }
        })
        .collect()
}
