//! In-memory source with fixed snapshots
//!
//! Backs `--demo` mode and the tests: it returns the same configured
//! result on every call, optionally after an artificial delay.

use std::time::Duration;

use super::{ClusterSource, FetchError, parse_squeue_output};
use crate::models::{GpuUsage, Job};

/// `--demo` jobs, in the same format `squeue` is asked for
const DEMO_SQUEUE: &str = "\
JOBID|USER|PARTITION|ST|TIME|NODES|NAME
123|alice|gpu|R|00:10:00|2|train-model
124|bob|cpu|PD|00:00:00|1|data-prep
125|carol|gpu|R|1-02:13:44|1|eval-checkpoints
126|alice|gpu|PD|00:00:00|2-4|hyperparameter-sweep
";

#[derive(Debug, Clone)]
pub struct MemorySource {
    jobs: Result<Vec<Job>, FetchError>,
    gpus: Result<Vec<GpuUsage>, FetchError>,
    latency: Duration,
}

impl MemorySource {
    pub fn new(jobs: Vec<Job>, gpus: Vec<GpuUsage>) -> Self {
        Self {
            jobs: Ok(jobs),
            gpus: Ok(gpus),
            latency: Duration::ZERO,
        }
    }

    /// Make every job fetch fail with `error`
    #[must_use]
    pub fn with_job_failure(mut self, error: FetchError) -> Self {
        self.jobs = Err(error);
        self
    }

    /// Make every GPU fetch fail with `error`
    #[must_use]
    pub fn with_gpu_failure(mut self, error: FetchError) -> Self {
        self.gpus = Err(error);
        self
    }

    /// Block each fetch for `latency` before answering
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Sample cluster used by `--demo`
    pub fn demo() -> Self {
        let gpu = |node: &str, index: u32, used: u64, util: u8, job_id: Option<&str>| GpuUsage {
            node: node.to_string(),
            gpu_index: index,
            mem_used_mb: used,
            mem_total_mb: 81920,
            utilization_percent: util,
            job_id: job_id.map(str::to_string),
        };

        Self::new(
            parse_squeue_output(DEMO_SQUEUE).unwrap_or_default(),
            vec![
                gpu("gpu01", 0, 61440, 97, Some("123")),
                gpu("gpu01", 1, 59000, 94, Some("123")),
                gpu("gpu02", 0, 20480, 41, Some("125")),
                gpu("gpu02", 1, 0, 0, None),
            ],
        )
        .with_latency(Duration::from_secs(1))
    }

    fn wait(&self) {
        if !self.latency.is_zero() {
            std::thread::sleep(self.latency);
        }
    }
}

impl ClusterSource for MemorySource {
    fn fetch_jobs(&self) -> Result<Vec<Job>, FetchError> {
        self.wait();
        self.jobs.clone()
    }

    fn fetch_gpu_usage(&self) -> Result<Vec<GpuUsage>, FetchError> {
        self.wait();
        self.gpus.clone()
    }
}
