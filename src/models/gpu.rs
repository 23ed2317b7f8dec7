//! Per-GPU utilization samples.

use serde::Serialize;

/// Point-in-time memory/utilization sample for one GPU on one node.
///
/// Identity is the `(node, gpu_index)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GpuUsage {
    pub node: String,
    pub gpu_index: u32,
    pub mem_used_mb: u64,
    pub mem_total_mb: u64,
    /// 0-100
    pub utilization_percent: u8,
    /// Owning job, `None` when the GPU is idle
    pub job_id: Option<String>,
}

impl GpuUsage {
    /// Memory usage ratio in `[0, 1]`. Zero when total memory is unknown.
    #[must_use]
    pub fn usage_ratio(&self) -> f64 {
        if self.mem_total_mb == 0 {
            return 0.0;
        }
        let used = self.mem_used_mb.min(self.mem_total_mb);
        used as f64 / self.mem_total_mb as f64
    }

    /// Number of filled segments in a bar of `width` segments, rounded down.
    #[must_use]
    pub fn fill_segments(&self, width: usize) -> usize {
        if self.mem_total_mb == 0 || width == 0 {
            return 0;
        }
        // Integer arithmetic keeps the floor exact (no float rounding at boundaries)
        let used = self.mem_used_mb.min(self.mem_total_mb) as u128;
        let filled = used * width as u128 / self.mem_total_mb as u128;
        (filled as usize).min(width)
    }

    /// True when no job is associated with this GPU
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.job_id.as_deref().is_none_or(str::is_empty)
    }
}
