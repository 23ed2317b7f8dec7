//! One-shot table output for `gmon jobs` and `gmon gpus`

use crate::formatting::{format_mb, thresholds, usage_bar};
use crate::models::{GpuUsage, Job, JobState};
use owo_colors::OwoColorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, Width, object::Rows},
};

/// Table row for job display
#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "JobID")]
    job_id: String,

    #[tabled(rename = "User")]
    user: String,

    #[tabled(rename = "Partition")]
    partition: String,

    #[tabled(rename = "State")]
    state: String,

    #[tabled(rename = "Time")]
    time: String,

    #[tabled(rename = "Nodes")]
    nodes: String,

    #[tabled(rename = "Name")]
    name: String,
}

/// Table row for GPU display
#[derive(Tabled)]
struct GpuRow {
    #[tabled(rename = "Node")]
    node: String,

    #[tabled(rename = "GPU")]
    gpu: u32,

    #[tabled(rename = "Memory")]
    memory: String,

    #[tabled(rename = "Used")]
    used: String,

    #[tabled(rename = "Util")]
    utilization: String,

    #[tabled(rename = "Job")]
    job: String,
}

/// Format job state with appropriate coloring
fn format_job_state(job: &Job) -> String {
    let state = job.state.as_str();
    match job.job_state() {
        JobState::Running => state.green().to_string(),
        JobState::Pending => state.yellow().to_string(),
        JobState::Completing => state.bright_yellow().to_string(),
        JobState::Completed => state.bright_blue().to_string(),
        JobState::Failed | JobState::Timeout => state.red().to_string(),
        JobState::Cancelled => state.magenta().to_string(),
        JobState::Other => state.white().to_string(),
    }
}

/// Format GPU utilization with threshold coloring
fn format_utilization(percent: u8) -> String {
    let text = format!("{}%", percent);
    let value = f64::from(percent);
    if value >= thresholds::UTILIZATION_CRITICAL {
        text.red().to_string()
    } else if value >= thresholds::UTILIZATION_HIGH {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}

fn table_string<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Width::wrap(200).keep_words(true))
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

pub fn format_jobs(jobs: &[Job]) -> String {
    if jobs.is_empty() {
        return "No jobs found".yellow().to_string();
    }

    let rows: Vec<JobRow> = jobs
        .iter()
        .map(|job| JobRow {
            job_id: job.id.clone(),
            user: job.user.clone(),
            partition: job.partition.clone(),
            state: format_job_state(job),
            time: job.elapsed_time.clone(),
            nodes: job.node_count.clone(),
            name: job.name.clone(),
        })
        .collect();

    let running = jobs
        .iter()
        .filter(|j| j.job_state() == JobState::Running)
        .count();
    let pending = jobs
        .iter()
        .filter(|j| j.job_state() == JobState::Pending)
        .count();

    format!(
        "{}\n{} jobs: {} running, {} pending",
        table_string(rows),
        jobs.len(),
        running.to_string().green(),
        pending.to_string().yellow()
    )
}

pub fn format_gpus(gpus: &[GpuUsage], bar_width: usize) -> String {
    if gpus.is_empty() {
        return "No GPUs found".yellow().to_string();
    }

    let rows: Vec<GpuRow> = gpus
        .iter()
        .map(|gpu| GpuRow {
            node: gpu.node.clone(),
            gpu: gpu.gpu_index,
            memory: usage_bar(gpu.fill_segments(bar_width), bar_width),
            used: format!(
                "{}/{} ({:.0}%)",
                format_mb(gpu.mem_used_mb),
                format_mb(gpu.mem_total_mb),
                gpu.usage_ratio() * 100.0
            ),
            utilization: format_utilization(gpu.utilization_percent),
            job: match gpu.job_id.as_deref() {
                Some(id) if !gpu.is_idle() => id.to_string(),
                _ => "idle".bright_black().to_string(),
            },
        })
        .collect();

    table_string(rows)
}
