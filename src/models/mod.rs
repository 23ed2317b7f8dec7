//! Data model for the dashboard
//!
//! Plain snapshot records (jobs, GPU samples) and configuration.

pub mod config;
pub mod gpu;
pub mod job;

pub use config::TuiConfig;
pub use gpu::GpuUsage;
pub use job::{Job, JobState};
