//! gmon - terminal dashboard for cluster jobs and per-GPU utilization
//!
//! The interactive part lives in [`tui`]; [`source`] provides the data and
//! [`display`] the one-shot table output.

pub mod display;
pub mod formatting;
pub mod models;
pub mod source;
pub mod tui;
