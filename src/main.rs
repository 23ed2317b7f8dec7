//! gmon - terminal dashboard for cluster jobs and GPU usage

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gmon::display::{format_gpus, format_jobs};
use gmon::models::TuiConfig;
use gmon::source::{ClusterSource, MemorySource, SlurmSource};

#[derive(Parser)]
#[command(name = "gmon")]
#[command(about = "Terminal dashboard for cluster jobs and GPU utilization", long_about = None)]
#[command(version)]
struct Cli {
    /// Use built-in sample data instead of squeue/nvidia-smi
    #[arg(long, global = true)]
    demo: bool,

    /// Show jobs of all users
    #[arg(short, long, global = true, conflicts_with = "user")]
    all: bool,

    /// Only show jobs of this user
    #[arg(short, long, global = true)]
    user: Option<String>,

    /// Write logs to this file (filter with GMON_LOG, e.g. GMON_LOG=debug)
    #[arg(long, global = true, value_name = "PATH", env = "GMON_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    #[command(alias = "ui")]
    Tui,

    /// Print the job list once
    Jobs {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print per-GPU usage once
    Gpus {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let (mut config, warnings) = TuiConfig::load()?;
    if cli.all {
        config.display.show_all_jobs = true;
        config.source.user = None;
    }
    if let Some(user) = &cli.user {
        config.source.user = Some(user.clone());
    }
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let source: Arc<dyn ClusterSource> = if cli.demo {
        Arc::new(MemorySource::demo())
    } else {
        Arc::new(SlurmSource::from_config(&config))
    };

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => gmon::tui::run(config, warnings, source),
        Commands::Jobs { json } => {
            let jobs = source.fetch_jobs()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&jobs)?);
            } else {
                println!("{}", format_jobs(&jobs));
            }
            Ok(())
        }
        Commands::Gpus { json } => {
            let gpus = source.fetch_gpu_usage()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&gpus)?);
            } else {
                println!("{}", format_gpus(&gpus, config.display.bar_width));
            }
            Ok(())
        }
    }
}

/// Install a file logger. The terminal belongs to the dashboard, so logs
/// never go to stderr.
fn init_logging(path: &std::path::Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file '{}'", path.display()))?;

    let filter = EnvFilter::try_from_env("GMON_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
    Ok(())
}
