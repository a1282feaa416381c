#![deny(unsafe_code)]
//! CGL demo binary.
//!
//! Drives a simulated optimisation workload through the closed loop and
//! prints the termination report as JSON. With `--storage-dir` the state
//! chain, audit trail and report are also written to disk.

mod workload;

use anyhow::Context;
use cgl_audit::Severity;
use cgl_orchestrator::{CycleOrchestrator, OrchestratorConfig, RunPlan};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workload::SimulatedWorkload;

/// Closed-loop governance demo
#[derive(Parser)]
#[command(name = "cgl-demo")]
#[command(about = "Run a simulated workload under closed-loop governance", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "CGL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for state_chain.json, audit_trail.json and the report
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Override the cycle cap
    #[arg(short, long)]
    max_cycles: Option<u32>,

    /// Make the work of this cycle fail
    #[arg(long)]
    fail_cycle: Option<u64>,

    /// Report the business objective met from this cycle on
    #[arg(long)]
    objective_at: Option<u64>,

    /// Quality the workload converges toward
    #[arg(long, default_value_t = 0.95)]
    target: f64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => OrchestratorConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => OrchestratorConfig::default(),
    };
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = Some(dir);
    }
    if let Some(n) = cli.max_cycles {
        config.max_cycles = n;
    }

    let plan = RunPlan::new(
        json!({"learning_rate": 0.05, "batch_size": 64, "target_quality": cli.target}),
        json!({"training_data_is_representative": true, "evaluator_is_deterministic": true}),
    );
    let mut work = SimulatedWorkload::new(cli.target, cli.fail_cycle, cli.objective_at);
    let mut orchestrator = CycleOrchestrator::new(config);

    let report = orchestrator
        .run(&plan, &mut work)
        .context("closed loop aborted")?;

    tracing::info!(
        quality = work.quality(),
        warnings = orchestrator.audit_trail().query_by_severity(Severity::Warning).len(),
        "workload finished"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.chains_intact() {
        anyhow::bail!("integrity check failed");
    }
    Ok(())
}
