#![forbid(unsafe_code)]

//! `mcpi`: estimate pi from the command line.

use anyhow::{anyhow, Context};
use clap::Parser;
use mcpi_core::config::MAX_TOML_INT;
use mcpi_core::{average_estimate_cancellable, entropy_rng, sample_count, seeded_rng, EstimatorConfig};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "mcpi", version, about = "Estimate pi by Monte Carlo sampling")]
struct Cli {
	/// Samples per trial (must be positive)
	#[arg(long, allow_negative_numbers = true)]
	samples: Option<i64>,
	/// Fixed generator seed (0..=i64::MAX); omit to seed from OS entropy
	#[arg(long, value_parser = clap::value_parser!(u64).range(..=MAX_TOML_INT))]
	seed: Option<u64>,
	/// Number of estimates to average
	#[arg(long)]
	trials: Option<u32>,
	/// Samples drawn between Ctrl-C checks
	#[arg(long)]
	chunk_size: Option<u64>,
	/// TOML config file (default: $MCPI_CONFIG)
	#[arg(long)]
	config: Option<PathBuf>,
	/// trace, debug, info, warn or error
	#[arg(long)]
	log_level: Option<String>,
	/// Print the result as JSON
	#[arg(long)]
	json: bool,
	/// Write the resolved configuration to this path and exit
	#[arg(long)]
	write_config: Option<PathBuf>,
}

/// Defaults < file < env < flags, validated once at the end.
fn resolve_config(cli: &Cli, env: impl Fn(&str) -> Option<String>) -> anyhow::Result<EstimatorConfig> {
	let path = cli.config.clone().or_else(|| env("MCPI_CONFIG").map(PathBuf::from));
	let mut cfg = match &path {
		Some(p) => EstimatorConfig::from_file(p).with_context(|| format!("loading {}", p.display()))?,
		None => EstimatorConfig::default(),
	};
	cfg.apply_env_from(&env).context("applying MCPI_* environment")?;

	if let Some(n) = cli.samples { cfg.samples = sample_count(n)?; }
	if let Some(s) = cli.seed { cfg.seed = Some(s); }
	if let Some(t) = cli.trials { cfg.trials = t; }
	if let Some(c) = cli.chunk_size { cfg.chunk_size = c; }
	if let Some(l) = &cli.log_level { cfg.log_level = l.clone(); }
	cfg.validate()?;
	Ok(cfg)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
	let level: tracing::Level = level.parse().map_err(|e| anyhow!("invalid log level {level}: {e}"))?;
	tracing_subscriber::fmt()
		.with_max_level(level)
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|e| anyhow!("tracing init failed: {e}"))
}

fn run(cfg: &EstimatorConfig, cancel: &AtomicBool) -> anyhow::Result<f64> {
	let mut rng = match cfg.seed {
		Some(seed) => seeded_rng(seed),
		None => {
			info!("no seed configured, seeding from entropy");
			entropy_rng()
		}
	};
	average_estimate_cancellable(cfg.samples, cfg.trials, cfg.chunk_size, &mut rng, cancel)
		.with_context(|| format!("estimating with {} samples x {} trials", cfg.samples, cfg.trials))
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let cfg = resolve_config(&cli, |key| std::env::var(key).ok())?;
	init_tracing(&cfg.log_level)?;

	if let Some(path) = &cli.write_config {
		cfg.write_to_file(path).with_context(|| format!("writing {}", path.display()))?;
		info!("wrote config to {}", path.display());
		return Ok(());
	}

	let cancel = Arc::new(AtomicBool::new(false));
	let flag = cancel.clone();
	ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)).context("installing Ctrl-C handler")?;

	info!(samples = cfg.samples, trials = cfg.trials, seed = ?cfg.seed, "starting estimation");
	let estimate = run(&cfg, &cancel)?;

	if cli.json {
		let out = json!({
			"samples": cfg.samples,
			"trials": cfg.trials,
			"seed": cfg.seed,
			"estimate": estimate,
		});
		println!("{out}");
	} else {
		println!("{estimate}");
	}
	Ok(())
}
