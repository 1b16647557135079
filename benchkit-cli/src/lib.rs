#![warn(missing_docs)]
//! benchkit CLI Library
//!
//! Command-line front end for the benchmark harness and the rotating logger:
//! - `bench`: compare batched matrix-product strategies and log the report
//! - `log-demo`: flood a rotating log file and verify ordering across backups
//! - `init`: print a default `benchkit.toml`
//!
//! Settings come from `benchkit.toml` (discovered by walking up from the
//! current directory); command-line flags override it.

mod config;
mod rotation;
mod workload;

pub use config::*;
pub use rotation::{DEFAULT_MESSAGES, MESSAGE_PREFIX, check_boundaries, write_messages};
pub use workload::{Batch, STRATEGIES, Strategy, gram_iter_zip, gram_naive, gram_transposed};

use anyhow::{Context, bail};
use benchkit_core::{BenchmarkHarness, device_by_name};
use benchkit_log::{Level, Logger, LoggerConfig, MAX_BACKUPS};
use clap::{Args, Parser, Subcommand};
use regex::Regex;
use std::path::PathBuf;

/// benchkit CLI arguments
#[derive(Parser, Debug)]
#[command(name = "benchkit")]
#[command(author, version, about = "benchkit - microbenchmark harness and rotating logger")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: discover benchkit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Benchmark and compare matrix-product strategies
    Bench(BenchArgs),
    /// Exercise log rotation and verify message order across backups
    LogDemo(LogDemoArgs),
    /// Print a default benchkit.toml
    Init,
}

/// Arguments of `benchkit bench`
#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Select strategies by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Untimed calls before measurement (overrides config)
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Timed calls per strategy (overrides config)
    #[arg(long, short = 'n')]
    pub runs: Option<usize>,

    /// Matrices per batch
    #[arg(long, default_value = "8")]
    pub batch: usize,

    /// Rows per matrix
    #[arg(long, default_value = "64")]
    pub rows: usize,

    /// Columns per matrix
    #[arg(long, default_value = "128")]
    pub cols: usize,

    /// Seed for the input batch (random if not specified)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the comparison as JSON to this file
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Arguments of `benchkit log-demo`
#[derive(Args, Debug, Clone)]
pub struct LogDemoArgs {
    /// Rotating log file to fill
    #[arg(long, default_value = "logs/file_only.log")]
    pub log_file: PathBuf,

    /// Number of numbered messages to write
    #[arg(long, default_value_t = DEFAULT_MESSAGES)]
    pub messages: usize,
}

/// Run the benchkit CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the benchkit CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => BenchkitConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BenchkitConfig::discover().unwrap_or_default(),
    };

    match cli.command {
        Commands::Bench(ref args) => run_bench(args, &config),
        Commands::LogDemo(ref args) => run_log_demo(args),
        Commands::Init => {
            print!("{}", BenchkitConfig::default_toml());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "benchkit=debug" } else { "benchkit=info" };
    // A host application may already own the global subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Strategies whose name matches `filter`, in comparison order
pub fn select_strategies(filter: &Regex) -> Vec<(&'static str, Strategy)> {
    STRATEGIES
        .into_iter()
        .filter(|(name, _)| filter.is_match(name))
        .collect()
}

fn run_bench(args: &BenchArgs, config: &BenchkitConfig) -> anyhow::Result<()> {
    let filter = Regex::new(&args.filter)
        .with_context(|| format!("invalid filter pattern '{}'", args.filter))?;
    let strategies = select_strategies(&filter);
    let Some(&(first_name, first)) = strategies.first() else {
        let names: Vec<&str> = STRATEGIES.iter().map(|(name, _)| *name).collect();
        bail!(
            "no strategy matches '{}'. Available strategies: {}",
            args.filter,
            names.join(", ")
        );
    };

    let logger = Logger::new(&config.logging).context("failed to set up logger")?;
    let device = device_by_name(&config.runner.device)?;
    let harness = BenchmarkHarness::new(device, logger.clone());
    let options = config.runner.options(args.warmup, args.runs);
    options.validate()?;

    let batch = Batch::random(args.batch, args.rows, args.cols, args.seed);
    tracing::debug!(shape = ?batch.shape(), ?options, "input batch ready");

    logger.info("--- Single Function Benchmark ---");
    let result = harness.benchmark_function(first, &batch, &options)?;
    logger.info(&format!("{first_name}: {result}"));
    logger.info(&format!("Mean time: {:.4} ms", result.mean_ms));
    logger.info(&format!("Std dev: {:.4} ms", result.std_ms));

    logger.info("--- Function Comparison ---");
    let report = harness.compare_functions(strategies.iter().copied(), &batch, &options)?;
    harness.print_results(&report)?;

    if harness.device().is_accelerator() {
        logger.info("--- Memory Profiling ---");
        let memory = harness.profile_memory(first, &batch)?;
        logger.info(&format!("Memory allocated: {:.2} MB", memory.allocated_mb));
        logger.info(&format!("Peak memory: {:.2} MB", memory.peak_mb));
    } else {
        logger.debug(&format!(
            "Memory profiling skipped: device '{}' has no allocator counters",
            harness.device().name()
        ));
    }

    if let Some(path) = &args.json {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

fn run_log_demo(args: &LogDemoArgs) -> anyhow::Result<()> {
    let console = Logger::new(&LoggerConfig::new("ConsoleOnly"))?;
    let file_logger = Logger::new(
        &LoggerConfig::new("FileOnly")
            .with_file(&args.log_file)
            .with_level(Level::Info)
            .with_console(false),
    )
    .with_context(|| format!("failed to open {}", args.log_file.display()))?;

    write_messages(&file_logger, args.messages);
    let checks = check_boundaries(&console, &args.log_file);
    console.info("Done testing rotation...");

    let incorrect = checks.iter().filter(|c| !c.is_contiguous()).count();
    if incorrect > 0 {
        bail!("{incorrect} of {MAX_BACKUPS} rotation boundaries are incorrect");
    }
    Ok(())
}
