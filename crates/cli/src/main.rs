//! Prefetch simulator CLI.
//!
//! This binary provides a single entry point for driving simulations. It
//! performs:
//! 1. **Single run:** Execute one engine with defaults, a JSON config file,
//!    or flag overrides, and print the statistics report.
//! 2. **Comparison:** Run both engines over the identical generated trace
//!    and print a side-by-side summary.

use clap::{Parser, Subcommand};
use std::{fs, process};

use cmcsim_core::config::{Config, EngineKind, WorkloadKind};
use cmcsim_core::stats::SimStats;

#[derive(Parser, Debug)]
#[command(
    name = "cmcsim",
    author,
    version,
    about = "Trace-driven block-prefetch simulator",
    long_about = "Evaluate clustered-Markov-chain prefetching against sequential read-ahead.\n\nConfiguration comes from built-in defaults, a JSON file, or per-flag overrides.\n\nExamples:\n  cmcsim run --workload kvm --events 15000\n  cmcsim run --config experiment.json --json\n  cmcsim compare --workload kernel --seed 7"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flag overrides shared by both subcommands.
#[derive(clap::Args, Debug)]
struct ConfigArgs {
    /// JSON configuration file; flags below override its fields.
    #[arg(long)]
    config: Option<String>,

    /// Workload kind: kvm, kernel, mixed, or synthetic.
    #[arg(long)]
    workload: Option<String>,

    /// Number of read events to generate.
    #[arg(long)]
    events: Option<u64>,

    /// Block id range.
    #[arg(long)]
    block_range: Option<u64>,

    /// Trace seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Chunk size in blocks.
    #[arg(long)]
    chunk: Option<u64>,

    /// Cluster size in chunks.
    #[arg(long)]
    cluster: Option<u64>,

    /// Cache capacity in blocks.
    #[arg(long)]
    cache: Option<u64>,

    /// Prefetch window in blocks (0 disables prefetching).
    #[arg(long)]
    window: Option<u64>,

    /// Sequential probability for synthetic workloads.
    #[arg(long)]
    sequential_prob: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single engine and print its statistics.
    Run {
        /// Engine to drive: cmc or ra.
        #[arg(long, default_value = "cmc")]
        engine: String,

        #[command(flatten)]
        config: ConfigArgs,

        /// Print the statistics record as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Run both engines over the identical trace and compare.
    Compare {
        #[command(flatten)]
        config: ConfigArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            engine,
            config,
            json,
        } => cmd_run(&engine, &config, json),
        Commands::Compare { config } => cmd_compare(&config),
    }
}

/// Builds the run configuration from file, defaults, and flag overrides.
fn build_config(args: &ConfigArgs) -> Config {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {}: {}", path, e);
                process::exit(1);
            });
            serde_json::from_str(&text).unwrap_or_else(|e| {
                eprintln!("Error parsing config {}: {}", path, e);
                process::exit(1);
            })
        }
        None => Config::default(),
    };

    if let Some(kind) = &args.workload {
        config.workload_kind = parse_workload(kind);
    }
    if let Some(events) = args.events {
        config.n_events = events;
    }
    if let Some(range) = args.block_range {
        config.block_range = range;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(chunk) = args.chunk {
        config.chunk_size_blocks = chunk;
    }
    if let Some(cluster) = args.cluster {
        config.cluster_size_chunks = cluster;
    }
    if let Some(cache) = args.cache {
        config.cache_size_blocks = cache;
    }
    if let Some(window) = args.window {
        config.prefetch_window_blocks = window;
    }
    if let Some(prob) = args.sequential_prob {
        config.sequential_prob = prob;
    }
    config
}

fn parse_workload(name: &str) -> WorkloadKind {
    match name {
        "kvm" => WorkloadKind::Kvm,
        "kernel" => WorkloadKind::Kernel,
        "mixed" => WorkloadKind::Mixed,
        "synthetic" => WorkloadKind::Synthetic,
        other => {
            eprintln!("Error: unknown workload '{}' (expected kvm, kernel, mixed, synthetic)", other);
            process::exit(1);
        }
    }
}

fn parse_engine(name: &str) -> EngineKind {
    match name {
        "cmc" => EngineKind::Cmc,
        "ra" | "readahead" => EngineKind::Ra,
        other => {
            eprintln!("Error: unknown engine '{}' (expected cmc or ra)", other);
            process::exit(1);
        }
    }
}

/// Runs one engine and prints the report or the JSON record.
fn cmd_run(engine: &str, args: &ConfigArgs, json: bool) {
    let mut config = build_config(args);
    config.engine = parse_engine(engine);

    let stats = run_or_exit(&config);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).expect("stats serialize")
        );
    } else {
        stats.print();
    }
}

/// Runs both engines over the identical generated trace and prints a
/// side-by-side comparison.
fn cmd_compare(args: &ConfigArgs) {
    let base = build_config(args);

    let mut cmc_config = base.clone();
    cmc_config.engine = EngineKind::Cmc;
    let cmc = run_or_exit(&cmc_config);

    let mut ra_config = base.clone();
    ra_config.engine = EngineKind::Ra;
    let ra = run_or_exit(&ra_config);

    println!("\n==========================================================");
    println!("CMC vs READ-AHEAD");
    println!("==========================================================");
    println!("{:<24} {:>14} {:>14}", "metric", "cmc", "ra");
    println!(
        "{:<24} {:>13.2}% {:>13.2}%",
        "hit_rate",
        cmc.hit_rate * 100.0,
        ra.hit_rate * 100.0
    );
    println!(
        "{:<24} {:>13.2}% {:>13.2}%",
        "prefetch_efficiency",
        cmc.prefetch_efficiency * 100.0,
        ra.prefetch_efficiency * 100.0
    );
    println!(
        "{:<24} {:>14} {:>14}",
        "prefetch_issued", cmc.prefetch_issued, ra.prefetch_issued
    );
    println!(
        "{:<24} {:>14} {:>14}",
        "prefetch_used", cmc.prefetch_used, ra.prefetch_used
    );
    println!(
        "{:<24} {:>14} {:>14}",
        "memory_bytes", cmc.memory_bytes, ra.memory_bytes
    );
    println!("==========================================================");

    let delta = (cmc.hit_rate - ra.hit_rate) * 100.0;
    println!("hit-rate delta (cmc - ra): {:+.2} points", delta);
}

fn run_or_exit(config: &Config) -> SimStats {
    cmcsim_core::run(config).unwrap_or_else(|e| {
        eprintln!("Error: invalid configuration: {}", e);
        process::exit(1);
    })
}
