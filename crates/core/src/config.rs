//! Configuration system for the prefetch simulator.
//!
//! This module defines the configuration structure and enums used to
//! parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline simulation constants (chunking, cache, windows).
//! 2. **Structure:** A flat config record covering geometry, workload, and engine.
//! 3. **Enums:** Workload kind and policy engine selectors.
//! 4. **Validation:** Range checks that identify the offending field before any work runs.
//!
//! Configuration is supplied via JSON from an embedding process or use
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline simulation parameters when not
/// explicitly overridden by the caller.
mod defaults {
    /// Default chunk size (blocks per chunk).
    ///
    /// The chunk is the granularity at which chain transitions are learned;
    /// 16 blocks at 4 KiB/block is a 64 KiB chunk.
    pub const CHUNK_SIZE_BLOCKS: u64 = 16;

    /// Default cluster size (chunks per cluster).
    ///
    /// The cluster is the unit of lazy allocation for chain rows.
    pub const CLUSTER_SIZE_CHUNKS: u64 = 64;

    /// Default cache capacity in blocks (16 MiB at 4 KiB/block).
    pub const CACHE_SIZE_BLOCKS: u64 = 4096;

    /// Default prefetch window in blocks (one chunk).
    pub const PREFETCH_WINDOW_BLOCKS: u64 = 16;

    /// Default block address range; block ids are drawn from `[0, range)`.
    pub const BLOCK_RANGE: u64 = 30_000;

    /// Default trace length in read events.
    pub const N_EVENTS: u64 = 15_000;

    /// Default probability of a sequential event for `synthetic` workloads.
    pub const SEQUENTIAL_PROB: f64 = 0.6;

    /// Default trace seed.
    pub const SEED: u64 = 42;

    /// Default epoch length for the hit-rate trajectory.
    pub const EPOCH_SIZE: u64 = 1000;

    /// Default initial read-ahead window (128 KiB at 4 KiB/block).
    pub const RA_INITIAL_WINDOW_BLOCKS: u64 = 32;

    /// Default read-ahead window ceiling (2 MiB at 4 KiB/block).
    pub const RA_MAX_WINDOW_BLOCKS: u64 = 512;

    /// Upper bound on `chunk_size_blocks`.
    pub const CHUNK_SIZE_MAX: u64 = 1024;

    /// Upper bound on `cluster_size_chunks`.
    pub const CLUSTER_SIZE_MAX: u64 = 512;
}

/// Workload pattern selector for the trace generator.
///
/// Each kind is a per-event composition of sequential advances, short jumps
/// (within 64 blocks of the previous access), and long jumps anywhere in the
/// block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    /// VM-boot-like stream: 40% sequential, 35% short jumps, 25% long jumps.
    #[default]
    Kvm,
    /// Build-like stream: 30% sequential, 20% short jumps, 50% long jumps.
    Kernel,
    /// Per-event 50/50 interleave of `kvm` and `kernel` draws.
    Mixed,
    /// User-controlled mix: `sequential_prob` sequential, remainder split
    /// evenly between short and long jumps.
    Synthetic,
}

/// Prefetch policy engine selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Clustered-Markov-chain prediction engine.
    #[default]
    Cmc,
    /// Sequential read-ahead baseline with adaptive window.
    #[serde(alias = "readahead")]
    Ra,
}

/// Configuration record for a single simulation run.
///
/// All state created from a `Config` is owned by one run; nothing persists
/// across runs.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cmcsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.chunk_size_blocks, 16);
/// assert_eq!(config.cache_size_blocks, 4096);
/// ```
///
/// Deserializing from JSON (typical embedding usage):
///
/// ```
/// use cmcsim_core::config::{Config, EngineKind, WorkloadKind};
///
/// let json = r#"{
///     "chunk_size_blocks": 8,
///     "cluster_size_chunks": 32,
///     "cache_size_blocks": 8192,
///     "prefetch_window_blocks": 24,
///     "workload_kind": "kernel",
///     "engine": "ra"
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.chunk_size_blocks, 8);
/// assert_eq!(config.workload_kind, WorkloadKind::Kernel);
/// assert_eq!(config.engine, EngineKind::Ra);
/// assert_eq!(config.n_events, 15000);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Blocks per chunk; the granularity of chain learning.
    #[serde(default = "Config::default_chunk_size")]
    pub chunk_size_blocks: u64,

    /// Chunks per cluster; the unit of lazy chain allocation.
    #[serde(default = "Config::default_cluster_size")]
    pub cluster_size_chunks: u64,

    /// Cache capacity in blocks.
    #[serde(default = "Config::default_cache_size")]
    pub cache_size_blocks: u64,

    /// Prefetch window in blocks, issued from the start of the predicted
    /// chunk. Zero disables prefetching entirely.
    #[serde(default = "Config::default_prefetch_window")]
    pub prefetch_window_blocks: u64,

    /// Block id range; every generated block id falls in `[0, block_range)`.
    #[serde(default = "Config::default_block_range")]
    pub block_range: u64,

    /// Number of read events to generate.
    #[serde(default = "Config::default_n_events")]
    pub n_events: u64,

    /// Workload pattern.
    #[serde(default)]
    pub workload_kind: WorkloadKind,

    /// Sequential probability for `synthetic` workloads.
    #[serde(default = "Config::default_sequential_prob")]
    pub sequential_prob: f64,

    /// Trace generator seed. Identical seeds produce identical traces.
    #[serde(default = "Config::default_seed")]
    pub seed: u64,

    /// Policy engine driven by the run.
    #[serde(default)]
    pub engine: EngineKind,

    /// Accesses per epoch for the hit-rate trajectory.
    #[serde(default = "Config::default_epoch_size")]
    pub epoch_size: u64,

    /// Initial read-ahead window in blocks (read-ahead engine only).
    #[serde(default = "Config::default_ra_initial_window")]
    pub ra_initial_window_blocks: u64,

    /// Read-ahead window ceiling in blocks (read-ahead engine only).
    #[serde(default = "Config::default_ra_max_window")]
    pub ra_max_window_blocks: u64,
}

impl Config {
    /// Returns the default chunk size in blocks.
    fn default_chunk_size() -> u64 {
        defaults::CHUNK_SIZE_BLOCKS
    }

    /// Returns the default cluster size in chunks.
    fn default_cluster_size() -> u64 {
        defaults::CLUSTER_SIZE_CHUNKS
    }

    /// Returns the default cache capacity in blocks.
    fn default_cache_size() -> u64 {
        defaults::CACHE_SIZE_BLOCKS
    }

    /// Returns the default prefetch window in blocks.
    fn default_prefetch_window() -> u64 {
        defaults::PREFETCH_WINDOW_BLOCKS
    }

    /// Returns the default block range.
    fn default_block_range() -> u64 {
        defaults::BLOCK_RANGE
    }

    /// Returns the default trace length.
    fn default_n_events() -> u64 {
        defaults::N_EVENTS
    }

    /// Returns the default sequential probability for synthetic workloads.
    fn default_sequential_prob() -> f64 {
        defaults::SEQUENTIAL_PROB
    }

    /// Returns the default trace seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Returns the default trajectory epoch size.
    fn default_epoch_size() -> u64 {
        defaults::EPOCH_SIZE
    }

    /// Returns the default initial read-ahead window.
    fn default_ra_initial_window() -> u64 {
        defaults::RA_INITIAL_WINDOW_BLOCKS
    }

    /// Returns the default read-ahead window ceiling.
    fn default_ra_max_window() -> u64 {
        defaults::RA_MAX_WINDOW_BLOCKS
    }

    /// Validates every field against its documented constraint.
    ///
    /// Runs before any simulation work; the first violated constraint is
    /// reported with the offending field identified.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] variant naming the invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size_blocks == 0 || self.chunk_size_blocks > defaults::CHUNK_SIZE_MAX {
            return Err(ConfigError::ChunkSize(self.chunk_size_blocks));
        }
        if self.cluster_size_chunks == 0 || self.cluster_size_chunks > defaults::CLUSTER_SIZE_MAX {
            return Err(ConfigError::ClusterSize(self.cluster_size_chunks));
        }
        if self.cache_size_blocks == 0 {
            return Err(ConfigError::CacheSize(self.cache_size_blocks));
        }
        if self.prefetch_window_blocks > 4 * self.chunk_size_blocks {
            return Err(ConfigError::PrefetchWindow {
                window: self.prefetch_window_blocks,
                chunk_size: self.chunk_size_blocks,
            });
        }
        if self.block_range == 0 {
            return Err(ConfigError::BlockRange(self.block_range));
        }
        if self.n_events == 0 {
            return Err(ConfigError::Events(self.n_events));
        }
        if !(0.0..=1.0).contains(&self.sequential_prob) {
            return Err(ConfigError::SequentialProb(self.sequential_prob));
        }
        if self.epoch_size == 0 {
            return Err(ConfigError::EpochSize(self.epoch_size));
        }
        if self.ra_initial_window_blocks == 0
            || self.ra_max_window_blocks < self.ra_initial_window_blocks
        {
            return Err(ConfigError::ReadAheadWindow {
                initial: self.ra_initial_window_blocks,
                max: self.ra_max_window_blocks,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    /// Creates the reference default configuration: 16-block chunks,
    /// 64-chunk clusters, 4096-block cache, one-chunk prefetch window,
    /// 15 000 `kvm` events over 30 000 blocks, CMC engine.
    fn default() -> Self {
        Self {
            chunk_size_blocks: defaults::CHUNK_SIZE_BLOCKS,
            cluster_size_chunks: defaults::CLUSTER_SIZE_CHUNKS,
            cache_size_blocks: defaults::CACHE_SIZE_BLOCKS,
            prefetch_window_blocks: defaults::PREFETCH_WINDOW_BLOCKS,
            block_range: defaults::BLOCK_RANGE,
            n_events: defaults::N_EVENTS,
            workload_kind: WorkloadKind::default(),
            sequential_prob: defaults::SEQUENTIAL_PROB,
            seed: defaults::SEED,
            engine: EngineKind::default(),
            epoch_size: defaults::EPOCH_SIZE,
            ra_initial_window_blocks: defaults::RA_INITIAL_WINDOW_BLOCKS,
            ra_max_window_blocks: defaults::RA_MAX_WINDOW_BLOCKS,
        }
    }
}
