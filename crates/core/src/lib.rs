//! Trace-driven block-prefetch simulator library.
//!
//! This crate evaluates a clustered-Markov-chain prefetching policy against
//! a sequential read-ahead baseline under identical workloads. It contains:
//! 1. **Trace:** Deterministic workload generation (VM-boot-like, build-like,
//!    mixed, synthetic).
//! 2. **Cache:** A strict-LRU block cache with per-entry prefetch accounting.
//! 3. **Chain:** Sparse per-chunk Markov rows, lazily allocated cluster by
//!    cluster.
//! 4. **Engines:** The Markov prediction engine and the read-ahead baseline
//!    behind one policy trait.
//! 5. **Simulation:** A driver that feeds a trace to an engine and returns
//!    the statistics record, including a per-epoch hit-rate trajectory.
//!
//! The core performs no I/O; it is a pure in-memory model driven through
//! [`run`] or [`run_with_trace`].

/// Block cache with LRU replacement and prefetch accounting.
pub mod cache;
/// Clustered Markov chain (rows, clusters, lazy allocation).
pub mod chain;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Policy engines (Markov prediction, read-ahead baseline).
pub mod engine;
/// Configuration error types.
pub mod error;
/// Simulation driver and run entry points.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;
/// Deterministic workload trace generation.
pub mod trace;

/// Run configuration; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Configuration validation error, naming the offending field.
pub use crate::error::ConfigError;
/// Run entry points; each run owns all of its state.
pub use crate::sim::{run, run_with_trace};
/// Statistics record returned by a run.
pub use crate::stats::SimStats;
