//! Configuration error definitions.
//!
//! This module defines the error surface of the simulator core. It provides:
//! 1. **Field Identification:** One variant per invalid configuration field.
//! 2. **Error Handling:** Integration with standard Rust error traits for
//!    system-level reporting.
//!
//! Internal invariant breaches (cache accounting, row ordering) are
//! programmer errors and abort the run via panic rather than surfacing here.

use std::fmt;

/// Configuration validation errors.
///
/// Each variant names the offending field and carries the rejected value so
/// callers can report the failure without re-inspecting the config.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `chunk_size_blocks` outside `1..=1024`.
    ChunkSize(u64),

    /// `cluster_size_chunks` outside `1..=512`.
    ClusterSize(u64),

    /// `cache_size_blocks` is zero.
    CacheSize(u64),

    /// `prefetch_window_blocks` exceeds four chunks.
    PrefetchWindow {
        /// Rejected window size in blocks.
        window: u64,
        /// Configured chunk size the window is bounded by.
        chunk_size: u64,
    },

    /// `block_range` is zero.
    BlockRange(u64),

    /// `n_events` is zero.
    Events(u64),

    /// `sequential_prob` outside `[0.0, 1.0]`.
    SequentialProb(f64),

    /// `epoch_size` is zero.
    EpochSize(u64),

    /// Read-ahead window bounds are empty or inverted.
    ReadAheadWindow {
        /// Configured initial window in blocks.
        initial: u64,
        /// Configured window ceiling in blocks.
        max: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ChunkSize(v) => {
                write!(f, "chunk_size_blocks must be in 1..=1024, got {}", v)
            }
            ConfigError::ClusterSize(v) => {
                write!(f, "cluster_size_chunks must be in 1..=512, got {}", v)
            }
            ConfigError::CacheSize(v) => {
                write!(f, "cache_size_blocks must be positive, got {}", v)
            }
            ConfigError::PrefetchWindow { window, chunk_size } => write!(
                f,
                "prefetch_window_blocks must be at most 4 * chunk_size_blocks ({}), got {}",
                4 * chunk_size,
                window
            ),
            ConfigError::BlockRange(v) => {
                write!(f, "block_range must be positive, got {}", v)
            }
            ConfigError::Events(v) => write!(f, "n_events must be positive, got {}", v),
            ConfigError::SequentialProb(v) => {
                write!(f, "sequential_prob must be in [0.0, 1.0], got {}", v)
            }
            ConfigError::EpochSize(v) => write!(f, "epoch_size must be positive, got {}", v),
            ConfigError::ReadAheadWindow { initial, max } => write!(
                f,
                "read-ahead window bounds invalid: initial {} blocks, max {} blocks",
                initial, max
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
