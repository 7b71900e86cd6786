//! Prefetch policy engines.
//!
//! This module contains the interface and implementations of the per-access
//! policy engines driven by the simulation loop.

/// Clustered-Markov-chain prediction engine.
pub mod cmc;

/// Sequential read-ahead baseline with adaptive window.
pub mod readahead;

pub use self::cmc::CmcEngine;
pub use self::readahead::ReadAheadEngine;

use crate::cache::BlockCache;
use crate::config::{Config, EngineKind};

/// Trait for per-access prefetch policy engines.
///
/// An engine owns its prediction state and handles each access to
/// completion: cache probe, state update, and any speculative admissions.
pub trait PolicyEngine {
    /// Handles one block read against the shared cache.
    ///
    /// # Arguments
    ///
    /// * `block_id` - The block being read; must lie in the configured range.
    /// * `cache` - The run's cache, probed and filled by the engine.
    ///
    /// # Returns
    ///
    /// `true` when the access hit the cache.
    fn handle_access(&mut self, block_id: u64, cache: &mut BlockCache) -> bool;

    /// Markov rows materialized by the engine's prediction structure.
    ///
    /// Zero for engines without a learned structure.
    fn rows_allocated(&self) -> u64 {
        0
    }

    /// Clusters materialized by the engine's prediction structure.
    fn clusters_allocated(&self) -> u64 {
        0
    }
}

/// Builds the engine selected by the configuration.
pub fn build(config: &Config) -> Box<dyn PolicyEngine> {
    match config.engine {
        EngineKind::Cmc => Box::new(CmcEngine::new(config)),
        EngineKind::Ra => Box::new(ReadAheadEngine::new(config)),
    }
}
