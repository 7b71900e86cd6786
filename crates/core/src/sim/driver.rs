//! Simulation driver.
//!
//! Owns one run end to end: validates the configuration, builds the cache
//! and the selected engine, feeds the trace through access by access, and
//! returns the finalized statistics record. All run state lives here and is
//! dropped when the function returns; nothing persists across runs.
//!
//! The loop is synchronous and single-threaded: every access is handled to
//! completion before the next is read from the trace. Multiple runs may be
//! driven in parallel by the embedding process since runs share no state.

use crate::cache::BlockCache;
use crate::config::Config;
use crate::engine;
use crate::error::ConfigError;
use crate::stats::SimStats;
use crate::trace::TraceGenerator;

/// Runs a simulation with a trace generated from the configuration.
///
/// # Errors
///
/// Returns a [`ConfigError`] naming the offending field before any
/// simulation work when the configuration is invalid.
pub fn run(config: &Config) -> Result<SimStats, ConfigError> {
    config.validate()?;
    let trace = TraceGenerator::new(config);
    run_with_trace(config, trace)
}

/// Runs a simulation over a caller-supplied trace.
///
/// The trace may be shorter than `n_events`; the returned statistics simply
/// cover the events that were seen. Block ids must lie in
/// `[0, block_range)`.
///
/// # Errors
///
/// Returns a [`ConfigError`] naming the offending field before any
/// simulation work when the configuration is invalid.
pub fn run_with_trace<I>(config: &Config, trace: I) -> Result<SimStats, ConfigError>
where
    I: IntoIterator<Item = u64>,
{
    config.validate()?;

    let mut cache = BlockCache::new(config.cache_size_blocks);
    let mut engine = engine::build(config);
    let mut stats = SimStats::new();

    for block_id in trace {
        let hit = engine.handle_access(block_id, &mut cache);

        stats.accesses += 1;
        if hit {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }

        if stats.accesses % config.epoch_size == 0 {
            stats
                .hit_rate_trajectory
                .push((stats.accesses, stats.hits as f64 / stats.accesses as f64));
        }
    }

    stats.prefetch_issued = cache.prefetch_issued;
    stats.prefetch_used = cache.prefetch_used;
    stats.prefetch_evicted_unused = cache.prefetch_evicted_unused;
    stats.mc_rows_allocated = engine.rows_allocated();
    stats.clusters_allocated = engine.clusters_allocated();

    // Accounting conservation; a breach is a programmer error and the run
    // must not return partial results.
    assert_eq!(
        stats.hits + stats.misses,
        stats.accesses,
        "hit/miss accounting out of balance"
    );
    assert_eq!(
        stats.prefetch_used + stats.prefetch_evicted_unused + cache.unused_resident_prefetches(),
        stats.prefetch_issued,
        "prefetch accounting out of balance"
    );

    stats.finalize();
    Ok(stats)
}
