//! Sequential read-ahead baseline.
//!
//! A deliberately simple detector in the style of OS page-cache read-ahead:
//! consecutive block ids form a streak, and once the streak is established
//! the window doubles (up to a ceiling) and the blocks immediately after the
//! current one are prefetched. Any non-sequential access collapses the
//! window back to its initial size.
//!
//! The baseline shares the cache implementation and accounting rules with
//! the Markov engine, so the two report directly comparable figures.

use super::PolicyEngine;
use crate::cache::{BlockCache, Origin};
use crate::config::Config;

/// Read-ahead engine state.
pub struct ReadAheadEngine {
    initial_window_blocks: u64,
    max_window_blocks: u64,
    block_range: u64,
    window_blocks: u64,
    sequential_streak: u64,
    last_block: Option<u64>,
}

impl ReadAheadEngine {
    /// Creates a read-ahead engine with the configured window bounds.
    pub fn new(config: &Config) -> Self {
        Self {
            initial_window_blocks: config.ra_initial_window_blocks,
            max_window_blocks: config.ra_max_window_blocks,
            block_range: config.block_range,
            window_blocks: config.ra_initial_window_blocks,
            sequential_streak: 0,
            last_block: None,
        }
    }

    /// Current prefetch window in blocks.
    pub fn window_blocks(&self) -> u64 {
        self.window_blocks
    }

    /// Current run length of strictly consecutive accesses.
    pub fn sequential_streak(&self) -> u64 {
        self.sequential_streak
    }
}

impl PolicyEngine for ReadAheadEngine {
    fn handle_access(&mut self, block_id: u64, cache: &mut BlockCache) -> bool {
        // Cache probe, identical to the Markov engine's.
        let hit = cache.contains(block_id);
        if hit {
            cache.touch(block_id);
        } else {
            cache.admit(block_id, Origin::Demand);
        }

        let sequential = self
            .last_block
            .map_or(false, |last| block_id == last.wrapping_add(1));

        if sequential {
            self.sequential_streak += 1;
            if self.sequential_streak >= 2 {
                self.window_blocks = (self.window_blocks * 2).min(self.max_window_blocks);
                let start = block_id + 1;
                let end = start
                    .saturating_add(self.window_blocks)
                    .min(self.block_range);
                for prefetch_block in start..end {
                    cache.issue_prefetch(prefetch_block);
                }
            }
        } else {
            self.sequential_streak = 0;
            self.window_blocks = self.initial_window_blocks;
        }

        self.last_block = Some(block_id);
        hit
    }
}
