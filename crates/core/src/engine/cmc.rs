//! Clustered-Markov-chain policy engine.
//!
//! Handles each access as one pass of a fixed state machine: derive the
//! current chunk, probe and fill the cache, record the chunk transition from
//! the previous access, make sure the current chunk has a row, and prefetch
//! a window of blocks from the row's top-ranked successor chunk.
//!
//! Self-transitions (consecutive accesses inside one chunk) are not
//! recorded; a chunk's row only ranks *other* chunks.

use super::PolicyEngine;
use crate::cache::{BlockCache, Origin};
use crate::chain::{ChunkChain, McRow};
use crate::config::Config;

/// Markov-chain prediction engine state.
pub struct CmcEngine {
    chunk_size_blocks: u64,
    prefetch_window_blocks: u64,
    block_range: u64,
    chain: ChunkChain,
    /// Chunk of the previous access; `None` before the first access.
    prev_chunk: Option<u64>,
}

impl CmcEngine {
    /// Creates an engine with an empty chain for the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            chunk_size_blocks: config.chunk_size_blocks,
            prefetch_window_blocks: config.prefetch_window_blocks,
            block_range: config.block_range,
            chain: ChunkChain::new(config.cluster_size_chunks),
            prev_chunk: None,
        }
    }

    /// Read access to the learned chain, for inspection in tests and tools.
    pub fn chain(&self) -> &ChunkChain {
        &self.chain
    }

    /// Issues the prefetch window starting at the predicted chunk's first
    /// block, truncated at the end of the block range.
    fn prefetch_chunk(&self, predicted_chunk: u64, cache: &mut BlockCache) {
        let start = predicted_chunk * self.chunk_size_blocks;
        let end = start
            .saturating_add(self.prefetch_window_blocks)
            .min(self.block_range);
        for block_id in start..end {
            cache.issue_prefetch(block_id);
        }
    }
}

impl PolicyEngine for CmcEngine {
    fn handle_access(&mut self, block_id: u64, cache: &mut BlockCache) -> bool {
        let cur_chunk = block_id / self.chunk_size_blocks;

        // Cache probe: promote on hit, demand-fill on miss.
        let hit = cache.contains(block_id);
        if hit {
            cache.touch(block_id);
        } else {
            cache.admit(block_id, Origin::Demand);
        }

        // Chain transition from the previous access, self-transitions skipped.
        if let Some(prev_chunk) = self.prev_chunk {
            if prev_chunk != cur_chunk {
                self.chain.record_transition(prev_chunk, cur_chunk);
            }
        }

        // The current chunk always ends up with a row, empty until some
        // later transition out of it is observed.
        self.chain.ensure_row(cur_chunk);

        // Predict and prefetch.
        if self.prefetch_window_blocks > 0 {
            if let Some(predicted) = self.chain.row(cur_chunk).and_then(McRow::predict) {
                self.prefetch_chunk(predicted, cache);
            }
        }

        self.prev_chunk = Some(cur_chunk);
        hit
    }

    fn rows_allocated(&self) -> u64 {
        self.chain.rows_allocated()
    }

    fn clusters_allocated(&self) -> u64 {
        self.chain.clusters_allocated()
    }
}
