//! Clustered Markov chain.
//!
//! This module stores the per-chunk Markov rows sparsely, cluster by
//! cluster. It provides:
//! 1. **Lazy Allocation:** A cluster materializes the first time any chunk
//!    inside it needs a row; an allocated cluster carries one row slot per
//!    member chunk.
//! 2. **Row Access:** Read access that never allocates, and write access
//!    that allocates the owning cluster and row on demand.
//! 3. **Footprint Counters:** Rows and clusters allocated, feeding the
//!    reported memory figure.

/// Markov row algebra (ranked successor slots with recency tie-break).
pub mod row;

pub use self::row::{McRow, Slot};

use std::collections::HashMap;

/// One lazily-allocated cluster: a fixed run of row slots.
struct Cluster {
    /// Exactly `cluster_size_chunks` slots; a slot is `Some` once its chunk
    /// has a row.
    rows: Box<[Option<McRow>]>,
}

impl Cluster {
    fn new(cluster_size_chunks: u64) -> Self {
        Self {
            rows: vec![None; cluster_size_chunks as usize].into_boxed_slice(),
        }
    }
}

/// Sparse chunk-id → row mapping, grouped into on-demand clusters.
pub struct ChunkChain {
    cluster_size_chunks: u64,
    clusters: HashMap<u64, Cluster>,
    rows_allocated: u64,
}

impl ChunkChain {
    /// Creates an empty chain for the given cluster geometry.
    pub fn new(cluster_size_chunks: u64) -> Self {
        assert!(
            cluster_size_chunks > 0,
            "cluster size must be positive"
        );
        Self {
            cluster_size_chunks,
            clusters: HashMap::new(),
            rows_allocated: 0,
        }
    }

    /// Splits a chunk id into (cluster id, slot index within the cluster).
    fn locate(&self, chunk_id: u64) -> (u64, usize) {
        (
            chunk_id / self.cluster_size_chunks,
            (chunk_id % self.cluster_size_chunks) as usize,
        )
    }

    /// Returns the row for `chunk_id` without allocating.
    pub fn row(&self, chunk_id: u64) -> Option<&McRow> {
        let (cluster_id, slot) = self.locate(chunk_id);
        self.clusters
            .get(&cluster_id)
            .and_then(|c| c.rows[slot].as_ref())
    }

    /// Returns the row for `chunk_id`, creating it (and its cluster) on
    /// demand. A freshly created row is empty and only populated by future
    /// transitions.
    pub fn ensure_row(&mut self, chunk_id: u64) -> &mut McRow {
        let (cluster_id, slot) = self.locate(chunk_id);
        let cluster_size = self.cluster_size_chunks;
        let cluster = self
            .clusters
            .entry(cluster_id)
            .or_insert_with(|| Cluster::new(cluster_size));

        if cluster.rows[slot].is_none() {
            cluster.rows[slot] = Some(McRow::new());
            self.rows_allocated += 1;
        }
        cluster.rows[slot].as_mut().unwrap()
    }

    /// Records a transition `from_chunk → to_chunk`, allocating the writer's
    /// cluster on demand.
    pub fn record_transition(&mut self, from_chunk: u64, to_chunk: u64) {
        self.ensure_row(from_chunk).record(to_chunk);
    }

    /// Total rows materialized so far.
    pub fn rows_allocated(&self) -> u64 {
        self.rows_allocated
    }

    /// Total clusters materialized so far.
    pub fn clusters_allocated(&self) -> u64 {
        self.clusters.len() as u64
    }
}
