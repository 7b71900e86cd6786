//! Simulation statistics collection and reporting.
//!
//! This module tracks the metrics of one simulation run. It provides:
//! 1. **Counters:** Accesses, hits, misses, and the prefetch
//!    issued / used / evicted-unused triple.
//! 2. **Footprint:** Markov rows and clusters materialized, with the
//!    formula-based memory figure (24 bytes per six-field row).
//! 3. **Derived Metrics:** Hit rate and prefetch efficiency.
//! 4. **Trajectory:** A per-epoch running hit-rate series for observing
//!    learning behavior over the trace.

use serde::Serialize;

/// Statistics record for a single simulation run.
///
/// Counters are monotonic over the run; the derived fields are filled once
/// by the driver when the trace is exhausted. The record is plain data and
/// serializes directly for embedding processes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SimStats {
    /// Total block reads handled.
    pub accesses: u64,
    /// Reads satisfied by the cache.
    pub hits: u64,
    /// Reads that required a demand fill.
    pub misses: u64,

    /// Prefetches admitted to the cache.
    pub prefetch_issued: u64,
    /// Prefetched blocks demanded before eviction.
    pub prefetch_used: u64,
    /// Prefetched blocks evicted without being demanded.
    pub prefetch_evicted_unused: u64,

    /// Markov rows materialized by the prediction structure.
    pub mc_rows_allocated: u64,
    /// Clusters materialized by the prediction structure.
    pub clusters_allocated: u64,

    /// `hits / accesses`.
    pub hit_rate: f64,
    /// `prefetch_used / max(1, prefetch_issued)`.
    pub prefetch_efficiency: f64,
    /// Formula-based prediction-structure footprint: 24 bytes per row.
    pub memory_bytes: u64,

    /// `(accesses_so_far, hit_rate_so_far)` sampled every epoch.
    pub hit_rate_trajectory: Vec<(u64, f64)>,
}

/// In-memory cost model of one six-field row: three (chunk id, count)
/// pairs at four bytes per field.
const ROW_BYTES: u64 = 24;

impl SimStats {
    /// Creates a zeroed statistics record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the derived fields from the accumulated counters.
    pub(crate) fn finalize(&mut self) {
        let accesses = self.accesses.max(1);
        let issued = self.prefetch_issued.max(1);
        self.hit_rate = self.hits as f64 / accesses as f64;
        self.prefetch_efficiency = self.prefetch_used as f64 / issued as f64;
        self.memory_bytes = self.mc_rows_allocated * ROW_BYTES;
    }

    /// Prints the run report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PREFETCH SIMULATION STATISTICS");
        println!("==========================================================");
        println!("accesses                 {}", self.accesses);
        println!("hits                     {}", self.hits);
        println!("misses                   {}", self.misses);
        println!("hit_rate                 {:.2}%", self.hit_rate * 100.0);
        println!("----------------------------------------------------------");
        println!("prefetch.issued          {}", self.prefetch_issued);
        println!("prefetch.used            {}", self.prefetch_used);
        println!("prefetch.evicted_unused  {}", self.prefetch_evicted_unused);
        println!(
            "prefetch.efficiency      {:.2}%",
            self.prefetch_efficiency * 100.0
        );
        println!("----------------------------------------------------------");
        println!("chain.rows               {}", self.mc_rows_allocated);
        println!("chain.clusters           {}", self.clusters_allocated);
        println!(
            "chain.memory             {} B ({:.2} KiB)",
            self.memory_bytes,
            self.memory_bytes as f64 / 1024.0
        );
        println!("==========================================================");
    }
}
