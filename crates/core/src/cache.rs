//! Block cache with strict LRU replacement and prefetch accounting.
//!
//! This module implements the fixed-capacity cache shared by every policy
//! engine. It provides:
//! 1. **Residency:** Membership probes that never disturb recency order.
//! 2. **Recency:** Strict least-recently-used eviction driven by a monotonic
//!    access clock, so ordering ties cannot arise.
//! 3. **Accounting:** Per-block origin (demand vs. prefetch) and consumption
//!    tracking, feeding the issued / used / evicted-unused counters.
//!
//! Both engines run against the same cache implementation, which keeps their
//! reported hit rates and prefetch efficiencies directly comparable.

use std::collections::{BTreeMap, HashMap};

/// How a block entered the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Brought in by a demand miss.
    Demand,
    /// Brought in speculatively by a policy engine.
    Prefetch,
}

/// Per-block annotation travelling with the cache entry.
#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Monotonic stamp of the last touch; larger means more recent.
    stamp: u64,
    origin: Origin,
    /// Whether a prefetched block was demanded before eviction.
    consumed: bool,
}

/// Fixed-capacity LRU cache over block ids.
///
/// The recency order is maintained as a stamp-indexed map alongside the
/// block-indexed entry map; promoting a block re-stamps it with the next
/// clock value. The clock only advances, so eviction order is total.
pub struct BlockCache {
    capacity: u64,
    entries: HashMap<u64, Entry>,
    /// Recency index: stamp → block id. The smallest stamp is the LRU victim.
    order: BTreeMap<u64, u64>,
    clock: u64,

    /// Prefetches admitted to the cache (resident targets excluded).
    pub prefetch_issued: u64,
    /// Prefetched blocks demanded at least once before eviction.
    pub prefetch_used: u64,
    /// Prefetched blocks evicted without ever being demanded.
    pub prefetch_evicted_unused: u64,
}

impl BlockCache {
    /// Creates an empty cache holding at most `capacity` blocks.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; the configuration layer rejects that
    /// value before a cache is ever built.
    pub fn new(capacity: u64) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            capacity,
            entries: HashMap::new(),
            order: BTreeMap::new(),
            clock: 0,
            prefetch_issued: 0,
            prefetch_used: 0,
            prefetch_evicted_unused: 0,
        }
    }

    /// Returns whether `block_id` is resident, without reordering.
    pub fn contains(&self, block_id: u64) -> bool {
        self.entries.contains_key(&block_id)
    }

    /// Number of resident blocks.
    pub fn len(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Promotes a resident block to most-recent.
    ///
    /// The first demand touch of a prefetched block marks it consumed and
    /// counts it as a used prefetch; later touches leave the accounting
    /// unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `block_id` is not resident; callers must probe with
    /// [`contains`](Self::contains) first.
    pub fn touch(&mut self, block_id: u64) {
        self.clock += 1;
        let entry = self
            .entries
            .get_mut(&block_id)
            .unwrap_or_else(|| panic!("touch of non-resident block {}", block_id));
        self.order.remove(&entry.stamp);
        entry.stamp = self.clock;
        self.order.insert(entry.stamp, block_id);

        if entry.origin == Origin::Prefetch && !entry.consumed {
            entry.consumed = true;
            self.prefetch_used += 1;
        }
    }

    /// Inserts a block as most-recent, evicting the LRU entry on overflow.
    ///
    /// A demand admit of an already-resident block re-marks it as demand
    /// (clearing the consumed flag) and promotes it; a prefetch admit of a
    /// resident block is a no-op. An unconsumed prefetched victim is counted
    /// in `prefetch_evicted_unused` on eviction.
    pub fn admit(&mut self, block_id: u64, origin: Origin) {
        if let Some(entry) = self.entries.get_mut(&block_id) {
            // Re-marking is not a consumption: the used counter is only
            // advanced by `touch` on the demand-hit path.
            if origin == Origin::Demand {
                self.clock += 1;
                self.order.remove(&entry.stamp);
                entry.stamp = self.clock;
                self.order.insert(entry.stamp, block_id);
                entry.origin = Origin::Demand;
                entry.consumed = false;
            }
            return;
        }

        self.clock += 1;
        self.entries.insert(
            block_id,
            Entry {
                stamp: self.clock,
                origin,
                consumed: false,
            },
        );
        self.order.insert(self.clock, block_id);

        if self.len() > self.capacity {
            self.evict_lru();
        }
    }

    /// Admits `block_id` speculatively and accounts the prefetch.
    ///
    /// A prefetch of a resident block is a no-op: it is not counted as
    /// issued and does not promote the entry, so a stale block cannot be
    /// rescued from eviction by a redundant prefetch.
    pub fn issue_prefetch(&mut self, block_id: u64) {
        if self.contains(block_id) {
            return;
        }
        self.admit(block_id, Origin::Prefetch);
        self.prefetch_issued += 1;
    }

    /// Prefetched blocks still resident and never demanded.
    ///
    /// Together with the used and evicted-unused counters this partitions
    /// every issued prefetch.
    pub fn unused_resident_prefetches(&self) -> u64 {
        self.entries
            .values()
            .filter(|e| e.origin == Origin::Prefetch && !e.consumed)
            .count() as u64
    }

    /// Removes the least-recent entry and accounts an unconsumed prefetch.
    fn evict_lru(&mut self) {
        let (&stamp, &victim) = self
            .order
            .iter()
            .next()
            .expect("eviction requested on empty cache");
        self.order.remove(&stamp);
        let entry = self.entries.remove(&victim).expect("order map out of sync");

        if entry.origin == Origin::Prefetch && !entry.consumed {
            self.prefetch_evicted_unused += 1;
        }
    }
}
