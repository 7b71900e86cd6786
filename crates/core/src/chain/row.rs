//! Six-field Markov row.
//!
//! A row summarizes the observed successors of one source chunk as up to
//! three ranked candidates, each a (chunk id, frequency) pair. The third
//! slot doubles as the insertion buffer: an unseen successor overwrites it
//! with frequency 1 and the row is re-ranked.
//!
//! Ranking invariant: slots are ordered by descending frequency, and among
//! equal frequencies the slot modified most recently ranks higher. Recency
//! is not stored; only its effect on the post-sort order persists, which
//! keeps the row at exactly six fields.

use std::cmp::Reverse;

/// One ranked successor candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Candidate successor chunk id.
    pub chunk: u64,
    /// Transition frequency; saturates instead of wrapping.
    pub count: u32,
}

/// Markov row: three ranked successor slots for a single source chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McRow {
    /// Rank order: index 0 is the top-ranked successor.
    slots: [Option<Slot>; 3],
}

impl McRow {
    /// Creates an empty row with no recorded transitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the row has recorded no transition yet.
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// Returns the slot at `rank` (0 = top), if populated.
    pub fn slot(&self, rank: usize) -> Option<Slot> {
        self.slots.get(rank).copied().flatten()
    }

    /// Predicted next chunk: the top-ranked successor, absent for an empty row.
    pub fn predict(&self) -> Option<u64> {
        self.slots[0].map(|s| s.chunk)
    }

    /// Records an observed transition to `successor`.
    ///
    /// A successor already present in some slot has its frequency
    /// incremented; an unseen successor overwrites the third slot with
    /// frequency 1, discarding whatever was buffered there. The slots are
    /// then re-ranked with the just-modified slot winning frequency ties.
    pub fn record(&mut self, successor: u64) {
        let touched = match self
            .slots
            .iter()
            .position(|s| s.map(|s| s.chunk) == Some(successor))
        {
            Some(idx) => {
                let slot = self.slots[idx].as_mut().unwrap();
                slot.count = slot.count.saturating_add(1);
                idx
            }
            None => {
                self.slots[2] = Some(Slot {
                    chunk: successor,
                    count: 1,
                });
                2
            }
        };
        self.resort(touched);

        debug_assert!(self.ranked(), "row slots out of descending-count order");
        debug_assert!(self.distinct(), "row slots carry duplicate chunk ids");
    }

    /// Re-ranks the slots after a mutation of slot `touched`.
    ///
    /// The touched slot is placed first and a stable descending sort by
    /// frequency follows: the touched slot therefore wins any frequency tie,
    /// while untouched equal-frequency slots keep their previous relative
    /// order.
    fn resort(&mut self, touched: usize) {
        let mut ordered: Vec<Slot> = Vec::with_capacity(3);
        if let Some(slot) = self.slots[touched] {
            ordered.push(slot);
        }
        for (idx, slot) in self.slots.iter().enumerate() {
            if idx != touched {
                if let Some(slot) = *slot {
                    ordered.push(slot);
                }
            }
        }
        ordered.sort_by_key(|s| Reverse(s.count));

        self.slots = [None; 3];
        for (rank, slot) in ordered.into_iter().enumerate() {
            self.slots[rank] = Some(slot);
        }
    }

    /// Whether populated slots are in descending frequency order.
    fn ranked(&self) -> bool {
        self.slots
            .windows(2)
            .all(|pair| match (pair[0], pair[1]) {
                (Some(a), Some(b)) => a.count >= b.count,
                (None, Some(_)) => false,
                _ => true,
            })
    }

    /// Whether populated slots carry pairwise-distinct chunk ids.
    fn distinct(&self) -> bool {
        let ids: Vec<u64> = self.slots.iter().flatten().map(|s| s.chunk).collect();
        ids.iter()
            .enumerate()
            .all(|(i, id)| !ids[..i].contains(id))
    }
}
