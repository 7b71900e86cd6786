//! # Markov Row Tests
//!
//! Verifies the six-field row algebra: frequency increments, the
//! third-slot insertion buffer, descending rank order, and the
//! most-recently-written tie-break.

use cmcsim_core::chain::McRow;

/// Convenience: the (chunk, count) view of a rank, if populated.
fn at(row: &McRow, rank: usize) -> Option<(u64, u32)> {
    row.slot(rank).map(|s| (s.chunk, s.count))
}

// ══════════════════════════════════════════════════════════
// 1. Empty row
// ══════════════════════════════════════════════════════════

/// An empty row predicts nothing.
#[test]
fn empty_row_predicts_none() {
    let row = McRow::new();
    assert!(row.is_empty());
    assert_eq!(row.predict(), None);
}

// ══════════════════════════════════════════════════════════
// 2. Recording
// ══════════════════════════════════════════════════════════

/// The first observation populates the top rank with count 1.
#[test]
fn first_record_takes_top_rank() {
    let mut row = McRow::new();
    row.record(9);
    assert_eq!(at(&row, 0), Some((9, 1)));
    assert_eq!(row.predict(), Some(9));
}

/// Re-observing a successor increments its count.
#[test]
fn repeat_increments_count() {
    let mut row = McRow::new();
    row.record(9);
    row.record(9);
    row.record(9);
    assert_eq!(at(&row, 0), Some((9, 3)));
}

/// Three distinct successors fill the three ranks.
#[test]
fn distinct_successors_fill_slots() {
    let mut row = McRow::new();
    row.record(1);
    row.record(2);
    row.record(3);
    let ids: Vec<u64> = (0..3).filter_map(|r| at(&row, r)).map(|(c, _)| c).collect();
    assert_eq!(ids.len(), 3);
    assert!(ids.contains(&1) && ids.contains(&2) && ids.contains(&3));
}

/// A fourth distinct successor overwrites the bottom rank, discarding
/// whatever was buffered there.
#[test]
fn fourth_successor_overwrites_buffer_slot() {
    let mut row = McRow::new();
    row.record(1);
    row.record(2);
    row.record(3);
    // After the inserts the bottom rank holds chunk 1 (least recent tie).
    row.record(4);

    let ids: Vec<u64> = (0..3).filter_map(|r| at(&row, r)).map(|(c, _)| c).collect();
    assert!(!ids.contains(&1), "buffered candidate should be discarded");
    assert!(ids.contains(&4));
}

// ══════════════════════════════════════════════════════════
// 3. Ranking and tie-break
// ══════════════════════════════════════════════════════════

/// A newly inserted candidate outranks equal-count older candidates.
#[test]
fn new_insert_wins_count_tie() {
    let mut row = McRow::new();
    row.record(1);
    row.record(2);
    assert_eq!(row.predict(), Some(2), "most recent tie wins the top rank");
}

/// An increment that draws level with the leader takes the lead.
#[test]
fn increment_overtakes_on_tie() {
    let mut row = McRow::new();
    row.record(1);
    row.record(1); // 1:2
    row.record(2); // 2:1
    row.record(2); // 2:2 ties 1:2, modified more recently
    assert_eq!(at(&row, 0), Some((2, 2)));
    assert_eq!(at(&row, 1), Some((1, 2)));
}

/// Counts stay in descending order as frequencies diverge.
#[test]
fn higher_count_ranks_first() {
    let mut row = McRow::new();
    row.record(1);
    row.record(2);
    row.record(1);
    row.record(1);
    assert_eq!(at(&row, 0), Some((1, 3)));
    assert_eq!(at(&row, 1), Some((2, 1)));
}

/// Untouched equal-count candidates keep their relative order when a
/// different slot is modified.
#[test]
fn untouched_ties_keep_order() {
    let mut row = McRow::new();
    row.record(10);
    row.record(10); // 10:2
    row.record(30); // 30:1
    row.record(20); // 20:1, more recent than 30
    assert_eq!(at(&row, 1), Some((20, 1)));
    assert_eq!(at(&row, 2), Some((30, 1)));

    row.record(10); // modifies only the leader
    assert_eq!(at(&row, 0), Some((10, 3)));
    assert_eq!(at(&row, 1), Some((20, 1)), "untouched tie order preserved");
    assert_eq!(at(&row, 2), Some((30, 1)));
}

/// Re-ranking promotes a buffered candidate as its count grows.
#[test]
fn buffer_candidate_climbs_with_count() {
    let mut row = McRow::new();
    row.record(1);
    row.record(1);
    row.record(1); // 1:3
    row.record(2); // 2:1 at the bottom
    row.record(2);
    row.record(2);
    row.record(2); // 2:4 overtakes
    assert_eq!(row.predict(), Some(2));
    assert_eq!(at(&row, 1), Some((1, 3)));
}

/// Populated ranks always carry pairwise-distinct chunk ids.
#[test]
fn slots_stay_distinct() {
    let mut row = McRow::new();
    for successor in [5, 6, 5, 7, 8, 6, 5, 9] {
        row.record(successor);
        let ids: Vec<u64> = (0..3).filter_map(|r| at(&row, r)).map(|(c, _)| c).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(ids.len(), unique.len(), "duplicate chunk id in row");
    }
}
