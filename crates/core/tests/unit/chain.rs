//! # Cluster Chain Tests
//!
//! Verifies the sparse chunk → row mapping: lazy cluster materialization,
//! row creation on demand, and the footprint counters.

use cmcsim_core::chain::ChunkChain;

// ══════════════════════════════════════════════════════════
// 1. Lazy allocation
// ══════════════════════════════════════════════════════════

/// A fresh chain has allocated nothing.
#[test]
fn new_chain_is_empty() {
    let chain = ChunkChain::new(8);
    assert_eq!(chain.rows_allocated(), 0);
    assert_eq!(chain.clusters_allocated(), 0);
    assert!(chain.row(0).is_none());
}

/// Read access never allocates.
#[test]
fn row_lookup_does_not_allocate() {
    let chain = ChunkChain::new(8);
    assert!(chain.row(123).is_none());
    assert_eq!(chain.clusters_allocated(), 0);
}

/// The first row in a cluster materializes exactly one cluster and one row.
#[test]
fn ensure_row_allocates_once() {
    let mut chain = ChunkChain::new(8);
    chain.ensure_row(3);
    assert_eq!(chain.rows_allocated(), 1);
    assert_eq!(chain.clusters_allocated(), 1);

    chain.ensure_row(3);
    assert_eq!(chain.rows_allocated(), 1, "re-ensure must not re-allocate");
    assert_eq!(chain.clusters_allocated(), 1);
}

/// Rows in the same cluster share its allocation.
#[test]
fn same_cluster_rows_share_allocation() {
    let mut chain = ChunkChain::new(8);
    chain.ensure_row(0);
    chain.ensure_row(7);
    assert_eq!(chain.rows_allocated(), 2);
    assert_eq!(chain.clusters_allocated(), 1);
}

/// Rows in different clusters each materialize their cluster.
#[test]
fn distant_rows_allocate_separate_clusters() {
    let mut chain = ChunkChain::new(8);
    chain.ensure_row(0);
    chain.ensure_row(8);
    chain.ensure_row(800);
    assert_eq!(chain.rows_allocated(), 3);
    assert_eq!(chain.clusters_allocated(), 3);
}

// ══════════════════════════════════════════════════════════
// 2. Transitions
// ══════════════════════════════════════════════════════════

/// Recording a transition allocates only the writer's cluster; the
/// successor chunk gets no row from the write.
#[test]
fn transition_allocates_writer_only() {
    let mut chain = ChunkChain::new(8);
    chain.record_transition(0, 100);

    assert_eq!(chain.clusters_allocated(), 1);
    assert_eq!(chain.rows_allocated(), 1);
    assert!(chain.row(0).is_some());
    assert!(chain.row(100).is_none());
}

/// A recorded transition is observable through the row.
#[test]
fn transition_is_recorded_in_row() {
    let mut chain = ChunkChain::new(8);
    chain.record_transition(2, 5);
    chain.record_transition(2, 5);
    chain.record_transition(2, 9);

    let row = chain.row(2).expect("row for writer");
    assert_eq!(row.predict(), Some(5));
    assert_eq!(row.slot(0).unwrap().count, 2);
    assert_eq!(row.slot(1).unwrap().chunk, 9);
}

/// A freshly ensured row starts empty.
#[test]
fn ensured_row_starts_empty() {
    let mut chain = ChunkChain::new(4);
    chain.ensure_row(11);
    assert!(chain.row(11).unwrap().is_empty());
}
