//! # Trace Generator Tests
//!
//! Verifies determinism, range confinement, and the per-event composition
//! of every workload kind. Composition checks count strictly-sequential
//! steps over a long trace and accept a generous band around the nominal
//! percentage.

use cmcsim_core::config::{Config, WorkloadKind};
use cmcsim_core::trace::TraceGenerator;

// ──────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────

fn config(kind: WorkloadKind, seed: u64, n_events: u64) -> Config {
    let mut config = Config::default();
    config.workload_kind = kind;
    config.seed = seed;
    config.n_events = n_events;
    config
}

fn collect(config: &Config) -> Vec<u64> {
    TraceGenerator::new(config).collect()
}

/// Fraction of events that advance the previous block by exactly one
/// (with wraparound at the range end).
fn sequential_fraction(trace: &[u64], block_range: u64) -> f64 {
    let sequential = trace
        .windows(2)
        .filter(|w| w[1] == (w[0] + 1) % block_range)
        .count();
    sequential as f64 / (trace.len() - 1) as f64
}

// ══════════════════════════════════════════════════════════
// 1. Determinism and shape
// ══════════════════════════════════════════════════════════

/// Identical parameters produce identical traces.
#[test]
fn identical_seeds_identical_traces() {
    let config = config(WorkloadKind::Kvm, 42, 5000);
    assert_eq!(collect(&config), collect(&config));
}

/// Different seeds produce different traces.
#[test]
fn different_seeds_differ() {
    let a = collect(&config(WorkloadKind::Kvm, 42, 5000));
    let b = collect(&config(WorkloadKind::Kvm, 43, 5000));
    assert_ne!(a, b);
}

/// The trace has exactly `n_events` entries.
#[test]
fn trace_length_matches_config() {
    for kind in [
        WorkloadKind::Kvm,
        WorkloadKind::Kernel,
        WorkloadKind::Mixed,
        WorkloadKind::Synthetic,
    ] {
        let trace = collect(&config(kind, 1, 2000));
        assert_eq!(trace.len(), 2000);
    }
}

/// Every generated block id stays inside `[0, block_range)`.
#[test]
fn blocks_stay_in_range() {
    for kind in [
        WorkloadKind::Kvm,
        WorkloadKind::Kernel,
        WorkloadKind::Mixed,
        WorkloadKind::Synthetic,
    ] {
        let mut cfg = config(kind, 9, 5000);
        cfg.block_range = 300;
        assert!(collect(&cfg).iter().all(|&b| b < 300));
    }
}

/// The generator is lazy: it reports its remaining length without
/// materializing anything.
#[test]
fn size_hint_is_exact() {
    let cfg = config(WorkloadKind::Kvm, 1, 100);
    let mut generator = TraceGenerator::new(&cfg);
    assert_eq!(generator.size_hint(), (100, Some(100)));
    generator.next();
    assert_eq!(generator.size_hint(), (99, Some(99)));
}

// ══════════════════════════════════════════════════════════
// 2. Composition
// ══════════════════════════════════════════════════════════

/// The kvm stream is roughly 40% sequential.
#[test]
fn kvm_sequential_share() {
    let cfg = config(WorkloadKind::Kvm, 42, 10_000);
    let frac = sequential_fraction(&collect(&cfg), cfg.block_range);
    assert!((0.36..=0.44).contains(&frac), "kvm fraction {}", frac);
}

/// The kernel stream is roughly 30% sequential.
#[test]
fn kernel_sequential_share() {
    let cfg = config(WorkloadKind::Kernel, 42, 10_000);
    let frac = sequential_fraction(&collect(&cfg), cfg.block_range);
    assert!((0.26..=0.34).contains(&frac), "kernel fraction {}", frac);
}

/// The mixed stream falls between its two components.
#[test]
fn mixed_sequential_share_between_components() {
    let cfg = config(WorkloadKind::Mixed, 42, 10_000);
    let frac = sequential_fraction(&collect(&cfg), cfg.block_range);
    assert!((0.30..=0.40).contains(&frac), "mixed fraction {}", frac);
}

/// A synthetic stream with probability one is strictly sequential,
/// wrapping at the range end.
#[test]
fn synthetic_prob_one_is_strictly_sequential() {
    let mut cfg = config(WorkloadKind::Synthetic, 9, 200);
    cfg.sequential_prob = 1.0;
    cfg.block_range = 50;
    let trace = collect(&cfg);
    for pair in trace.windows(2) {
        assert_eq!(pair[1], (pair[0] + 1) % 50);
    }
}

/// A synthetic stream with probability zero is all jumps; accidental
/// plus-one steps from short jumps stay rare.
#[test]
fn synthetic_prob_zero_avoids_sequential_runs() {
    let mut cfg = config(WorkloadKind::Synthetic, 42, 10_000);
    cfg.sequential_prob = 0.0;
    let frac = sequential_fraction(&collect(&cfg), cfg.block_range);
    assert!(frac < 0.05, "synthetic p=0 fraction {}", frac);
}

/// With sequential steps disabled the remainder splits between short
/// jumps (within 64 blocks) and long jumps roughly evenly.
#[test]
fn jump_mix_splits_between_short_and_long() {
    let mut cfg = config(WorkloadKind::Synthetic, 5, 3000);
    cfg.sequential_prob = 0.0;
    let trace = collect(&cfg);
    let long_jumps = trace
        .windows(2)
        .filter(|w| (w[1] as i64 - w[0] as i64).abs() > 64)
        .count();
    let total = trace.len() - 1;
    // Half the events are long jumps, half are short and bounded.
    assert!(long_jumps > total / 4);
    assert!(long_jumps < 3 * total / 4);
}
