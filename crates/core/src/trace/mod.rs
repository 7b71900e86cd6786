//! Workload trace generation.
//!
//! This module produces the finite block-read sequences the simulator is
//! driven with. It provides:
//! 1. **Workload Kinds:** VM-boot-like, build-like, mixed, and fully
//!    user-parameterized synthetic streams, composed per event from
//!    sequential advances, short jumps, and long jumps.
//! 2. **Determinism:** A seeded xorshift generator; identical
//!    (kind, seed, length, range) inputs yield identical traces.
//! 3. **Laziness:** The trace is an iterator and never materialized unless
//!    the caller collects it.

use crate::config::{Config, WorkloadKind};

/// Reach of a short jump, in blocks either side of the previous access.
const SHORT_JUMP_REACH: u64 = 64;

/// Xorshift pseudo-random generator.
///
/// The same shift triple used for victim selection in hardware-style
/// simulators; cheap, deterministic, and more than random enough for
/// workload composition. State must never be zero.
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Seeds the generator. A zero seed is remapped to a fixed non-zero
    /// constant, and a few warm-up steps decorrelate neighboring seeds.
    fn new(seed: u64) -> Self {
        let mut rng = Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        };
        for _ in 0..3 {
            rng.next_u64();
        }
        rng
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform draw in `[0, bound)`. `bound` must be positive.
    fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    /// Uniform draw in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Per-event composition step.
#[derive(Clone, Copy)]
enum Step {
    Sequential,
    ShortJump,
    LongJump,
}

/// Lazy, finite, deterministic block-read sequence.
///
/// # Examples
///
/// ```
/// use cmcsim_core::config::Config;
/// use cmcsim_core::trace::TraceGenerator;
///
/// let config = Config::default();
/// let trace: Vec<u64> = TraceGenerator::new(&config).collect();
/// assert_eq!(trace.len(), config.n_events as usize);
/// assert!(trace.iter().all(|&b| b < config.block_range));
/// ```
pub struct TraceGenerator {
    kind: WorkloadKind,
    sequential_prob: f64,
    block_range: u64,
    remaining: u64,
    current: u64,
    rng: Xorshift64,
}

impl TraceGenerator {
    /// Creates a generator for the configured workload.
    pub fn new(config: &Config) -> Self {
        Self {
            kind: config.workload_kind,
            sequential_prob: config.sequential_prob,
            block_range: config.block_range,
            remaining: config.n_events,
            current: 0,
            rng: Xorshift64::new(config.seed),
        }
    }

    /// Draws the composition step for the next event.
    ///
    /// The fixed kinds use percentage tables (sequential / short / long):
    /// `kvm` 40/35/25, `kernel` 30/20/50. `mixed` flips a fair coin between
    /// the two tables per event; `synthetic` uses `sequential_prob` with the
    /// remainder split evenly.
    fn draw_step(&mut self) -> Step {
        match self.kind {
            WorkloadKind::Kvm => Self::draw_percent(&mut self.rng, 40, 75),
            WorkloadKind::Kernel => Self::draw_percent(&mut self.rng, 30, 50),
            WorkloadKind::Mixed => {
                if self.rng.next_below(2) == 0 {
                    Self::draw_percent(&mut self.rng, 40, 75)
                } else {
                    Self::draw_percent(&mut self.rng, 30, 50)
                }
            }
            WorkloadKind::Synthetic => {
                if self.rng.next_f64() < self.sequential_prob {
                    Step::Sequential
                } else if self.rng.next_below(2) == 0 {
                    Step::ShortJump
                } else {
                    Step::LongJump
                }
            }
        }
    }

    /// Percentage-table draw: `< seq` sequential, `< seq_or_short` short
    /// jump, otherwise long jump.
    fn draw_percent(rng: &mut Xorshift64, seq: u64, seq_or_short: u64) -> Step {
        let roll = rng.next_below(100);
        if roll < seq {
            Step::Sequential
        } else if roll < seq_or_short {
            Step::ShortJump
        } else {
            Step::LongJump
        }
    }

    /// Applies one composition step to the current position.
    fn advance(&mut self, step: Step) -> u64 {
        self.current = match step {
            // Sequential runs advance by one and wrap at the end of the range.
            Step::Sequential => (self.current + 1) % self.block_range,
            Step::ShortJump => {
                let span = 2 * SHORT_JUMP_REACH + 1;
                let delta = self.rng.next_below(span) as i64 - SHORT_JUMP_REACH as i64;
                let target = self.current as i64 + delta;
                target.clamp(0, self.block_range as i64 - 1) as u64
            }
            Step::LongJump => self.rng.next_below(self.block_range),
        };
        self.current
    }
}

impl Iterator for TraceGenerator {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let step = self.draw_step();
        Some(self.advance(step))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}
