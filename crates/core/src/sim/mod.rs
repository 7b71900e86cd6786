//! Simulation driving.
//!
//! Hosts the driver that feeds a trace to a policy engine and assembles the
//! statistics record returned to the caller.

/// Trace-to-engine driver and run entry points.
pub mod driver;

pub use self::driver::{run, run_with_trace};
