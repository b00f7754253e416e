//! Financial health probe: flags and ratios derived from a financial statement document.

pub mod config;
pub mod probe;
pub mod telemetry;

pub use probe::{evaluate, Document, Flag, ProbeEvaluator, ProbeResult};
