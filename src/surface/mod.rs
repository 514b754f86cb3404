//! Decay surface generation and metrics
//!
//! - DecaySimulation: positions × forward days × price grid → value table
//! - Metrics: max profit / max loss / banded max loss over the result

pub mod decay;
pub mod metrics;

pub use decay::*;
pub use metrics::*;
