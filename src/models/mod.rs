//! Pricing models
//!
//! Implements:
//! - Black-Scholes-Merton (closed-form values, Greeks, implied vol)
//! - Derived calculations on top of the IV solver

pub mod black_scholes;
pub mod calcs;

pub use black_scholes::*;
pub use calcs::*;
