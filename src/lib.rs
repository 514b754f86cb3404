//! # Decay Options - Option structure time-decay pricing
//!
//! Prices vanilla European options and multi-leg structures (calendars,
//! strangles) under Black-Scholes-Merton, and projects how a structure's
//! aggregate value evolves as time passes and volatility drifts, producing a
//! surface of value vs. underlying price vs. days-to-expiration.
//!
//! ## Key Components
//!
//! - **Black-Scholes**: closed-form values, Greeks, implied-vol solver
//! - **VanillaOption / OptionPosition**: contracts and signed legs with an
//!   optional linearly-interpolated volatility path
//! - **Structure builders**: calendar spreads and strangles
//! - **DecaySimulation**: the (position × day × price) revaluation engine,
//!   with a correct discrete-payoff terminal column
//! - **Metrics**: max profit / max loss / loss within an expected-move band
//!
//! ## Usage
//!
//! ```rust
//! use decay_options::prelude::*;
//!
//! let config = MarketConfig::default();
//! let spec = CalendarSpec {
//!     spot: 4100.0,
//!     strike: 4100.0,
//!     front_days: 16,
//!     front_vol: 0.20,
//!     front_vol_final: 0.16,
//!     back_days: 30,
//!     back_vol: 0.19,
//!     back_vol_final: 0.18,
//!     option_type: OptionType::Call,
//! };
//! let positions = build_calendar(&spec, &config).unwrap();
//!
//! let sim = DecaySimulation::new(positions.to_vec(), (3600.0, 4600.0), 5.0, config);
//! let surface = sim.run(&SimulationParams::default()).unwrap();
//!
//! let worst = max_loss(&surface);
//! ```
//!
//! ## What This Engine Does NOT Do
//!
//! - Model dividends or American exercise in the structure builders
//! - Follow a stochastic volatility path (the vol schedule is deterministic)
//! - Plot anything: the surface is a plain table for a presentation layer

pub mod core;
pub mod models;
pub mod structures;
pub mod surface;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Greeks, MarketConfig, OptionPosition, OptionType, PricerError, PricerResult,
        PricingModel, VanillaOption, aggregate_greeks,
    };

    // Pricing primitives
    pub use crate::models::{
        call_value, call_value_yield, combined_call_put_iv, implied_volatility, norm_cdf,
        norm_pdf, put_value, put_value_yield, CombinedIv,
    };

    // Structure builders
    pub use crate::structures::{build_calendar, build_strangle, CalendarSpec, StrangleSpec};

    // Decay surface
    pub use crate::surface::{
        expected_move_band, max_loss, max_loss_in_band, max_profit, DecaySimulation,
        DecaySurface, SimulationParams, TimeColumn, ValuationMode,
    };
}

// Re-export main types at crate root
pub use crate::core::{PricerError, PricerResult};
pub use crate::surface::{DecaySimulation, DecaySurface};
