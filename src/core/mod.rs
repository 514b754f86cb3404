//! Core data types for the decay-surface engine
//!
//! Defines fundamental types:
//! - VanillaOption: one contract with valuation and Greeks
//! - OptionPosition: contract plus signed quantity and vol schedule
//! - MarketConfig: annualization calendar and rate conventions
//! - Greeks: first-order sensitivities

pub mod config;
pub mod error;
pub mod greeks;
pub mod option;
pub mod position;

pub use config::*;
pub use error::*;
pub use greeks::*;
pub use option::*;
pub use position::*;
