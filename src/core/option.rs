//! Option contract definitions
//!
//! A vanilla European option as an immutable value object. Valuation, Greeks
//! and implied volatility delegate to the closed-form primitives in
//! [`crate::models::black_scholes`]; re-parameterization for grid pricing goes
//! through the `with_*` copy helpers so no shared instance is ever mutated.

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, MarketConfig, PricerError, PricerResult};
use crate::models::black_scholes as bs;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Terminal payoff at the given underlying price
    pub fn payoff(&self, price: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (price - strike).max(0.0),
            OptionType::Put => (strike - price).max(0.0),
        }
    }

    /// Short tag used in identifiers
    pub fn tag(&self) -> &'static str {
        match self {
            OptionType::Call => "c",
            OptionType::Put => "p",
        }
    }
}

/// Pricing algorithm tag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PricingModel {
    #[default]
    BlackScholes,
}

impl PricingModel {
    pub fn tag(&self) -> &'static str {
        match self {
            PricingModel::BlackScholes => "bsm",
        }
    }
}

/// A vanilla European option contract
///
/// Volatility is optional: an option constructed only to query implied
/// volatility from a traded price carries no volatility of its own, and any
/// valuation on it fails with a precondition error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VanillaOption {
    /// Current underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub time: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Annualized volatility, if known
    pub vol: Option<f64>,
    /// Call or put
    pub option_type: OptionType,
    /// Pricing algorithm
    pub model: PricingModel,
}

impl VanillaOption {
    pub fn new(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        vol: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time,
            rate,
            vol: Some(vol),
            option_type,
            model: PricingModel::BlackScholes,
        }
    }

    /// Option without a volatility, for implied-volatility queries
    pub fn without_vol(
        spot: f64,
        strike: f64,
        time: f64,
        rate: f64,
        option_type: OptionType,
    ) -> Self {
        Self {
            spot,
            strike,
            time,
            rate,
            vol: None,
            option_type,
            model: PricingModel::BlackScholes,
        }
    }

    /// Copy with a different spot price
    pub fn with_spot(&self, spot: f64) -> Self {
        Self { spot, ..*self }
    }

    /// Copy with a different time to expiry
    pub fn with_time(&self, time: f64) -> Self {
        Self { time, ..*self }
    }

    /// Copy with a different volatility
    pub fn with_vol(&self, vol: f64) -> Self {
        Self {
            vol: Some(vol),
            ..*self
        }
    }

    /// Volatility, or a precondition error when unset
    pub fn vol(&self) -> PricerResult<f64> {
        self.vol
            .ok_or_else(|| PricerError::precondition("volatility is not set on this option"))
    }

    /// Stable identifier derived from contract parameters
    ///
    /// Used for labeling and deduplication, not equality.
    pub fn id(&self, config: &MarketConfig) -> String {
        let days = config.days_from_years(self.time);
        let vol = match self.vol {
            Some(v) => v.to_string(),
            None => "none".to_string(),
        };
        format!(
            "{}-{}-{}-{}-{}-{}",
            self.strike,
            days,
            self.rate,
            vol,
            self.option_type.tag(),
            self.model.tag()
        )
    }

    /// Option value under the contract's pricing model
    pub fn value(&self) -> PricerResult<f64> {
        let vol = self.vol()?;
        match self.option_type {
            OptionType::Call => bs::call_value(self.spot, self.strike, self.time, self.rate, vol),
            OptionType::Put => bs::put_value(self.spot, self.strike, self.time, self.rate, vol),
        }
    }

    pub fn delta(&self) -> PricerResult<f64> {
        bs::delta(
            self.spot,
            self.strike,
            self.time,
            self.rate,
            self.vol()?,
            self.option_type,
        )
    }

    pub fn gamma(&self) -> PricerResult<f64> {
        bs::gamma(self.spot, self.strike, self.time, self.rate, self.vol()?)
    }

    pub fn vega(&self) -> PricerResult<f64> {
        bs::vega(self.spot, self.strike, self.time, self.rate, self.vol()?)
    }

    pub fn theta(&self) -> PricerResult<f64> {
        bs::theta(
            self.spot,
            self.strike,
            self.time,
            self.rate,
            self.vol()?,
            self.option_type,
        )
    }

    pub fn rho(&self) -> PricerResult<f64> {
        bs::rho(
            self.spot,
            self.strike,
            self.time,
            self.rate,
            self.vol()?,
            self.option_type,
        )
    }

    /// All first-order Greeks in one struct
    pub fn greeks(&self) -> PricerResult<Greeks> {
        Ok(Greeks::new(
            self.delta()?,
            self.gamma()?,
            self.theta()?,
            self.vega()?,
            self.rho()?,
        ))
    }

    /// Intrinsic value, measured as max(S - K, 0)
    ///
    /// Note this is the call-convention measure regardless of side; puts that
    /// need a parity-consistent intrinsic must adjust at the call site.
    pub fn intrinsic_value(&self) -> f64 {
        (self.spot - self.strike).max(0.0)
    }

    /// Extrinsic value = option value - intrinsic value
    pub fn extrinsic_value(&self) -> PricerResult<f64> {
        Ok(self.value()? - self.intrinsic_value())
    }

    /// Alias for [`Self::extrinsic_value`]
    pub fn time_value(&self) -> PricerResult<f64> {
        self.extrinsic_value()
    }

    /// True terminal payoff at expiration, not net of premium
    pub fn final_value(&self, price: f64) -> f64 {
        self.option_type.payoff(price, self.strike)
    }

    /// Break-even underlying price at expiry
    ///
    /// Call: strike + value. Put: strike - value.
    pub fn break_even_value(&self) -> PricerResult<f64> {
        let value = self.value()?;
        Ok(match self.option_type {
            OptionType::Call => self.strike + value,
            OptionType::Put => self.strike - value,
        })
    }

    /// Implied volatility matching the given target value
    pub fn iv(&self, target_value: f64) -> PricerResult<f64> {
        bs::implied_volatility(
            target_value,
            self.spot,
            self.strike,
            self.time,
            self.rate,
            self.option_type,
        )
    }
}
