//! Option positions
//!
//! A position is one option contract with a signed quantity (positive long,
//! negative short) and an optional terminal volatility. When the terminal
//! volatility is set, the position's volatility is linearly interpolated from
//! the option's starting vol toward it as the position's own tenor elapses.

use serde::{Deserialize, Serialize};

use crate::core::{Greeks, MarketConfig, PricerError, PricerResult, VanillaOption};

/// One option leg with a signed contract quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionPosition {
    /// The contract held
    pub option: VanillaOption,
    /// Signed quantity: positive = long, negative = short
    pub quantity: i32,
    /// Terminal volatility for linear interpolation over the position's life
    pub end_vol: Option<f64>,
}

impl OptionPosition {
    pub fn new(option: VanillaOption, quantity: i32) -> Self {
        Self {
            option,
            quantity,
            end_vol: None,
        }
    }

    pub fn with_end_vol(option: VanillaOption, quantity: i32, end_vol: f64) -> Self {
        Self {
            option,
            quantity,
            end_vol: Some(end_vol),
        }
    }

    /// Stable identifier: option id plus side and absolute quantity
    pub fn id(&self, config: &MarketConfig) -> String {
        let side = if self.quantity >= 1 { "long" } else { "short" };
        format!(
            "{}-{}{}",
            self.option.id(config),
            side,
            self.quantity.abs()
        )
    }

    /// Linearly interpolated volatility after the given elapsed fraction
    ///
    /// The fraction must be elapsed time over *this position's own* tenor,
    /// in [0, 1]. Interpolation is linear in volatility, not variance.
    pub fn interpolated_vol(&self, fraction: f64) -> PricerResult<f64> {
        let end_vol = self.end_vol.ok_or_else(|| {
            PricerError::precondition("end_vol must be set to interpolate volatility")
        })?;
        let start_vol = self.option.vol()?;
        Ok(start_vol - (start_vol - end_vol) * fraction)
    }

    /// Position value: option value times signed quantity
    pub fn signed_value(&self) -> PricerResult<f64> {
        Ok(self.option.value()? * self.quantity as f64)
    }

    /// Position Greeks: option Greeks scaled by signed quantity
    pub fn greeks(&self) -> PricerResult<Greeks> {
        Ok(self.option.greeks()?.scale(self.quantity as f64))
    }
}

/// Net Greeks across a list of positions
pub fn aggregate_greeks(positions: &[OptionPosition]) -> PricerResult<Greeks> {
    let mut total = Greeks::default();
    for position in positions {
        total = total.add(&position.greeks()?);
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;

    fn sample_option() -> VanillaOption {
        VanillaOption::new(100.0, 100.0, 16.0 / 252.0, 0.0, 0.3, OptionType::Call)
    }

    #[test]
    fn test_position_id() {
        let cfg = MarketConfig::default();
        let long = OptionPosition::new(sample_option(), 2);
        assert_eq!(long.id(&cfg), "100-16-0-0.3-c-bsm-long2");

        let short = OptionPosition::new(sample_option(), -1);
        assert_eq!(short.id(&cfg), "100-16-0-0.3-c-bsm-short1");
    }

    #[test]
    fn test_interpolated_vol() {
        let position = OptionPosition::with_end_vol(sample_option(), 1, 0.2);
        assert!((position.interpolated_vol(0.0).unwrap() - 0.3).abs() < 1e-12);
        assert!((position.interpolated_vol(0.5).unwrap() - 0.25).abs() < 1e-12);
        assert!((position.interpolated_vol(1.0).unwrap() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_interpolated_vol_requires_end_vol() {
        let position = OptionPosition::new(sample_option(), 1);
        assert!(matches!(
            position.interpolated_vol(0.5),
            Err(PricerError::Precondition(_))
        ));
    }

    #[test]
    fn test_signed_value_short() {
        let long = OptionPosition::new(sample_option(), 1);
        let short = OptionPosition::new(sample_option(), -1);
        let v = long.signed_value().unwrap();
        assert!(v > 0.0);
        assert!((short.signed_value().unwrap() + v).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_greeks_straddle_delta() {
        // Short call + short put at the same strike: deltas largely offset
        let call = OptionPosition::new(sample_option(), -1);
        let mut put_option = sample_option();
        put_option.option_type = OptionType::Put;
        let put = OptionPosition::new(put_option, -1);

        let net = aggregate_greeks(&[call, put]).unwrap();
        assert!(net.delta.abs() < 0.1);
        // Short premium: positive theta
        assert!(net.theta > 0.0);
    }
}
