//! Canonical multi-leg structure builders
//!
//! Assembles calendars and strangles as lists of [`OptionPosition`] with the
//! conventional per-leg sign, tenor and volatility schedule. All day counts
//! are annualized through the [`MarketConfig`] passed in.

use serde::{Deserialize, Serialize};

use crate::core::{
    MarketConfig, OptionPosition, OptionType, PricerError, PricerResult, VanillaOption,
};

/// Parameters for a calendar spread
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalendarSpec {
    pub spot: f64,
    pub strike: f64,
    /// Tenor of the short front leg, in trading days
    pub front_days: i64,
    pub front_vol: f64,
    /// Front leg vol at its expiry (linear interpolation target)
    pub front_vol_final: f64,
    /// Tenor of the long back leg, in trading days; must exceed front_days
    pub back_days: i64,
    pub back_vol: f64,
    /// Back leg vol at the end of the simulation horizon
    pub back_vol_final: f64,
    pub option_type: OptionType,
}

/// Parameters for a strangle
///
/// Both legs share one strike and tenor, so the structure built here is
/// behaviorally a short straddle; the name follows the trading workflow it
/// came from and is kept deliberately.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StrangleSpec {
    pub spot: f64,
    pub strike: f64,
    /// Tenor in trading days
    pub days: i64,
    pub vol_initial: f64,
    /// Vol at expiry (linear interpolation target) for both legs
    pub vol_final: f64,
}

fn validate_common(spot: f64, strike: f64) -> PricerResult<()> {
    if !(spot > 0.0) {
        return Err(PricerError::domain(format!("spot must be > 0, got {spot}")));
    }
    if !(strike > 0.0) {
        return Err(PricerError::domain(format!(
            "strike must be > 0, got {strike}"
        )));
    }
    Ok(())
}

/// Build a calendar spread: short 1 front leg, long 1 back leg
pub fn build_calendar(
    spec: &CalendarSpec,
    config: &MarketConfig,
) -> PricerResult<[OptionPosition; 2]> {
    validate_common(spec.spot, spec.strike)?;
    if spec.front_days <= 0 {
        return Err(PricerError::domain(format!(
            "front_days must be > 0, got {}",
            spec.front_days
        )));
    }
    if spec.back_days <= spec.front_days {
        return Err(PricerError::domain(format!(
            "back_days ({}) must be strictly greater than front_days ({})",
            spec.back_days, spec.front_days
        )));
    }
    if !(spec.front_vol > 0.0) || !(spec.back_vol > 0.0) {
        return Err(PricerError::domain("leg vols must be > 0"));
    }

    let rate = config.risk_free_rate;

    let front = OptionPosition::with_end_vol(
        VanillaOption::new(
            spec.spot,
            spec.strike,
            config.year_fraction(spec.front_days),
            rate,
            spec.front_vol,
            spec.option_type,
        ),
        -1,
        spec.front_vol_final,
    );

    let back = OptionPosition::with_end_vol(
        VanillaOption::new(
            spec.spot,
            spec.strike,
            config.year_fraction(spec.back_days),
            rate,
            spec.back_vol,
            spec.option_type,
        ),
        1,
        spec.back_vol_final,
    );

    Ok([front, back])
}

/// Build a strangle: short 1 call and short 1 put at the same strike
pub fn build_strangle(
    spec: &StrangleSpec,
    config: &MarketConfig,
) -> PricerResult<[OptionPosition; 2]> {
    validate_common(spec.spot, spec.strike)?;
    if spec.days <= 0 {
        return Err(PricerError::domain(format!(
            "days must be > 0, got {}",
            spec.days
        )));
    }
    if !(spec.vol_initial > 0.0) {
        return Err(PricerError::domain("vol_initial must be > 0"));
    }

    let time = config.year_fraction(spec.days);
    let rate = config.risk_free_rate;

    let call = OptionPosition::with_end_vol(
        VanillaOption::new(
            spec.spot,
            spec.strike,
            time,
            rate,
            spec.vol_initial,
            OptionType::Call,
        ),
        -1,
        spec.vol_final,
    );

    let put = OptionPosition::with_end_vol(
        VanillaOption::new(
            spec.spot,
            spec.strike,
            time,
            rate,
            spec.vol_initial,
            OptionType::Put,
        ),
        -1,
        spec.vol_final,
    );

    Ok([call, put])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar_spec() -> CalendarSpec {
        CalendarSpec {
            spot: 4100.0,
            strike: 4100.0,
            front_days: 16,
            front_vol: 0.20,
            front_vol_final: 0.16,
            back_days: 30,
            back_vol: 0.19,
            back_vol_final: 0.18,
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_calendar_legs() {
        let cfg = MarketConfig::default();
        let [front, back] = build_calendar(&calendar_spec(), &cfg).unwrap();

        assert_eq!(front.quantity, -1);
        assert_eq!(back.quantity, 1);
        assert!(front.option.time < back.option.time);
        assert!((front.option.time - 16.0 / 252.0).abs() < 1e-12);
        assert!((back.option.time - 30.0 / 252.0).abs() < 1e-12);
        assert_eq!(front.end_vol, Some(0.16));
        assert_eq!(back.end_vol, Some(0.18));
        assert_eq!(front.option.rate, 0.0);
    }

    #[test]
    fn test_calendar_rejects_inverted_tenors() {
        let cfg = MarketConfig::default();
        let mut spec = calendar_spec();
        spec.back_days = spec.front_days;
        assert!(build_calendar(&spec, &cfg).is_err());
    }

    #[test]
    fn test_strangle_is_short_both_sides() {
        let cfg = MarketConfig::default();
        let spec = StrangleSpec {
            spot: 4100.0,
            strike: 4100.0,
            days: 20,
            vol_initial: 0.16,
            vol_final: 0.16,
        };
        let [call, put] = build_strangle(&spec, &cfg).unwrap();

        assert_eq!(call.quantity, -1);
        assert_eq!(put.quantity, -1);
        assert_eq!(call.option.option_type, OptionType::Call);
        assert_eq!(put.option.option_type, OptionType::Put);
        assert_eq!(call.option.strike, put.option.strike);
        assert_eq!(call.option.time, put.option.time);
        assert_eq!(call.end_vol, Some(0.16));
    }

    #[test]
    fn test_builders_use_config_rate() {
        let cfg = MarketConfig::new(252.0, 0.03);
        let [front, back] = build_calendar(&calendar_spec(), &cfg).unwrap();
        assert_eq!(front.option.rate, 0.03);
        assert_eq!(back.option.rate, 0.03);
    }
}
