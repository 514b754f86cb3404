//! Black-Scholes-Merton pricing primitives
//!
//! Provides:
//! - European call/put values (with and without a continuous dividend yield)
//! - Greeks
//! - Implied volatility via a bounded scalar minimizer
//!
//! Every public entry point validates its numeric domain and fails fast with
//! a domain error instead of letting NaNs propagate. The closed form is only
//! defined for T > 0; expiry valuation belongs to the payoff functions on
//! [`OptionType`].

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::core::{OptionType, PricerError, PricerResult};

/// Lower bound of the implied-volatility search domain
pub const IV_LOWER_BOUND: f64 = 0.01;
/// Upper bound of the implied-volatility search domain
pub const IV_UPPER_BOUND: f64 = 6.0;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

fn validate(spot: f64, strike: f64, time: f64, vol: f64) -> PricerResult<()> {
    if !(spot > 0.0) {
        return Err(PricerError::domain(format!("spot must be > 0, got {spot}")));
    }
    if !(strike > 0.0) {
        return Err(PricerError::domain(format!(
            "strike must be > 0, got {strike}"
        )));
    }
    if !(time > 0.0) {
        return Err(PricerError::domain(format!(
            "time must be > 0 for the closed form, got {time}; value expired options via payoff"
        )));
    }
    if !(vol > 0.0) {
        return Err(PricerError::domain(format!("vol must be > 0, got {vol}")));
    }
    Ok(())
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * time.sqrt())
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    d1(spot, strike, time, rate, vol) - vol * time.sqrt()
}

fn call_value_raw(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * time.sqrt();
    spot * norm_cdf(d1) - strike * (-rate * time).exp() * norm_cdf(d2)
}

fn put_value_raw(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> f64 {
    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * time.sqrt();
    strike * (-rate * time).exp() * norm_cdf(-d2) - spot * norm_cdf(-d1)
}

/// European call value
pub fn call_value(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    Ok(call_value_raw(spot, strike, time, rate, vol))
}

/// European put value
pub fn put_value(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    Ok(put_value_raw(spot, strike, time, rate, vol))
}

/// European call value with a continuous dividend yield
pub fn call_value_yield(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    div_yield: f64,
    vol: f64,
) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = ((spot / strike).ln() + (rate - div_yield + 0.5 * vol * vol) * time)
        / (vol * time.sqrt());
    let d2 = d1 - vol * time.sqrt();
    Ok(spot * (-div_yield * time).exp() * norm_cdf(d1)
        - strike * (-rate * time).exp() * norm_cdf(d2))
}

/// European put value with a continuous dividend yield
pub fn put_value_yield(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    div_yield: f64,
    vol: f64,
) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = ((spot / strike).ln() + (rate - div_yield + 0.5 * vol * vol) * time)
        / (vol * time.sqrt());
    let d2 = d1 - vol * time.sqrt();
    Ok(strike * (-rate * time).exp() * norm_cdf(-d2)
        - spot * (-div_yield * time).exp() * norm_cdf(-d1))
}

/// Delta: call N(d1), put N(d1) - 1
pub fn delta(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = d1(spot, strike, time, rate, vol);
    Ok(match option_type {
        OptionType::Call => norm_cdf(d1),
        OptionType::Put => norm_cdf(d1) - 1.0,
    })
}

/// Gamma: N'(d1) / (S σ √T), same for calls and puts
pub fn gamma(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = d1(spot, strike, time, rate, vol);
    Ok(norm_pdf(d1) / (spot * vol * time.sqrt()))
}

/// Vega: S √T N'(d1), same for calls and puts (per unit of vol)
pub fn vega(spot: f64, strike: f64, time: f64, rate: f64, vol: f64) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = d1(spot, strike, time, rate, vol);
    Ok(spot * time.sqrt() * norm_pdf(d1))
}

/// Theta (annualized)
pub fn theta(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d1 = d1(spot, strike, time, rate, vol);
    let d2 = d1 - vol * time.sqrt();
    let decay = -spot * norm_pdf(d1) * vol / (2.0 * time.sqrt());
    let carry = rate * strike * (-rate * time).exp();
    Ok(match option_type {
        OptionType::Call => decay - carry * norm_cdf(d2),
        OptionType::Put => decay + carry * norm_cdf(-d2),
    })
}

/// Rho (per unit of rate)
pub fn rho(
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> PricerResult<f64> {
    validate(spot, strike, time, vol)?;
    let d2 = d2(spot, strike, time, rate, vol);
    let df = strike * time * (-rate * time).exp();
    Ok(match option_type {
        OptionType::Call => df * norm_cdf(d2),
        OptionType::Put => -df * norm_cdf(-d2),
    })
}

/// Implied volatility via bounded minimization of |BS(σ) - target|
///
/// Best-effort: when the target value is outside the arbitrage-free bounds
/// for the given parameters the minimizer pins a boundary of
/// [[`IV_LOWER_BOUND`], [`IV_UPPER_BOUND`]]; that boundary value is returned
/// and a warning is logged, it is not an error. Callers that care should
/// sanity-check the residual.
pub fn implied_volatility(
    target_value: f64,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    option_type: OptionType,
) -> PricerResult<f64> {
    // The vol bound stands in for the candidate, which is always positive
    validate(spot, strike, time, IV_LOWER_BOUND)?;

    let objective = |vol: f64| -> f64 {
        let value = match option_type {
            OptionType::Call => call_value_raw(spot, strike, time, rate, vol),
            OptionType::Put => put_value_raw(spot, strike, time, rate, vol),
        };
        (value - target_value).abs()
    };

    let vol = minimize_bounded(objective, IV_LOWER_BOUND, IV_UPPER_BOUND, 1e-8, 200);

    let residual = objective(vol);
    let at_bound = vol - IV_LOWER_BOUND < 1e-6 || IV_UPPER_BOUND - vol < 1e-6;
    if residual > 1e-4 || at_bound {
        tracing::warn!(
            target_value,
            vol,
            residual,
            "implied vol search did not converge to an interior solution"
        );
    }

    Ok(vol)
}

/// Golden-section search for the minimum of a unimodal function on [a, b]
fn minimize_bounded<F: Fn(f64) -> f64>(
    f: F,
    mut a: f64,
    mut b: f64,
    tol: f64,
    max_iter: usize,
) -> f64 {
    let inv_phi = 0.5 * (5.0_f64.sqrt() - 1.0);
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);

    for _ in 0..max_iter {
        if b - a <= tol {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = f(d);
        }
    }

    0.5 * (a + b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-10);
        assert!((norm_cdf(1.96) - 0.975).abs() < 0.001);
        assert!((norm_cdf(-1.96) - 0.025).abs() < 0.001);
    }

    #[test]
    fn test_call_value_atm() {
        // ATM call, 20% vol, 1 year, 5% rate: ~10.45
        let value = call_value(100.0, 100.0, 1.0, 0.05, 0.20).unwrap();
        assert!(value > 10.0 && value < 11.0);
    }

    #[test]
    fn test_put_call_parity() {
        for (spot, strike, time, rate, vol) in [
            (100.0, 100.0, 1.0, 0.05, 0.20),
            (90.0, 100.0, 1.0 / 12.0, 0.0, 0.30),
            (4100.0, 4150.0, 16.0 / 252.0, 0.02, 0.22),
        ] {
            let call = call_value(spot, strike, time, rate, vol).unwrap();
            let put = put_value(spot, strike, time, rate, vol).unwrap();
            let parity = call - put - (spot - strike * (-rate * time).exp());
            assert!(parity.abs() < 1e-9, "parity violated: {parity}");
        }
    }

    #[test]
    fn test_yield_variants_reduce_to_plain() {
        let plain = call_value(100.0, 105.0, 0.5, 0.03, 0.25).unwrap();
        let with_zero_yield = call_value_yield(100.0, 105.0, 0.5, 0.03, 0.0, 0.25).unwrap();
        assert!((plain - with_zero_yield).abs() < 1e-12);

        // A positive yield cheapens the call
        let with_yield = call_value_yield(100.0, 105.0, 0.5, 0.03, 0.02, 0.25).unwrap();
        assert!(with_yield < plain);
    }

    #[test]
    fn test_greek_signs() {
        let (spot, strike, time, rate, vol) = (100.0, 100.0, 0.5, 0.05, 0.2);

        let call_delta = delta(spot, strike, time, rate, vol, OptionType::Call).unwrap();
        let put_delta = delta(spot, strike, time, rate, vol, OptionType::Put).unwrap();
        assert!(call_delta > 0.5 && call_delta < 0.7);
        assert!((call_delta - put_delta - 1.0).abs() < 1e-12);

        assert!(gamma(spot, strike, time, rate, vol).unwrap() > 0.0);
        assert!(vega(spot, strike, time, rate, vol).unwrap() > 0.0);
        assert!(theta(spot, strike, time, rate, vol, OptionType::Call).unwrap() < 0.0);
        assert!(rho(spot, strike, time, rate, vol, OptionType::Call).unwrap() > 0.0);
        assert!(rho(spot, strike, time, rate, vol, OptionType::Put).unwrap() < 0.0);
    }

    #[test]
    fn test_domain_errors() {
        assert!(call_value(100.0, 100.0, 0.0, 0.0, 0.2).is_err());
        assert!(call_value(100.0, 100.0, -0.1, 0.0, 0.2).is_err());
        assert!(call_value(100.0, 100.0, 0.5, 0.0, 0.0).is_err());
        assert!(call_value(0.0, 100.0, 0.5, 0.0, 0.2).is_err());
        assert!(put_value(100.0, -5.0, 0.5, 0.0, 0.2).is_err());
    }

    #[test]
    fn test_implied_vol_round_trip() {
        for vol in [0.05, 0.15, 0.3, 0.8, 2.0] {
            let value = call_value(100.0, 105.0, 0.25, 0.01, vol).unwrap();
            let iv =
                implied_volatility(value, 100.0, 105.0, 0.25, 0.01, OptionType::Call).unwrap();
            assert!((iv - vol).abs() < 1e-3, "vol {vol} recovered as {iv}");
        }
    }

    #[test]
    fn test_implied_vol_put_round_trip() {
        let value = put_value(100.0, 90.0, 0.25, 0.05, 0.30).unwrap();
        let iv = implied_volatility(value, 100.0, 90.0, 0.25, 0.05, OptionType::Put).unwrap();
        assert!((iv - 0.30).abs() < 1e-3);
    }

    #[test]
    fn test_implied_vol_unreachable_target_pins_bound() {
        // A worthless target is below the arbitrage-free floor: the search
        // pins the lower bound instead of failing.
        let iv = implied_volatility(0.0, 100.0, 105.0, 0.25, 0.0, OptionType::Call).unwrap();
        assert!(iv - IV_LOWER_BOUND < 1e-3);
    }
}
