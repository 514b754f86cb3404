//! Market conventions shared across the engine
//!
//! All tenor math (day counts to year fractions and back) goes through
//! [`MarketConfig`] so the annualization calendar and the risk-free rate are
//! set once per request instead of being scattered as literals.

use serde::{Deserialize, Serialize};

/// Market conventions for a pricing request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Trading days per year used for all annualization
    pub trading_days_per_year: f64,
    /// Flat risk-free rate applied to structures built through this config
    pub risk_free_rate: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252.0,
            risk_free_rate: 0.0,
        }
    }
}

impl MarketConfig {
    pub fn new(trading_days_per_year: f64, risk_free_rate: f64) -> Self {
        Self {
            trading_days_per_year,
            risk_free_rate,
        }
    }

    /// Convert a trading-day count to a year fraction
    pub fn year_fraction(&self, days: i64) -> f64 {
        days as f64 / self.trading_days_per_year
    }

    /// Convert a year fraction back to whole trading days
    pub fn days_from_years(&self, years: f64) -> i64 {
        (years * self.trading_days_per_year).round() as i64
    }

    /// One trading day as a year fraction
    pub fn one_day(&self) -> f64 {
        1.0 / self.trading_days_per_year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calendar() {
        let cfg = MarketConfig::default();
        assert_eq!(cfg.trading_days_per_year, 252.0);
        assert_eq!(cfg.risk_free_rate, 0.0);
    }

    #[test]
    fn test_year_fraction_round_trip() {
        let cfg = MarketConfig::default();
        for days in [1, 16, 30, 252] {
            let t = cfg.year_fraction(days);
            assert_eq!(cfg.days_from_years(t), days);
        }
    }

    #[test]
    fn test_one_day() {
        let cfg = MarketConfig::default();
        assert!((cfg.one_day() - 1.0 / 252.0).abs() < 1e-15);
    }
}
