//! Option Greeks
//!
//! First-order sensitivities for options and aggregates of them.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt (time decay, annualized)
    pub theta: f64,
    /// Vega: dV/dσ (sensitivity to volatility)
    pub vega: f64,
    /// Rho: dV/dr (sensitivity to interest rate)
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// Scale Greeks by a factor (e.g., signed contract quantity)
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            theta: self.theta * factor,
            vega: self.vega * factor,
            rho: self.rho * factor,
        }
    }

    /// Add two Greeks (for structure aggregation)
    pub fn add(&self, other: &Greeks) -> Self {
        Self {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            theta: self.theta + other.theta,
            vega: self.vega + other.vega,
            rho: self.rho + other.rho,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_flips_sign_for_short() {
        let g = Greeks::new(0.5, 0.02, -0.1, 0.3, 0.05);
        let short = g.scale(-1.0);
        assert_eq!(short.delta, -0.5);
        assert_eq!(short.theta, 0.1);
    }

    #[test]
    fn test_add() {
        let a = Greeks::new(0.5, 0.02, -0.1, 0.3, 0.05);
        let b = Greeks::new(-0.3, 0.01, -0.2, 0.1, -0.02);
        let sum = a.add(&b);
        assert!((sum.delta - 0.2).abs() < 1e-12);
        assert!((sum.theta + 0.3).abs() < 1e-12);
    }
}
