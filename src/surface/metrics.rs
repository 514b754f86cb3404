//! Aggregate metrics over a decay surface
//!
//! Small queries over the expiration column: best case, worst case, and
//! worst case restricted to an expected-move price band.

use crate::core::MarketConfig;
use crate::surface::DecaySurface;

/// Max profit: the highest value in the expiration column
pub fn max_profit(surface: &DecaySurface) -> Option<f64> {
    let values = surface.terminal_values()?;
    values.into_iter().reduce(f64::max)
}

/// Max loss: the lowest value in the expiration column
pub fn max_loss(surface: &DecaySurface) -> Option<f64> {
    let values = surface.terminal_values()?;
    values.into_iter().reduce(f64::min)
}

/// Max loss over price rows within [low, high] inclusive
///
/// Being a minimum over a subset of rows, this is always >= the global
/// [`max_loss`]. Returns None when no grid row falls inside the band.
pub fn max_loss_in_band(surface: &DecaySurface, low: f64, high: f64) -> Option<f64> {
    let values = surface.terminal_values()?;
    surface
        .prices
        .iter()
        .zip(values)
        .filter(|(&price, _)| price >= low && price <= high)
        .map(|(_, value)| value)
        .reduce(f64::min)
}

/// Expected-move band: spot ± spot · num_std · vol · sqrt(days/year)
///
/// The volatility estimate is externally supplied (e.g. a VIX-style index
/// level); the band bounds worst-case-loss reporting.
pub fn expected_move_band(
    spot: f64,
    vol: f64,
    days: i64,
    num_std: f64,
    config: &MarketConfig,
) -> (f64, f64) {
    let move_fraction = num_std * vol * config.year_fraction(days).sqrt();
    let move_underlying = spot * move_fraction;
    (spot - move_underlying, spot + move_underlying)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use crate::surface::TimeColumn;

    fn sample_surface() -> DecaySurface {
        // Two columns; the terminal column is the second one
        let prices = vec![90.0, 95.0, 100.0, 105.0, 110.0];
        let values = Array2::from_shape_vec(
            (5, 2),
            vec![
                0.1, -4.0, //
                0.2, 1.0, //
                0.3, 6.0, //
                0.2, 1.0, //
                0.1, -9.0, //
            ],
        )
        .unwrap();
        DecaySurface {
            prices,
            columns: vec![TimeColumn::Days(10), TimeColumn::Final],
            values,
        }
    }

    #[test]
    fn test_max_profit_and_loss() {
        let surface = sample_surface();
        assert_eq!(max_profit(&surface), Some(6.0));
        assert_eq!(max_loss(&surface), Some(-9.0));
    }

    #[test]
    fn test_max_loss_in_band() {
        let surface = sample_surface();
        assert_eq!(max_loss_in_band(&surface, 95.0, 105.0), Some(1.0));
        // Band min is never below the global min
        let banded = max_loss_in_band(&surface, 95.0, 105.0).unwrap();
        assert!(banded >= max_loss(&surface).unwrap());
        // No rows in band
        assert_eq!(max_loss_in_band(&surface, 200.0, 300.0), None);
    }

    #[test]
    fn test_empty_surface_has_no_metrics() {
        let surface = DecaySurface {
            prices: vec![],
            columns: vec![],
            values: Array2::zeros((0, 0)),
        };
        assert_eq!(max_profit(&surface), None);
        assert_eq!(max_loss(&surface), None);
    }

    #[test]
    fn test_expected_move_band() {
        let cfg = MarketConfig::default();
        // 24-vol estimate, one std, 10 trading days
        let (down, up) = expected_move_band(4100.0, 0.24, 10, 1.0, &cfg);
        let expected = 4100.0 * 0.24 * (10.0 / 252.0_f64).sqrt();
        assert!((up - (4100.0 + expected)).abs() < 1e-9);
        assert!((down - (4100.0 - expected)).abs() < 1e-9);
        assert!(down < 4100.0 && up > 4100.0);
    }
}
