//! Time-decay value surface
//!
//! The simulation engine: revalues a list of option positions over a grid of
//! hypothetical underlying prices for a sequence of forward time steps, up to
//! the nearest leg's expiry, plus a terminal column that switches to the true
//! payoff for any leg whose remaining tenor has reached one trading day.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{MarketConfig, OptionPosition, PricerError, PricerResult};

/// Column key in a decay surface
///
/// Intraday columns are keyed by the nearest leg's remaining trading days;
/// the terminal column has its own key so downstream lookups can always tell
/// it apart from a day-indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeColumn {
    /// Nearest leg's remaining trading days at this step
    Days(i64),
    /// Value at/just before the nearest leg's expiry
    Final,
}

impl fmt::Display for TimeColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeColumn::Days(d) => write!(f, "{d}"),
            TimeColumn::Final => write!(f, "final"),
        }
    }
}

/// Whether values are reported net of the structure's initial cost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationMode {
    /// Subtract the initial aggregate value from every column
    Relative,
    /// Raw aggregate value
    Absolute,
}

/// Parameters for one decay simulation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Total forward days to simulate
    pub days: i64,
    /// Step between columns, in days
    pub step: i64,
    pub mode: ValuationMode,
    /// Append the terminal payoff column
    pub include_terminal: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            days: 30,
            step: 1,
            mode: ValuationMode::Relative,
            include_terminal: true,
        }
    }
}

/// Price × time table of aggregate structure value
///
/// The price row index is shared and identical across all columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecaySurface {
    /// Ascending grid of underlying prices (row keys)
    pub prices: Vec<f64>,
    /// Column keys, in emission order
    pub columns: Vec<TimeColumn>,
    /// Values indexed \[price, column\]
    pub values: Array2<f64>,
}

impl DecaySurface {
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty() || self.columns.is_empty()
    }

    fn price_index(&self, price: f64) -> Option<usize> {
        self.prices.iter().position(|&p| (p - price).abs() < 1e-9)
    }

    fn column_index(&self, column: TimeColumn) -> Option<usize> {
        self.columns.iter().position(|&c| c == column)
    }

    /// Exact lookup by price row and time column
    pub fn value_at(&self, price: f64, column: TimeColumn) -> Option<f64> {
        let i = self.price_index(price)?;
        let j = self.column_index(column)?;
        Some(self.values[[i, j]])
    }

    /// All values of one column, in price order
    pub fn column(&self, column: TimeColumn) -> Option<Vec<f64>> {
        let j = self.column_index(column)?;
        Some(self.values.column(j).to_vec())
    }

    /// Values of the last column (the terminal column when present)
    pub fn terminal_values(&self) -> Option<Vec<f64>> {
        let last = *self.columns.last()?;
        self.column(last)
    }

    /// Presentation labels: t0, t{step}, ..., with "tf" for the terminal column
    pub fn presentation_labels(&self, step: i64) -> Vec<String> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, column)| match column {
                TimeColumn::Days(_) => format!("t{}", i as i64 * step),
                TimeColumn::Final => "tf".to_string(),
            })
            .collect()
    }
}

/// Simulation of an option structure's value as time passes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecaySimulation {
    /// The structure's legs
    pub positions: Vec<OptionPosition>,
    /// Inclusive price range [low, high] for the grid
    pub price_range: (f64, f64),
    /// Grid spacing
    pub price_interval: f64,
    pub config: MarketConfig,
}

impl DecaySimulation {
    pub fn new(
        positions: Vec<OptionPosition>,
        price_range: (f64, f64),
        price_interval: f64,
        config: MarketConfig,
    ) -> Self {
        Self {
            positions,
            price_range,
            price_interval,
            config,
        }
    }

    /// The shared price grid: low, low+interval, ..., through high
    ///
    /// An inverted range (high < low) yields an empty grid, and therefore an
    /// empty surface, rather than an error.
    pub fn price_grid(&self) -> Vec<f64> {
        let (low, high) = self.price_range;
        if !(self.price_interval > 0.0) {
            return Vec::new();
        }
        let stop = high + self.price_interval;
        let count = ((stop - low) / self.price_interval - 1e-9).ceil() as i64;
        (0..count.max(0))
            .map(|i| low + i as f64 * self.price_interval)
            .collect()
    }

    /// Aggregate signed value of all positions at their current parameters
    ///
    /// This is the cost basis subtracted from every column under
    /// [`ValuationMode::Relative`].
    pub fn initial_value(&self) -> PricerResult<f64> {
        let mut total = 0.0;
        for position in &self.positions {
            total += position.signed_value()?;
        }
        Ok(total)
    }

    /// Run the simulation and produce the decay surface
    pub fn run(&self, params: &SimulationParams) -> PricerResult<DecaySurface> {
        if self.positions.is_empty() {
            return Err(PricerError::config(
                "decay simulation requires at least one position",
            ));
        }
        if params.step <= 0 {
            return Err(PricerError::config(format!(
                "step must be > 0, got {}",
                params.step
            )));
        }

        let prices = self.price_grid();
        let initial_value = self.initial_value()?;

        // The surface only advances to the nearest leg's expiry
        let min_time = self
            .positions
            .iter()
            .map(|p| p.option.time)
            .fold(f64::INFINITY, f64::min);
        let min_days = self.config.days_from_years(min_time);

        let mut columns: Vec<TimeColumn> = Vec::new();
        let mut column_values: Vec<Vec<f64>> = Vec::new();

        for day in (0..=params.days).step_by(params.step as usize) {
            if day >= min_days {
                // Superseded by the terminal column
                continue;
            }

            let elapsed = self.config.year_fraction(day);
            let mut column = vec![0.0; prices.len()];

            for position in &self.positions {
                let new_time = position.option.time - elapsed;
                let vol = match position.end_vol {
                    Some(_) => {
                        let fraction =
                            (position.option.time - new_time) / position.option.time;
                        position.interpolated_vol(fraction)?
                    }
                    None => position.option.vol()?,
                };
                let quantity = position.quantity as f64;

                for (i, &price) in prices.iter().enumerate() {
                    let option = position
                        .option
                        .with_spot(price)
                        .with_time(new_time)
                        .with_vol(vol);
                    column[i] += option.value()? * quantity;
                }
            }

            if params.mode == ValuationMode::Relative {
                for value in &mut column {
                    *value -= initial_value;
                }
            }

            columns.push(TimeColumn::Days(min_days - day));
            column_values.push(column);
        }

        if params.include_terminal {
            let mut column = vec![0.0; prices.len()];

            for position in &self.positions {
                let new_time = position.option.time - min_time;
                let quantity = position.quantity as f64;

                if new_time <= self.config.one_day() {
                    // This leg has expired: true discrete payoff
                    for (i, &price) in prices.iter().enumerate() {
                        column[i] += position.option.final_value(price) * quantity;
                    }
                } else {
                    // Unexpired legs keep their optionality in the terminal snapshot
                    for (i, &price) in prices.iter().enumerate() {
                        let option = position.option.with_spot(price).with_time(new_time);
                        column[i] += option.value()? * quantity;
                    }
                }
            }

            if params.mode == ValuationMode::Relative {
                for value in &mut column {
                    *value -= initial_value;
                }
            }

            columns.push(TimeColumn::Final);
            column_values.push(column);
        }

        let mut values = Array2::zeros((prices.len(), columns.len()));
        for (j, column) in column_values.iter().enumerate() {
            for (i, &value) in column.iter().enumerate() {
                values[[i, j]] = value;
            }
        }

        tracing::debug!(
            positions = self.positions.len(),
            rows = prices.len(),
            columns = columns.len(),
            "decay surface generated"
        );

        Ok(DecaySurface {
            prices,
            columns,
            values,
        })
    }
}
