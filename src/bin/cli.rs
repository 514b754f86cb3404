//! Decay Options CLI
//!
//! Command-line walkthrough of the decay-surface engine: builds a calendar,
//! runs the time-decay simulation and prints the value table and metrics.

use decay_options::prelude::*;

fn main() {
    println!("Option Decay Surface");
    println!("====================\n");

    let config = MarketConfig::default();

    let spec = CalendarSpec {
        spot: 4100.0,
        strike: 4100.0,
        front_days: 16,
        front_vol: 0.20,
        front_vol_final: 0.16,
        back_days: 30,
        back_vol: 0.19,
        back_vol_final: 0.18,
        option_type: OptionType::Call,
    };

    println!("Calendar Spread:");
    println!("  Spot: ${:.2}", spec.spot);
    println!("  Strike: ${:.2}", spec.strike);
    println!("  Front: {} days @ {:.0}% vol", spec.front_days, spec.front_vol * 100.0);
    println!("  Back: {} days @ {:.0}% vol\n", spec.back_days, spec.back_vol * 100.0);

    let positions = match build_calendar(&spec, &config) {
        Ok(positions) => positions,
        Err(e) => {
            eprintln!("Failed to build calendar: {e}");
            std::process::exit(1);
        }
    };

    for position in &positions {
        println!("  Leg: {}", position.id(&config));
    }

    match aggregate_greeks(&positions) {
        Ok(greeks) => {
            println!("\nStructure Greeks:");
            println!("  Delta: {:.4}", greeks.delta);
            println!("  Gamma: {:.6}", greeks.gamma);
            println!("  Theta: {:.4}", greeks.theta);
            println!("  Vega: {:.4}", greeks.vega);
        }
        Err(e) => eprintln!("Greeks failed: {e}"),
    }

    let step = 4;
    let sim = DecaySimulation::new(positions.to_vec(), (3900.0, 4300.0), 50.0, config);
    let params = SimulationParams {
        days: 16,
        step,
        mode: ValuationMode::Relative,
        include_terminal: true,
    };

    let surface = match sim.run(&params) {
        Ok(surface) => surface,
        Err(e) => {
            eprintln!("Simulation failed: {e}");
            std::process::exit(1);
        }
    };

    println!("\nInitial cost: {:.2}", sim.initial_value().unwrap_or(0.0));

    let labels = surface.presentation_labels(step);
    print!("\n{:>10}", "price");
    for label in &labels {
        print!("{label:>10}");
    }
    println!();

    for (i, price) in surface.prices.iter().enumerate() {
        print!("{price:>10.1}");
        for j in 0..surface.columns.len() {
            print!("{:>10.2}", surface.values[[i, j]]);
        }
        println!();
    }

    println!("\nMetrics:");
    if let Some(profit) = max_profit(&surface) {
        println!("  Max profit: {profit:.2}");
    }
    if let Some(loss) = max_loss(&surface) {
        println!("  Max loss: {loss:.2}");
    }

    // Worst case within a one-std expected move over the front tenor,
    // using an externally supplied vol estimate
    let (down, up) = expected_move_band(spec.spot, 0.24, spec.front_days, 1.0, &config);
    println!("  Expected move band: [{down:.1}, {up:.1}]");
    if let Some(loss) = max_loss_in_band(&surface, down, up) {
        println!("  Max loss in band: {loss:.2}");
    }
}
