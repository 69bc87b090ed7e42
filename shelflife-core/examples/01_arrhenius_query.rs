//! Arrhenius Shelf-Life Query Example
//!
//! Asks how long an apple keeps at different storage temperatures compared
//! with a 5°C refrigerator, then turns the ratio into days using a known
//! baseline.
//!
//! ## What You'll Learn
//!
//! - Building a `PredictionRequest`
//! - Reading the shelf-life ratio and its conclusion
//! - Getting absolute estimates and days remaining from a baseline
//! - Handling unsupported products
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_arrhenius_query
//! ```

use shelflife_core::{predict_shelf_life, supported_products, PredictionRequest, ShelfLifeError};

fn main() {
    println!("ShelfLife Arrhenius Query Example");
    println!("=================================\n");

    println!("Supported products:");
    for product in supported_products() {
        println!(
            "  {:<12} Ea = {:>5.1} kJ/mol  ({})",
            product.name, product.activation_energy_kj_per_mol, product.spoilage_metric
        );
    }
    println!();

    // Apple keeps about 60 days in a 5°C refrigerator, bought 3 days ago
    for temperature in [-5.0, 5.0, 15.0, 25.0] {
        let request = PredictionRequest::new("Fresh Apple", temperature)
            .with_humidity(85.0)
            .with_baseline_days(60.0)
            .with_age_days(3.0);

        match predict_shelf_life(&request) {
            Ok(result) => {
                println!("{} at {:.1}°C", result.product, temperature);
                println!("  k = {:.5} /day, ratio = {:.3}", result.kinetics.degradation_rate, result.shelf_life_ratio());
                println!("  {}", result.conclusion);
                if let Some(life) = result.life {
                    println!(
                        "  estimated {:.1} days ({:.1}-{:.1}), {:.1} days left",
                        life.estimated_shelf_life_days,
                        life.estimated_range.lower,
                        life.estimated_range.upper,
                        life.remaining_days
                    );
                }
                println!();
            }
            Err(e) => println!("  error: {}", e),
        }
    }

    // Unsupported products are reported, not guessed
    match predict_shelf_life(&PredictionRequest::new("durian", 10.0)) {
        Err(ShelfLifeError::UnknownProduct { name }) => {
            println!("'{}' is not in the kinetic table", name);
        }
        other => println!("unexpected: {:?}", other),
    }
}
