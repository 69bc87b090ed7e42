//! Decay Formula Grid Example
//!
//! Prints the noise-free decay-formula shelf life of every profiled product
//! over a small temperature/humidity grid, the same surface the synthetic
//! training set samples from.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_decay_grid
//! ```

use shelflife_core::{profiles::PRODUCT_PROFILES, DecayCoefficients};

fn main() {
    println!("ShelfLife Decay Formula Grid");
    println!("============================\n");

    let coefficients = DecayCoefficients::default();
    let temperatures = [0.0, 5.0, 10.0, 15.0, 20.0, 25.0];
    let humidities = [60.0, 75.0, 90.0];

    for profile in PRODUCT_PROFILES.iter() {
        println!(
            "{} (base {} days at {}°C / {}%RH)",
            profile.type_name,
            profile.base_shelf_life_days,
            profile.optimal_temperature_c,
            profile.optimal_humidity_pct
        );

        for humidity in humidities {
            let row: Vec<String> = temperatures
                .iter()
                .map(|&t| format!("{:>6.1}", coefficients.expected_shelf_life(profile, t, humidity)))
                .collect();
            println!("  {:>3}%RH {}", humidity, row.join(" "));
        }

        let (t_penalty, h_penalty) = coefficients.penalties(profile, 20.0, 95.0);
        println!(
            "  at 20°C/95%RH: penalties {:.2} x {:.2}, labelled {} days\n",
            t_penalty,
            h_penalty,
            coefficients.shelf_life_days(profile, 20.0, 95.0, 0.0)
        );
    }
}
