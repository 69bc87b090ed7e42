//! Train, Save and Fuse Example
//!
//! Generates the synthetic dataset, trains the random forest, stores the
//! model as a JSON artifact, loads it back and compares the learned,
//! kinetic and hybrid estimates for a few storage conditions.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 03_train_and_fuse
//! ```

use std::sync::Arc;

use shelflife_dataset::generate_default_dataset;
use shelflife_ml::{HybridConfig, HybridPredictor, MLResult, TrainedModel, Trainer, TrainerConfig};

fn main() -> MLResult<()> {
    println!("ShelfLife Train and Fuse Example");
    println!("================================\n");

    let dataset = generate_default_dataset()?;
    println!("Generated {} rows for {} products", dataset.len(), dataset.product_types().len());

    let (model, report) = Trainer::new(TrainerConfig::default())?.train(&dataset)?;
    println!(
        "Trained on {} rows, tested on {}: MAE {:.2} days, R² {:.3}",
        report.train_rows, report.test_rows, report.mae, report.r2
    );
    println!("Top features:");
    for feature in report.top_features(5) {
        println!("  {:<16} {:.3}", feature.name, feature.importance);
    }
    println!();

    let path = std::env::temp_dir().join("shelflife_model.json");
    model.save(&path)?;
    let model = Arc::new(TrainedModel::load(&path)?);
    println!("Model round-tripped through {}\n", path.display());

    let predictor = HybridPredictor::new(Arc::clone(&model), HybridConfig::default())?;
    println!("{:<12} {:>6} {:>6} {:>10} {:>8} {:>8}", "product", "°C", "%RH", "arrhenius", "ml", "hybrid");

    for (product, temperature, humidity) in [
        ("banana", 13.0, 85.0),
        ("banana", 25.0, 70.0),
        ("apple", 4.0, 90.0),
        ("strawberry", 20.0, 80.0),
        ("potato", 7.0, 90.0),
    ] {
        match predictor.predict(product, temperature, humidity) {
            Ok(p) => println!(
                "{:<12} {:>6.1} {:>6.1} {:>10.1} {:>8.1} {:>8.1}",
                p.product, p.temperature_c, p.humidity_pct, p.arrhenius_days, p.ml_days, p.hybrid_days
            ),
            Err(e) => println!("{:<12} error: {}", product, e),
        }
    }

    // Onion has a decay profile but no kinetic constants
    if let Err(e) = predictor.predict("onion", 4.0, 70.0) {
        println!("\nonion: {}", e);
    }

    Ok(())
}
