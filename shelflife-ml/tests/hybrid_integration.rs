//! End-to-end tests: generate, train, persist, reload and fuse

use std::{sync::Arc, thread};

use shelflife_core::{profiles::PRODUCT_PROFILES, ShelfLifeError};
use shelflife_dataset::{Dataset, GeneratorConfig, SyntheticGenerator};
use shelflife_ml::{
    ForestConfig, HybridConfig, HybridPredictor, MLError, Regressor, TrainedModel, Trainer, TrainerConfig,
    TreeConfig,
};
use tempfile::tempdir;

fn quick_trainer() -> Trainer {
    Trainer::new(TrainerConfig {
        forest: ForestConfig {
            num_trees: 15,
            tree: TreeConfig {
                max_depth: Some(12),
                ..TreeConfig::default()
            },
            ..ForestConfig::default()
        },
        ..TrainerConfig::default()
    })
    .unwrap()
}

fn full_dataset() -> Dataset {
    SyntheticGenerator::new(GeneratorConfig::default())
        .unwrap()
        .generate_seeded(&PRODUCT_PROFILES)
        .unwrap()
}

#[test]
fn test_pipeline_through_files() {
    let dir = tempdir().unwrap();
    let csv_path = dir.path().join("shelf_life_dataset.csv");
    let model_path = dir.path().join("shelf_life_model.json");

    full_dataset().write_csv(&csv_path).unwrap();
    let dataset = Dataset::read_csv(&csv_path).unwrap();

    let (model, report) = quick_trainer().train(&dataset).unwrap();
    assert!(report.r2 > 0.0);
    model.save(&model_path).unwrap();

    let loaded = TrainedModel::load(&model_path).unwrap();
    assert_eq!(loaded, model);

    let before = HybridPredictor::new(Arc::new(model), HybridConfig::default()).unwrap();
    let after = HybridPredictor::new(Arc::new(loaded), HybridConfig::default()).unwrap();
    assert_eq!(
        before.predict("mango", 18.0, 80.0).unwrap(),
        after.predict("mango", 18.0, 80.0).unwrap()
    );
}

#[test]
fn test_alpha_zero_and_one_are_exact() {
    let (model, _) = quick_trainer().train(&full_dataset()).unwrap();
    let predictor = HybridPredictor::new(Arc::new(model), HybridConfig::default()).unwrap();

    for product in ["apple", "banana", "carrot", "cucumber", "mango", "potato", "strawberry", "tomato"] {
        let ml = predictor.predict_with_alpha(product, 15.0, 75.0, 0.0).unwrap();
        let arr = predictor.predict_with_alpha(product, 15.0, 75.0, 1.0).unwrap();

        assert_eq!(ml.hybrid_days, ml.ml_days, "{}", product);
        assert_eq!(arr.hybrid_days, arr.arrhenius_days, "{}", product);

        let expected_ml = predictor.model().predict_conditions(product, 15.0, 75.0).unwrap();
        assert_eq!(ml.ml_days, expected_ml);
    }
}

#[test]
fn test_untrained_product_is_schema_mismatch() {
    // Train only on apple and banana
    let dataset = SyntheticGenerator::default()
        .generate_seeded(&PRODUCT_PROFILES[..2])
        .unwrap();
    assert_eq!(dataset.product_types(), vec!["Apple".to_string(), "Banana".to_string()]);

    let (model, _) = quick_trainer().train(&dataset).unwrap();
    assert_eq!(model.schema().num_features(), 3);
    let predictor = HybridPredictor::new(Arc::new(model), HybridConfig::default()).unwrap();

    assert!(predictor.predict("banana", 20.0, 85.0).is_ok());
    assert!(matches!(predictor.predict("mango", 20.0, 85.0), Err(MLError::SchemaMismatch(_))));
    assert!(matches!(
        predictor.predict("durian", 20.0, 85.0),
        Err(MLError::Engine(ShelfLifeError::UnknownProduct { .. }))
    ));
}

#[test]
fn test_model_is_shared_across_threads() {
    let (model, _) = quick_trainer().train(&full_dataset()).unwrap();
    let model = Arc::new(model);
    let expected = model.predict_conditions("Tomato", 12.0, 90.0).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = HybridPredictor::new(Arc::clone(&model), HybridConfig::default()).unwrap();
            thread::spawn(move || predictor.predict_with_alpha("tomato", 12.0, 90.0, 0.0).unwrap().hybrid_days)
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_regressor_trait_on_loaded_model() {
    let (model, _) = quick_trainer().train(&full_dataset()).unwrap();
    let encoder = model.encoder().unwrap();
    let samples = vec![
        encoder.encode("Onion", 4.0, 70.0).unwrap(),
        encoder.encode("Grape", 0.0, 90.0).unwrap(),
    ];

    let predictions = model.predict_batch(&samples).unwrap();
    assert_eq!(predictions.len(), 2);
    assert!(predictions.iter().all(|p| *p >= 1.0));
    assert_eq!(model.num_features(), 11);
}
