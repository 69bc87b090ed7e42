//! Integration tests for dataset generation and CSV files

use rand::{rngs::StdRng, SeedableRng};
use shelflife_core::profiles::PRODUCT_PROFILES;
use shelflife_dataset::{
    generate_default_dataset, validate_dataset, Dataset, DatasetError, GeneratorConfig, SyntheticGenerator,
};
use tempfile::tempdir;

#[test]
fn test_generated_dataset_survives_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shelf_life_dataset.csv");

    let dataset = generate_default_dataset().unwrap();
    dataset.write_csv(&path).unwrap();

    let loaded = Dataset::read_csv(&path).unwrap();
    assert_eq!(loaded, dataset);
    assert!(validate_dataset(&loaded).is_valid());
}

#[test]
fn test_explicit_generator_matches_seeded() {
    let generator = SyntheticGenerator::new(GeneratorConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    assert_eq!(
        generator.generate(&PRODUCT_PROFILES, &mut rng).unwrap(),
        generator.generate_seeded(&PRODUCT_PROFILES).unwrap()
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = Dataset::read_csv(dir.path().join("absent.csv"));
    assert!(matches!(result, Err(DatasetError::Io(_))));
}

#[test]
fn test_warmer_storage_shortens_labels() {
    let dataset = generate_default_dataset().unwrap();

    for profile in PRODUCT_PROFILES.iter() {
        let rows: Vec<_> = dataset.filter_product(profile.type_name).collect();
        let mean = |pred: &dyn Fn(f64) -> bool| {
            let selected: Vec<f64> = rows
                .iter()
                .filter(|r| pred(r.temperature_c))
                .map(|r| r.shelf_life_days as f64)
                .collect();
            selected.iter().sum::<f64>() / selected.len().max(1) as f64
        };

        let near_optimum = mean(&|t| (t - profile.optimal_temperature_c).abs() <= 3.0);
        let far_warmer = mean(&|t| t - profile.optimal_temperature_c >= 10.0);
        if near_optimum > 0.0 && far_warmer > 0.0 {
            assert!(near_optimum > far_warmer, "{}", profile.type_name);
        }
    }
}
