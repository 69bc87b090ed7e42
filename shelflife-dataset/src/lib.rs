//! Synthetic Training Data for Shelf-Life Regression
//!
//! ## Overview
//!
//! The learned model in `shelflife-ml` is trained on a synthetic dataset.
//! Every row is a storage condition for one produce type, labelled by the
//! empirical decay formula from `shelflife-core` plus Gaussian noise:
//!
//! | Type   | Temperature_C | Humidity_% | Shelf_Life_Days |
//! |--------|---------------|------------|-----------------|
//! | Banana | 20.0          | 95.0       | 2               |
//! | Apple  | 4.0           | 90.0       | 60              |
//!
//! ## Reproducibility
//!
//! There is no process-wide random state. The generator takes a
//! `rand::Rng` by `&mut`, and [`SyntheticGenerator::generate_seeded`]
//! builds a `StdRng` from the configured seed (42 by default). The same
//! seed, profiles and configuration always give the same rows.
//!
//! ## File Format
//!
//! Datasets are stored as CSV with the header shown above, read and
//! written through the `csv` crate and serde. Files written by other
//! tools load fine as long as the four columns are present; whole-number
//! temperatures such as `20` parse as floats.
//!
//! ## Usage Example
//!
//! ```rust
//! use shelflife_dataset::{GeneratorConfig, SyntheticGenerator};
//! use shelflife_core::profiles::PRODUCT_PROFILES;
//!
//! let generator = SyntheticGenerator::new(GeneratorConfig::default())?;
//! let dataset = generator.generate_seeded(&PRODUCT_PROFILES)?;
//!
//! assert_eq!(dataset.len(), 10 * 12 * 6);
//! assert!(dataset.iter().all(|row| row.shelf_life_days >= 1));
//! # Ok::<(), shelflife_dataset::DatasetError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod generator;
pub mod noise;
pub mod observation;
pub mod validation;

pub use generator::{generate_default_dataset, GeneratorConfig, SyntheticGenerator};
pub use noise::GaussianNoise;
pub use observation::{Dataset, Observation};
pub use validation::{validate_dataset, IssueType, Severity, ValidationIssue, ValidationReport};

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Dataset-related errors
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// CSV parse or write failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dataset with no rows where rows are required
    #[error("Dataset is empty")]
    Empty,

    /// Generator configuration that cannot produce a dataset
    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),
}
