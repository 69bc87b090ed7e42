//! Error Types for Shelf-Life Estimation
//!
//! ## Error Categories
//!
//! ### Lookup Failures
//! - `UnknownProduct`: the name is not in the kinetic or profile table
//!   after normalization (trimmed, lower-cased, "fresh" removed)
//!
//! ### Input Problems
//! - `InvalidInput`: a value that cannot be estimated from, such as a NaN
//!   temperature or a temperature at or below absolute zero
//!
//! Humidity and uncertainty fraction are never rejected for being out of
//! range. They are clamped to their documented ranges by the validators.
//!
//! ### Degenerate Kinetics
//! - `DegenerateRate`: the rate constant evaluated to exactly zero
//!
//! A zero rate is not an error inside the Arrhenius model itself; the ratio
//! and life are reported as positive infinity and the result is flagged.
//! Consumers that need a finite number (the hybrid fusion, for one) surface
//! it as this error.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use shelflife_core::{predict_shelf_life, PredictionRequest, ShelfLifeError};
//!
//! fn describe(product: &str, temp_c: f64) -> &'static str {
//!     match predict_shelf_life(&PredictionRequest::new(product, temp_c)) {
//!         Ok(_) => "estimated",
//!         Err(ShelfLifeError::UnknownProduct { .. }) => "pick another product",
//!         Err(ShelfLifeError::InvalidInput { .. }) => "fix the reading",
//!         Err(ShelfLifeError::DegenerateRate { .. }) => "not applicable",
//!     }
//! }
//!
//! assert_eq!(describe("durian", 10.0), "pick another product");
//! ```

use alloc::string::String;
use thiserror_no_std::Error;

/// Result type for estimation operations
pub type ShelfLifeResult<T> = Result<T, ShelfLifeError>;

/// Estimation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShelfLifeError {
    /// Product not present in the kinetic or profile table
    #[error("Unsupported product: '{name}'")]
    UnknownProduct {
        /// Normalized product name that failed the lookup
        name: String,
    },

    /// Input cannot be used for estimation
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: &'static str,
    },

    /// Rate constant evaluated to zero, so shelf life is unbounded
    #[error("Degradation rate is zero for '{product}' at {temperature_c}°C")]
    DegenerateRate {
        /// Product the rate was computed for
        product: String,
        /// Storage temperature in Celsius
        temperature_c: f64,
    },
}

impl ShelfLifeError {
    /// Shorthand for an unknown product error
    pub fn unknown_product(name: &str) -> Self {
        Self::UnknownProduct { name: name.into() }
    }
}
