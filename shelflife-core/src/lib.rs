//! Core estimation engine for ShelfLife
//!
//! Estimates produce shelf life from storage temperature and humidity.
//! Everything in this crate is pure math over static tables, so it runs
//! the same on a server, in a batch job, or on a cold-chain data logger.
//!
//! Two models live here:
//! - The empirical **decay formula** that labels the synthetic training set
//! - The **Arrhenius kinetic model** that scales shelf life against a
//!   reference storage temperature
//!
//! The learned regressor and the hybrid fusion of both models live in
//! `shelflife-ml`; dataset generation lives in `shelflife-dataset`.
//!
//! ```no_run
//! use shelflife_core::{predict_shelf_life, PredictionRequest};
//!
//! let request = PredictionRequest::new("apple", 25.0).with_baseline_days(60.0);
//!
//! match predict_shelf_life(&request) {
//!     Ok(result) => println!("{}", result.conclusion),
//!     Err(e) => println!("cannot estimate: {}", e),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

pub mod arrhenius;
pub mod constants;
pub mod decay;
pub mod errors;
pub mod prediction;
pub mod profiles;
pub mod traits;
pub mod validators;

// Public API
pub use arrhenius::{ArrheniusModel, Bounds, Conclusion, KineticEstimate, LifeEstimate};
pub use decay::DecayCoefficients;
pub use errors::{ShelfLifeError, ShelfLifeResult};
pub use prediction::{
    predict_shelf_life, predict_with_model, product_count, supported_products, HumidityReading,
    PredictionRequest, PredictionResult, ProductSummary,
};
pub use profiles::{KineticProfile, ProductProfile};
pub use traits::{Validatable, Validator};
pub use validators::{HumidityValidator, TemperatureValidator, UncertaintyValidator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
