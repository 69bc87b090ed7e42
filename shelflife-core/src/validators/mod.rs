//! Input Validators
//!
//! ## Overview
//!
//! Callers hand the engine raw numbers from sensors, forms and files. Each
//! kind of input has a validator that knows what the models can use:
//!
//! | Input                | Validator               | Out of range |
//! |----------------------|-------------------------|--------------|
//! | Storage temperature  | [`TemperatureValidator`] | rejected     |
//! | Relative humidity    | [`HumidityValidator`]    | clamped      |
//! | Uncertainty fraction | [`UncertaintyValidator`] | clamped      |
//!
//! Temperature is rejected rather than clamped because the rate law is
//! exponential in it; silently moving a temperature would move the answer
//! by orders of magnitude. Humidity and uncertainty only scale the answer,
//! so clamping them keeps the query useful.
//!
//! ## Usage Example
//!
//! ```rust
//! use shelflife_core::validators::{HumidityValidator, TemperatureValidator};
//! use shelflife_core::Validator;
//!
//! let temperature = TemperatureValidator::default();
//! assert!(temperature.validate(f64::NAN).is_err());
//! assert_eq!(temperature.validate(4.0)?, 4.0);
//!
//! let humidity = HumidityValidator::for_humidity_factor();
//! assert_eq!(humidity.validate(10.0)?, 30.0);
//! # Ok::<(), shelflife_core::ShelfLifeError>(())
//! ```

mod humidity;
mod temperature;
mod uncertainty;
mod utils;

pub use humidity::HumidityValidator;
pub use temperature::TemperatureValidator;
pub use uncertainty::UncertaintyValidator;
