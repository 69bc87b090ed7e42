//! Static product tables
//!
//! Two immutable tables drive the engine:
//!
//! - [`PRODUCT_PROFILES`]: baseline shelf life and optimal storage point for
//!   each produce type in the synthetic training set
//! - [`KINETIC_PROFILES`]: Arrhenius constants for each product the kinetic
//!   model supports
//!
//! The tables overlap but are not identical. Grape and onion only have a
//! decay profile; bell pepper, bitter gourd, capsicum, okra and orange only
//! have kinetics.
//!
//! Lookups normalize the caller's name first: surrounding and inner
//! whitespace is removed, case is folded and the word "fresh" is dropped,
//! so `" Fresh Apple"` finds `apple`.

use alloc::string::String;

use crate::errors::{ShelfLifeError, ShelfLifeResult};

/// Storage profile used by the decay formula
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProductProfile {
    /// Display name, also the `Type` column of the dataset
    pub type_name: &'static str,
    /// Shelf life at the optimal storage point (days)
    pub base_shelf_life_days: f64,
    /// Optimal storage temperature (°C)
    pub optimal_temperature_c: f64,
    /// Optimal relative humidity (%)
    pub optimal_humidity_pct: f64,
}

/// Arrhenius constants for one product
///
/// Assumes first-order kinetics, so the pre-exponential factor is in 1/day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KineticProfile {
    /// Lower-case lookup key
    pub product_name: &'static str,
    /// Activation energy Ea (J/mol)
    pub activation_energy_j_per_mol: f64,
    /// Pre-exponential factor A (1/day)
    pub pre_exponential_factor: f64,
    /// Quality attribute the constants were fitted against
    pub spoilage_metric: &'static str,
}

impl KineticProfile {
    /// Activation energy in kJ/mol, the unit used for display
    pub fn activation_energy_kj_per_mol(&self) -> f64 {
        self.activation_energy_j_per_mol / 1000.0
    }
}

const fn product(
    type_name: &'static str,
    base_shelf_life_days: f64,
    optimal_temperature_c: f64,
    optimal_humidity_pct: f64,
) -> ProductProfile {
    ProductProfile {
        type_name,
        base_shelf_life_days,
        optimal_temperature_c,
        optimal_humidity_pct,
    }
}

const fn kinetics(
    product_name: &'static str,
    activation_energy_j_per_mol: f64,
    pre_exponential_factor: f64,
    spoilage_metric: &'static str,
) -> KineticProfile {
    KineticProfile {
        product_name,
        activation_energy_j_per_mol,
        pre_exponential_factor,
        spoilage_metric,
    }
}

/// Decay profiles for the synthetic dataset
pub const PRODUCT_PROFILES: [ProductProfile; 10] = [
    product("Banana", 14.0, 13.0, 85.0),
    product("Apple", 60.0, 4.0, 90.0),
    product("Tomato", 14.0, 12.0, 90.0),
    product("Mango", 10.0, 13.0, 85.0),
    product("Grape", 30.0, 0.0, 90.0),
    product("Strawberry", 7.0, 0.0, 90.0),
    product("Cucumber", 10.0, 10.0, 95.0),
    product("Carrot", 30.0, 0.0, 95.0),
    product("Potato", 90.0, 7.0, 90.0),
    product("Onion", 90.0, 4.0, 70.0),
];

/// Kinetic constants, sorted by name
///
/// Capsicum shares bell pepper's constants. Bitter gourd and okra use
/// general estimates; little published data exists for them.
pub const KINETIC_PROFILES: [KineticProfile; 13] = [
    kinetics("apple", 70_000.0, 2.0e11, "firmness loss"),
    kinetics("banana", 62_000.0, 9.0e9, "softening/ripening"),
    kinetics("bellpepper", 55_000.0, 1.0e9, "color degradation"),
    kinetics("bittergourd", 50_000.0, 5.0e8, "estimated weight loss"),
    kinetics("capsicum", 55_000.0, 1.0e9, "color degradation"),
    kinetics("carrot", 85_000.0, 5.0e13, "vitamin c loss"),
    kinetics("cucumber", 48_000.0, 3.5e7, "firmness loss"),
    kinetics("mango", 46_000.0, 2.5e7, "firmness/ripening"),
    kinetics("okra", 58_000.0, 7.0e9, "estimated respiration rate"),
    kinetics("orange", 44_000.0, 1.0e7, "vitamin c loss"),
    kinetics("potato", 60_000.0, 4.0e10, "texture/ascorbic acid loss"),
    kinetics("strawberry", 32_000.0, 5.0e4, "anthocyanin (color) loss"),
    kinetics("tomato", 36_000.0, 1.5e5, "softening/respiration"),
];

/// Normalize a caller-supplied product name into a lookup key
pub fn normalize_product_name(raw: &str) -> String {
    raw.to_lowercase()
        .replace("fresh", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Find the kinetic constants for a product
pub fn kinetic_profile(name: &str) -> ShelfLifeResult<&'static KineticProfile> {
    let key = normalize_product_name(name);
    KINETIC_PROFILES
        .iter()
        .find(|profile| profile.product_name == key)
        .ok_or(ShelfLifeError::UnknownProduct { name: key })
}

/// Find the decay profile for a product
pub fn product_profile(name: &str) -> ShelfLifeResult<&'static ProductProfile> {
    let key = normalize_product_name(name);
    PRODUCT_PROFILES
        .iter()
        .find(|profile| profile.type_name.eq_ignore_ascii_case(&key))
        .ok_or(ShelfLifeError::UnknownProduct { name: key })
}

/// Upper-case the first letter and lower-case the rest
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
