//! Versioned feature schema
//!
//! Records exactly how rows were turned into feature vectors at training
//! time: numeric columns first, then one indicator per product category
//! except the alphabetically first (the baseline, encoded as all zeros).
//!
//! The schema travels with the trained forest. Inference must encode
//! through the same schema, and loading an artifact checks the two agree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{MLError, MLResult, MAX_FEATURES};

/// Current schema layout version
pub const SCHEMA_VERSION: u32 = 1;

/// Numeric columns, in feature order
pub const NUMERIC_FEATURES: [&str; 2] = ["Temperature_C", "Humidity_%"];

/// Prefix of the one-hot category columns
pub const CATEGORY_PREFIX: &str = "Type_";

/// Feature layout captured at training time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Layout version
    pub version: u32,
    /// Numeric feature names, in order
    pub numeric_features: Vec<String>,
    /// Every category seen in training, sorted; the first is the baseline
    pub categories: Vec<String>,
}

impl FeatureSchema {
    /// Build a schema from the categories present in the training data
    pub fn from_categories<I, S>(categories: I) -> MLResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        categories.sort();
        categories.dedup();

        let schema = Self {
            version: SCHEMA_VERSION,
            numeric_features: NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect(),
            categories,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Check the schema is one this build can encode with
    pub fn validate(&self) -> MLResult<()> {
        if self.version != SCHEMA_VERSION {
            return Err(MLError::SchemaMismatch(format!(
                "schema version {} is not supported (expected {})",
                self.version, SCHEMA_VERSION
            )));
        }
        if self.numeric_features.iter().map(String::as_str).ne(NUMERIC_FEATURES.iter().copied()) {
            return Err(MLError::SchemaMismatch(format!(
                "numeric features {:?} do not match {:?}",
                self.numeric_features, NUMERIC_FEATURES
            )));
        }
        if self.categories.is_empty() {
            return Err(MLError::SchemaMismatch("schema has no categories".to_string()));
        }
        if self.categories.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MLError::SchemaMismatch(
                "categories must be sorted and distinct".to_string(),
            ));
        }
        let mut folded = HashSet::with_capacity(self.categories.len());
        if let Some(clash) = self.categories.iter().find(|c| !folded.insert(c.to_ascii_lowercase())) {
            return Err(MLError::SchemaMismatch(format!(
                "category '{}' differs from another only by case",
                clash
            )));
        }
        if self.num_features() > MAX_FEATURES {
            return Err(MLError::FeatureOverflow {
                count: self.num_features(),
                max: MAX_FEATURES,
            });
        }
        Ok(())
    }

    /// Category encoded as all-zero indicators
    pub fn baseline(&self) -> &str {
        self.categories.first().map(String::as_str).unwrap_or("")
    }

    /// Categories that get an indicator column
    pub fn encoded_categories(&self) -> &[String] {
        self.categories.get(1..).unwrap_or(&[])
    }

    /// Total feature count
    pub fn num_features(&self) -> usize {
        self.numeric_features.len() + self.encoded_categories().len()
    }

    /// Column names in feature order
    pub fn feature_names(&self) -> Vec<String> {
        self.numeric_features
            .iter()
            .cloned()
            .chain(
                self.encoded_categories()
                    .iter()
                    .map(|c| format!("{}{}", CATEGORY_PREFIX, c)),
            )
            .collect()
    }

    /// Feature column of a category's indicator
    ///
    /// `Ok(None)` for the baseline. Matching ignores ASCII case so the
    /// kinetic table's lower-case names find the dataset's `Banana`.
    pub fn indicator_column(&self, category: &str) -> MLResult<Option<usize>> {
        let position = self
            .categories
            .iter()
            .position(|c| c.eq_ignore_ascii_case(category))
            .ok_or_else(|| {
                MLError::SchemaMismatch(format!(
                    "product '{}' was not in the training data (known: {})",
                    category,
                    self.categories.join(", ")
                ))
            })?;

        Ok(match position {
            0 => None,
            p => Some(self.numeric_features.len() + p - 1),
        })
    }

    /// Require another schema to be identical
    pub fn ensure_matches(&self, other: &FeatureSchema) -> MLResult<()> {
        if self == other {
            Ok(())
        } else {
            Err(MLError::SchemaMismatch(format!(
                "feature layout {:?} differs from {:?}",
                other.feature_names(),
                self.feature_names()
            )))
        }
    }
}
