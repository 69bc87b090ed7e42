//! Model artifact persistence
//!
//! A trained model is stored as one JSON document holding the feature
//! schema and the forest:
//!
//! ```json
//! {
//!   "format": "shelflife-forest",
//!   "schema": { "version": 1, "numeric_features": [...], "categories": [...] },
//!   "forest": { "trees": [...], "config": {...}, ... }
//! }
//! ```
//!
//! The layout is internal to this crate and versioned only through the
//! schema version. Loading re-checks the schema, the tree structure and
//! that forest and schema agree on the feature count.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{FeatureSchema, MLError, MLResult, RandomForest, TrainedModel};

/// Marker identifying a model artifact
pub const ARTIFACT_FORMAT: &str = "shelflife-forest";

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format: &'a str,
    schema: &'a FeatureSchema,
    forest: &'a RandomForest,
}

#[derive(Deserialize)]
struct ArtifactOwned {
    format: String,
    schema: FeatureSchema,
    forest: RandomForest,
}

impl TrainedModel {
    /// Write the artifact to any writer
    pub fn to_writer<W: Write>(&self, writer: W) -> MLResult<()> {
        let artifact = ArtifactRef {
            format: ARTIFACT_FORMAT,
            schema: &self.schema,
            forest: &self.forest,
        };
        serde_json::to_writer(writer, &artifact)?;
        Ok(())
    }

    /// Read and check an artifact from any reader
    pub fn from_reader<R: Read>(reader: R) -> MLResult<Self> {
        let artifact: ArtifactOwned = serde_json::from_reader(reader)?;
        if artifact.format != ARTIFACT_FORMAT {
            return Err(MLError::SchemaMismatch(format!(
                "not a model artifact (format '{}')",
                artifact.format
            )));
        }
        TrainedModel::new(artifact.schema, artifact.forest)
    }

    /// Save the model to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> MLResult<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        info!(
            "saved model ({} trees, {} features) to {}",
            self.forest.trees().len(),
            self.schema.num_features(),
            path.display()
        );
        Ok(())
    }

    /// Load a model saved with [`TrainedModel::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> MLResult<Self> {
        let path = path.as_ref();
        let model = Self::from_reader(BufReader::new(File::open(path)?))?;
        info!("loaded model from {}", path.display());
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForestConfig, Regressor, Sample, TreeConfig};

    fn tiny_model() -> TrainedModel {
        let schema = FeatureSchema::from_categories(["Apple", "Banana"]).unwrap();
        let samples: Vec<Sample> = (0..12)
            .map(|i| Sample::new(&[i as f64, 90.0, (i % 2) as f64]).unwrap())
            .collect();
        let targets: Vec<f64> = (0..12).map(|i| 30.0 - i as f64).collect();

        let mut forest = RandomForest::new(ForestConfig {
            num_trees: 3,
            tree: TreeConfig {
                max_depth: Some(3),
                ..TreeConfig::default()
            },
            ..ForestConfig::default()
        });
        forest.fit(&samples, &targets).unwrap();
        TrainedModel::new(schema, forest).unwrap()
    }

    #[test]
    fn test_artifact_roundtrip_in_memory() {
        let model = tiny_model();
        let mut buffer = Vec::new();
        model.to_writer(&mut buffer).unwrap();

        let loaded = TrainedModel::from_reader(buffer.as_slice()).unwrap();
        let probe = Sample::new(&[5.5, 90.0, 1.0]).unwrap();
        assert_eq!(loaded.predict(&probe).unwrap(), model.predict(&probe).unwrap());
        assert_eq!(loaded.schema(), model.schema());
    }

    #[test]
    fn test_wrong_format_rejected() {
        let model = tiny_model();
        let text = serde_json::to_string(&ArtifactRef {
            format: "something-else",
            schema: model.schema(),
            forest: model.forest(),
        })
        .unwrap();

        assert!(matches!(TrainedModel::from_reader(text.as_bytes()), Err(MLError::SchemaMismatch(_))));
    }

    #[test]
    fn test_schema_and_forest_must_agree() {
        let model = tiny_model();
        let wider = FeatureSchema::from_categories(["Apple", "Banana", "Carrot"]).unwrap();

        let mut buffer = Vec::new();
        serde_json::to_writer(
            &mut buffer,
            &ArtifactRef {
                format: ARTIFACT_FORMAT,
                schema: &wider,
                forest: model.forest(),
            },
        )
        .unwrap();

        assert!(matches!(TrainedModel::from_reader(buffer.as_slice()), Err(MLError::SchemaMismatch(_))));
    }

    #[test]
    fn test_old_schema_version_rejected() {
        let model = tiny_model();
        let mut value = serde_json::to_value(ArtifactRef {
            format: ARTIFACT_FORMAT,
            schema: model.schema(),
            forest: model.forest(),
        })
        .unwrap();
        value["schema"]["version"] = serde_json::json!(0);

        let text = value.to_string();
        assert!(matches!(TrainedModel::from_reader(text.as_bytes()), Err(MLError::SchemaMismatch(_))));
    }

    #[test]
    fn test_garbage_is_serialization_error() {
        assert!(matches!(TrainedModel::from_reader(&b"not json"[..]), Err(MLError::Serialization(_))));
    }
}
