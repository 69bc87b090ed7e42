//! Dataset rows and CSV persistence

use std::{
    collections::BTreeSet,
    fs::File,
    io::{Read, Write},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{DatasetError, DatasetResult};

/// One labelled storage condition
///
/// Field names map onto the CSV header `Type, Temperature_C, Humidity_%,
/// Shelf_Life_Days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Produce type, e.g. `Banana`
    #[serde(rename = "Type")]
    pub product_type: String,

    /// Ambient temperature (°C)
    #[serde(rename = "Temperature_C")]
    pub temperature_c: f64,

    /// Ambient relative humidity (%)
    #[serde(rename = "Humidity_%")]
    pub humidity_pct: f64,

    /// Labelled shelf life (whole days, at least 1)
    #[serde(rename = "Shelf_Life_Days")]
    pub shelf_life_days: u32,
}

impl Observation {
    /// Create a row
    pub fn new(product_type: &str, temperature_c: f64, humidity_pct: f64, shelf_life_days: u32) -> Self {
        Self {
            product_type: product_type.to_string(),
            temperature_c,
            humidity_pct,
            shelf_life_days,
        }
    }
}

/// An ordered table of observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Wrap existing rows
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Append a row
    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    /// Iterate rows in order
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Borrow all rows
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct product types, sorted alphabetically
    pub fn product_types(&self) -> Vec<String> {
        self.observations
            .iter()
            .map(|row| row.product_type.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Rows for one product type
    pub fn filter_product<'a>(&'a self, product_type: &'a str) -> impl Iterator<Item = &'a Observation> + 'a {
        self.observations
            .iter()
            .filter(move |row| row.product_type == product_type)
    }

    /// Write CSV with header to any writer
    pub fn to_writer<W: Write>(&self, writer: W) -> DatasetResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.observations {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Read CSV with header from any reader
    ///
    /// An input with a header but no rows is an error.
    pub fn from_reader<R: Read>(reader: R) -> DatasetResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let observations = csv_reader
            .deserialize()
            .collect::<Result<Vec<Observation>, csv::Error>>()?;

        if observations.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { observations })
    }

    /// Write the dataset to a CSV file, replacing it if present
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> DatasetResult<()> {
        let path = path.as_ref();
        self.to_writer(File::create(path)?)?;
        info!("wrote {} rows to {}", self.len(), path.display());
        Ok(())
    }

    /// Load a dataset from a CSV file
    pub fn read_csv<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let path = path.as_ref();
        let dataset = Self::from_reader(File::open(path)?)?;
        info!("read {} rows from {}", dataset.len(), path.display());
        Ok(dataset)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl FromIterator<Observation> for Dataset {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
