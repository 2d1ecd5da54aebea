//! Reading datasets and metadata produced by an external generation stage.

use super::error::{Error, Result};
use super::metadata::Metadata;
use super::slice::{BinnedPrediction, DataSlice, Dataset};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Serialized input of a plot: metadata plus either ready-made slices or per-bin predictions.
#[derive(Debug, Default, Deserialize)]
pub struct Payload {
    /// Prefix of the metadata keys describing the x-axis. Defaults to the last dimension of the
    /// binned predictions, or `x1` for ready-made slices.
    #[serde(default)]
    pub xaxis: Option<String>,
    /// Raw metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Ready-made slices.
    #[serde(default)]
    pub slices: Vec<DataSlice>,
    /// Predictions that still need to be split into slices.
    #[serde(default)]
    pub bins: Option<BinnedPrediction>,
}

impl Payload {
    /// Parses a payload from YAML (or JSON) read from `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Yaml`] if the input can not be parsed.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Reads a payload from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file can not be opened and [`Error::Yaml`] if its contents
    /// can not be parsed.
    pub fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file))
    }

    /// Converts the payload into the slices and the sanitized metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPayload`] if the payload contains both or neither of `slices` and
    /// `bins`, or if the binned predictions are inconsistent.
    pub fn into_parts(self) -> Result<(Dataset, Metadata)> {
        let metadata = Metadata::sanitized(self.metadata);

        let mut dataset = match (self.slices.is_empty(), self.bins) {
            (false, None) => Dataset {
                xaxis: "x1".to_owned(),
                slices: self.slices,
            },
            (true, Some(bins)) => bins.into_dataset(&metadata)?,
            (false, Some(_)) => {
                return Err(Error::InvalidPayload(
                    "`slices` and `bins` are mutually exclusive".to_owned(),
                ));
            }
            (true, None) => return Err(Error::EmptyDataset),
        };

        if let Some(xaxis) = self.xaxis {
            dataset.xaxis = xaxis;
        }

        Ok((dataset, metadata))
    }
}
