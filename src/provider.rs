use crate::dataset::Dataset;
use crate::error::{Error, ExternalError, Result};
use crate::tensorshape::TensorShape;
use crate::RobustFloat;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};

/// A single labelled input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: ArrayD<RobustFloat>,
    pub y: usize,
}

impl Sample {
    pub fn new(x: ArrayD<RobustFloat>, y: usize) -> Self {
        Self { x, y }
    }
}

/// Source of evaluation data.
pub trait Provider {
    /// Whether this provider can supply data for `dataset`.
    fn provides(&self, dataset: &Dataset) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Data and label at `index`.
    ///
    /// # Errors
    /// Any failure to load the sample.
    fn get(&self, index: usize) -> std::result::Result<Sample, ExternalError>;
}

/// Provider backed by samples held in memory.
#[derive(Clone, Debug)]
pub struct InMemoryProvider {
    dataset: Dataset,
    samples: Vec<Sample>,
}

impl InMemoryProvider {
    /// # Errors
    /// `InvalidDataset` if a sample's shape differs from the dataset shape or
    /// its label is out of range.
    pub fn new(dataset: Dataset, samples: Vec<Sample>) -> Result<Self> {
        let shape = dataset.shape();
        let labels = dataset.labels();
        for (idx, sample) in samples.iter().enumerate() {
            if !shape.matches(sample.x.shape()) {
                return Err(Error::InvalidDataset(format!(
                    "sample {} has shape {}, expected {}",
                    idx,
                    TensorShape::from(sample.x.shape()),
                    shape
                )));
            }
            if sample.y >= labels {
                return Err(Error::InvalidDataset(format!(
                    "sample {} has label {}, expected fewer than {}",
                    idx, sample.y, labels
                )));
            }
        }
        Ok(Self { dataset, samples })
    }

    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
}

impl Provider for InMemoryProvider {
    fn provides(&self, dataset: &Dataset) -> bool {
        self.dataset == *dataset
    }

    fn len(&self) -> usize {
        self.samples.len()
    }

    fn get(&self, index: usize) -> std::result::Result<Sample, ExternalError> {
        self.samples.get(index).cloned().ok_or_else(|| {
            format!(
                "index {} out of range for {} samples",
                index,
                self.samples.len()
            )
            .into()
        })
    }
}
