//! Identifiers for the known datasets.
//!
//! Classifiers declare the dataset they operate on and providers declare which
//! datasets they can supply; evaluation only proceeds when the two agree.
use crate::error::{Error, Result};
use crate::tensorshape::TensorShape;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Dataset {
    /// 28x28 arrays with elements in [0, 1].
    Mnist,
    /// 32x32x3 arrays with elements in [0, 1].
    Cifar10,
    /// height x width x 3 arrays with elements in [0, 1].
    ImageNet { height: usize, width: usize },
}

impl Dataset {
    /// # Errors
    /// `InvalidDataset` unless the image has three channels and non-zero extent.
    pub fn imagenet(height: usize, width: usize, channels: usize) -> Result<Self> {
        if channels != 3 || height == 0 || width == 0 {
            return Err(Error::InvalidDataset(format!(
                "bad ImageNet shape: ({}, {}, {})",
                height, width, channels
            )));
        }
        Ok(Self::ImageNet { height, width })
    }

    pub fn shape(&self) -> TensorShape {
        match self {
            Self::Mnist => TensorShape::new(vec![28, 28]),
            Self::Cifar10 => TensorShape::new(vec![32, 32, 3]),
            Self::ImageNet { height, width } => TensorShape::new(vec![*height, *width, 3]),
        }
    }

    pub const fn labels(&self) -> usize {
        match self {
            Self::Mnist | Self::Cifar10 => 10,
            Self::ImageNet { .. } => 1000,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mnist => write!(f, "MNIST"),
            Self::Cifar10 => write!(f, "CIFAR-10"),
            Self::ImageNet { .. } => write!(f, "ImageNet {}", self.shape()),
        }
    }
}
