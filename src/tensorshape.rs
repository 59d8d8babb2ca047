use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully defined shape of a single input, e.g. `[28, 28]` or `[32, 32, 3]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorShape {
    dims: Vec<usize>,
}

impl TensorShape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self { dims }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.dims
    }

    pub fn matches(&self, shape: &[usize]) -> bool {
        self.dims == shape
    }
}

impl From<&[usize]> for TensorShape {
    fn from(v: &[usize]) -> Self {
        Self { dims: v.to_vec() }
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.dims.iter().join(", "))
    }
}
