//! Threat models: predicates deciding whether a perturbed input is a valid
//! adversarial counterpart of an original input.
//!
//! Threat models are immutable once constructed and are (de)serialized as
//! tagged JSON objects, e.g. `{"type": "Lp", "norm": "LInf", "epsilon": 0.1}`.
use crate::error::{Error, Result};
use crate::RobustFloat;
use dyn_clone::DynClone;
use ndarray::ArrayViewD;
use std::fmt::{Debug, Display};

mod composite;
mod lp;

pub use composite::{And, Or};
pub use lp::{Lp, Norm};

/// Tolerance for floating-point rounding in range and budget checks.
pub const SLOP: RobustFloat = 0.0001;

#[typetag::serde(tag = "type")]
pub trait ThreatModel: DynClone + Display + Debug + Send + Sync {
    /// Whether `perturbed` is a valid perturbation of `original`.
    ///
    /// # Errors
    /// `ShapeMismatch` if the arrays have different shapes.
    fn check(
        &self,
        original: &ArrayViewD<RobustFloat>,
        perturbed: &ArrayViewD<RobustFloat>,
    ) -> Result<bool>;

    /// Whether the threat model only admits targeted attacks.
    fn targeted(&self) -> bool;
}

dyn_clone::clone_trait_object!(ThreatModel);

pub(crate) fn ensure_same_shape(
    original: &ArrayViewD<RobustFloat>,
    perturbed: &ArrayViewD<RobustFloat>,
) -> Result<()> {
    if original.shape() == perturbed.shape() {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            original: original.shape().to_vec(),
            perturbed: perturbed.shape().to_vec(),
        })
    }
}
