use super::ThreatModel;
use crate::error::{Error, Result};
use crate::RobustFloat;
use itertools::Itertools;
use log::trace;
use ndarray::ArrayViewD;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

#[derive(Deserialize)]
struct CompositeSpec {
    threat_models: Vec<Box<dyn ThreatModel>>,
}

fn non_empty(kind: &str, threat_models: &[Box<dyn ThreatModel>]) -> Result<()> {
    if threat_models.is_empty() {
        return Err(Error::InvalidThreatModel(format!(
            "{} requires at least one threat model",
            kind
        )));
    }
    Ok(())
}

/// A union of threat models: a perturbation is valid if any member admits it.
///
/// Only targeted if every member is targeted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "CompositeSpec")]
pub struct Or {
    threat_models: Vec<Box<dyn ThreatModel>>,
}

impl Or {
    /// # Errors
    /// `InvalidThreatModel` if `threat_models` is empty.
    pub fn new(threat_models: Vec<Box<dyn ThreatModel>>) -> Result<Self> {
        non_empty("Or", &threat_models)?;
        Ok(Self { threat_models })
    }

    pub fn threat_models(&self) -> &[Box<dyn ThreatModel>] {
        &self.threat_models
    }
}

impl TryFrom<CompositeSpec> for Or {
    type Error = Error;

    fn try_from(spec: CompositeSpec) -> Result<Self> {
        Self::new(spec.threat_models)
    }
}

#[typetag::serde]
impl ThreatModel for Or {
    fn check(
        &self,
        original: &ArrayViewD<RobustFloat>,
        perturbed: &ArrayViewD<RobustFloat>,
    ) -> Result<bool> {
        for threat_model in &self.threat_models {
            let admitted = threat_model.check(original, perturbed)?;
            trace!("Or member {} admitted: {}", threat_model, admitted);
            if admitted {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn targeted(&self) -> bool {
        self.threat_models.iter().all(|tm| tm.targeted())
    }
}

impl fmt::Display for Or {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Or({})", self.threat_models.iter().join(", "))
    }
}

/// An intersection of threat models: a perturbation is valid only if every
/// member admits it.
///
/// Targeted if any member is targeted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "CompositeSpec")]
pub struct And {
    threat_models: Vec<Box<dyn ThreatModel>>,
}

impl And {
    /// # Errors
    /// `InvalidThreatModel` if `threat_models` is empty.
    pub fn new(threat_models: Vec<Box<dyn ThreatModel>>) -> Result<Self> {
        non_empty("And", &threat_models)?;
        Ok(Self { threat_models })
    }

    pub fn threat_models(&self) -> &[Box<dyn ThreatModel>] {
        &self.threat_models
    }
}

impl TryFrom<CompositeSpec> for And {
    type Error = Error;

    fn try_from(spec: CompositeSpec) -> Result<Self> {
        Self::new(spec.threat_models)
    }
}

#[typetag::serde]
impl ThreatModel for And {
    fn check(
        &self,
        original: &ArrayViewD<RobustFloat>,
        perturbed: &ArrayViewD<RobustFloat>,
    ) -> Result<bool> {
        for threat_model in &self.threat_models {
            let admitted = threat_model.check(original, perturbed)?;
            trace!("And member {} admitted: {}", threat_model, admitted);
            if !admitted {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn targeted(&self) -> bool {
        self.threat_models.iter().any(|tm| tm.targeted())
    }
}

impl fmt::Display for And {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "And({})", self.threat_models.iter().join(", "))
    }
}
