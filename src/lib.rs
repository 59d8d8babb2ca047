//! A standard interface for evaluating the robustness of image classifiers
//! against adversarial examples.
//!
//! A [`Classifier`] declares the [`Dataset`] it operates on and the
//! [`ThreatModel`] it claims robustness under. An [`Attack`] produces adversarial
//! examples, and [`evaluate`] measures how often those examples are both valid
//! under the threat model and misclassified.
//!
//! ```
//! use robustml::threat_model::{And, Lp, ThreatModel};
//! use ndarray::arr1;
//!
//! let threat_model = And::new(vec![
//!     Box::new(Lp::linf(0.1).unwrap()),
//!     Box::new(Lp::l0(20.).unwrap()),
//! ])
//! .unwrap();
//! let x = arr1(&[0.1, 0.2, 0.3]).into_dyn();
//! let x_adv = arr1(&[0.1, 0.25, 0.32]).into_dyn();
//! assert!(threat_model.check(&x.view(), &x_adv.view()).unwrap());
//! assert!(!threat_model.targeted());
//! ```
#![allow(clippy::must_use_candidate)]

pub mod attack;
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluate;
pub mod logging;
pub mod model;
pub mod provider;
pub mod tensorshape;
pub mod threat_model;

#[cfg(test)]
mod test_util;

pub type RobustFloat = f64;

pub use attack::Attack;
pub use config::EvaluationConfig;
pub use dataset::Dataset;
pub use error::{Error, ExternalError, Result};
pub use evaluate::{
    choose_target, evaluate, evaluate_report, evaluate_with_rng, EvaluationReport, Outcome,
};
pub use model::Classifier;
pub use provider::{InMemoryProvider, Provider, Sample};
pub use threat_model::{And, Lp, Norm, Or, ThreatModel, SLOP};
