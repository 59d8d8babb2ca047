//! Evaluation settings, loadable from JSON.
//!
//! ```
//! use robustml::config::EvaluationConfig;
//!
//! let config = EvaluationConfig::from_json_str(r#"{"start": 100, "end": 200, "deterministic": true}"#).unwrap();
//! assert_eq!(config.start, Some(100));
//! assert!(!config.debug);
//! ```
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// First index to evaluate (inclusive). Defaults to 0.
    pub start: Option<usize>,
    /// Last index to evaluate (exclusive). Defaults to the provider length.
    pub end: Option<usize>,
    /// Seed target selection with the sample index so targets are reproducible.
    pub deterministic: bool,
    /// Log rejected perturbations and true/adversarial label pairs.
    pub debug: bool,
}

impl EvaluationConfig {
    /// # Errors
    /// `Json` if `s` is not a valid configuration.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// # Errors
    /// `Io` if the file cannot be read, `Json` if it is not a valid configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    #[must_use]
    pub const fn with_range(mut self, start: Option<usize>, end: Option<usize>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    #[must_use]
    pub const fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
