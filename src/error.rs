use thiserror::Error;

/// Failure reported by user-supplied code (attacks, classifiers, providers).
pub type ExternalError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("provider does not provide the {expected} dataset")]
    DatasetMismatch { expected: String },

    #[error("{bound} value {value} out of range for provider of length {len}")]
    Range {
        bound: &'static str,
        value: usize,
        len: usize,
    },

    #[error("shape mismatch: original {original:?}, perturbed {perturbed:?}")]
    ShapeMismatch {
        original: Vec<usize>,
        perturbed: Vec<usize>,
    },

    #[error("evaluation range [{start}, {end}) is empty")]
    EmptyRange { start: usize, end: usize },

    #[error("invalid threat model: {0}")]
    InvalidThreatModel(String),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("cannot choose a target from {num_labels} label(s)")]
    TooFewLabels { num_labels: usize },

    #[error("label {label} out of range for {num_labels} labels")]
    LabelOutOfRange { label: usize, num_labels: usize },

    #[error("attack failed on sample {index}: {source}")]
    Attack {
        index: usize,
        #[source]
        source: ExternalError,
    },

    #[error("classifier failed on sample {index}: {source}")]
    Classifier {
        index: usize,
        #[source]
        source: ExternalError,
    },

    #[error("provider failed to load sample {index}: {source}")]
    Provider {
        index: usize,
        #[source]
        source: ExternalError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
