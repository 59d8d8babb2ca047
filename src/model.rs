use crate::dataset::Dataset;
use crate::error::ExternalError;
use crate::threat_model::ThreatModel;
use crate::RobustFloat;
use ndarray::ArrayViewD;

/// A classifier under evaluation.
///
/// Besides the required methods, an implementation should make its internals
/// easy to reach (weights, logits, gradients) so that white-box attacks can be
/// written against it.
pub trait Classifier {
    /// The dataset this classifier operates on.
    fn dataset(&self) -> &Dataset;

    /// The threat model the classifier claims robustness under, ideally one of
    /// the provided threat models.
    fn threat_model(&self) -> &dyn ThreatModel;

    /// Label for the input `x`.
    ///
    /// # Errors
    /// Any failure of the underlying model; evaluation stops and reports it.
    fn classify(&self, x: &ArrayViewD<RobustFloat>) -> Result<usize, ExternalError>;
}
