use crate::error::ExternalError;
use crate::RobustFloat;
use ndarray::ArrayD;

/// An attack against a specific classifier.
///
/// Attacks may be adaptive: they are free to be designed against the exact
/// classifier they are evaluated on, and may keep state between samples.
pub trait Attack {
    /// Adversarial example for the original input `x` with true label `y`.
    ///
    /// If `target` is `Some`, the example should be classified as `target`.
    /// `x` is the attack's own copy and may be modified in place.
    ///
    /// # Errors
    /// Any failure of the attack; evaluation stops and reports it.
    fn run(
        &mut self,
        x: ArrayD<RobustFloat>,
        y: usize,
        target: Option<usize>,
    ) -> Result<ArrayD<RobustFloat>, ExternalError>;
}
