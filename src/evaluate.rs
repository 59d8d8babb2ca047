//! Evaluation of an attack against a classifier.
//!
//! For every index in the evaluated range the loop
//! 1. fetches `(x, y)` from the provider,
//! 2. picks a target label if the classifier's threat model is targeted,
//! 3. runs the attack on a copy of `x`,
//! 4. checks the adversarial example against the threat model,
//! 5. classifies the adversarial example if it is valid,
//! 6. scores the sample.
//!
//! Invalid perturbations are not errors: they count toward the total but never
//! as a success.
use crate::attack::Attack;
use crate::config::EvaluationConfig;
use crate::error::{Error, Result};
use crate::model::Classifier;
use crate::provider::{Provider, Sample};
use crate::threat_model::ThreatModel;
use crate::RobustFloat;
use log::{debug, info};
use rand::{thread_rng, Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Result of attacking a single sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The adversarial example violated the threat model.
    Rejected,
    /// Classified as the requested target.
    TargetedSuccess,
    /// Classified as anything but the true label.
    UntargetedSuccess,
    /// Classified correctly, or not as the requested target.
    Failure,
}

impl Outcome {
    pub const fn is_success(self) -> bool {
        matches!(self, Self::TargetedSuccess | Self::UntargetedSuccess)
    }

    fn score(y: usize, y_adv: usize, target: Option<usize>) -> Self {
        match target {
            Some(target) if y_adv == target => Self::TargetedSuccess,
            Some(_) => Self::Failure,
            None if y_adv != y => Self::UntargetedSuccess,
            None => Self::Failure,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub start: usize,
    pub end: usize,
    /// Samples attempted, including rejected ones.
    pub total: usize,
    pub success: usize,
    pub rejected: usize,
}

impl EvaluationReport {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            total: 0,
            success: 0,
            rejected: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        self.total += 1;
        if outcome.is_success() {
            self.success += 1;
        }
        if outcome == Outcome::Rejected {
            self.rejected += 1;
        }
    }

    /// # Errors
    /// `EmptyRange` if no sample was attempted.
    pub fn success_rate(&self) -> Result<RobustFloat> {
        if self.total == 0 {
            return Err(Error::EmptyRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self.success as RobustFloat / self.total as RobustFloat)
    }
}

/// Picks a target label uniformly from `[0, num_labels)` excluding `true_label`.
///
/// In deterministic mode the draw comes from a `Pcg64` seeded with `index`,
/// so the same index always yields the same target, across runs and `rand`
/// releases; `rng` is left untouched.
///
/// # Errors
/// `TooFewLabels` if there is no label other than `true_label`,
/// `LabelOutOfRange` if `true_label >= num_labels`.
pub fn choose_target<R: Rng>(
    index: usize,
    true_label: usize,
    num_labels: usize,
    deterministic: bool,
    rng: &mut R,
) -> Result<usize> {
    if num_labels < 2 {
        return Err(Error::TooFewLabels { num_labels });
    }
    if true_label >= num_labels {
        return Err(Error::LabelOutOfRange {
            label: true_label,
            num_labels,
        });
    }
    let draw = if deterministic {
        Pcg64::seed_from_u64(index as u64).gen_range(0..num_labels - 1)
    } else {
        rng.gen_range(0..num_labels - 1)
    };
    // Skip over the true label
    Ok(if draw >= true_label { draw + 1 } else { draw })
}

fn resolve_range(config: &EvaluationConfig, len: usize) -> Result<(usize, usize)> {
    if let Some(start) = config.start {
        if start >= len {
            return Err(Error::Range {
                bound: "start",
                value: start,
                len,
            });
        }
    }
    if let Some(end) = config.end {
        if end > len {
            return Err(Error::Range {
                bound: "end",
                value: end,
                len,
            });
        }
    }
    Ok((config.start.unwrap_or(0), config.end.unwrap_or(len)))
}

/// Success rate of `attack` against `classifier` on the configured range.
///
/// The attack is allowed to be adaptive, i.e. designed against this specific
/// classifier. Non-deterministic target selection uses the thread-local RNG.
///
/// # Errors
/// See [`evaluate_report`].
pub fn evaluate<C, A, P>(
    classifier: &C,
    attack: &mut A,
    provider: &P,
    config: &EvaluationConfig,
) -> Result<RobustFloat>
where
    C: Classifier + ?Sized,
    A: Attack + ?Sized,
    P: Provider + ?Sized,
{
    evaluate_with_rng(classifier, attack, provider, config, &mut thread_rng())
}

/// [`evaluate`] with an explicit source of randomness for target selection.
///
/// # Errors
/// See [`evaluate_report`].
pub fn evaluate_with_rng<C, A, P, R>(
    classifier: &C,
    attack: &mut A,
    provider: &P,
    config: &EvaluationConfig,
    rng: &mut R,
) -> Result<RobustFloat>
where
    C: Classifier + ?Sized,
    A: Attack + ?Sized,
    P: Provider + ?Sized,
    R: Rng,
{
    evaluate_report(classifier, attack, provider, config, rng)?.success_rate()
}

/// Runs the evaluation and returns the per-outcome counts.
///
/// # Errors
/// * `DatasetMismatch` if `provider` does not supply the classifier's dataset.
/// * `Range` if `config.start` or `config.end` lie outside the provider.
/// * `EmptyRange` if the range contains no index.
/// * `Provider`, `Attack` or `Classifier` if a collaborator fails; the
///   evaluation is abandoned.
/// * `ShapeMismatch` if the attack returns an array of the wrong shape.
/// * `TooFewLabels` or `LabelOutOfRange` if no target can be chosen.
pub fn evaluate_report<C, A, P, R>(
    classifier: &C,
    attack: &mut A,
    provider: &P,
    config: &EvaluationConfig,
    rng: &mut R,
) -> Result<EvaluationReport>
where
    C: Classifier + ?Sized,
    A: Attack + ?Sized,
    P: Provider + ?Sized,
    R: Rng,
{
    let dataset = classifier.dataset();
    if !provider.provides(dataset) {
        return Err(Error::DatasetMismatch {
            expected: dataset.to_string(),
        });
    }
    let (start, end) = resolve_range(config, provider.len())?;
    if start >= end {
        return Err(Error::EmptyRange { start, end });
    }

    let threat_model = classifier.threat_model();
    debug!("evaluating under threat model {}", threat_model);

    let mut report = EvaluationReport::new(start, end);
    for index in start..end {
        info!("evaluating {} of [{}, {})", index, start, end);
        let outcome = evaluate_sample(
            classifier,
            attack,
            provider,
            threat_model,
            index,
            config,
            rng,
        )?;
        report.record(outcome);
    }
    info!(
        "{} successes out of {} ({} rejected)",
        report.success, report.total, report.rejected
    );
    Ok(report)
}

fn evaluate_sample<C, A, P, R>(
    classifier: &C,
    attack: &mut A,
    provider: &P,
    threat_model: &dyn ThreatModel,
    index: usize,
    config: &EvaluationConfig,
    rng: &mut R,
) -> Result<Outcome>
where
    C: Classifier + ?Sized,
    A: Attack + ?Sized,
    P: Provider + ?Sized,
    R: Rng,
{
    let Sample { x, y } = provider
        .get(index)
        .map_err(|source| Error::Provider { index, source })?;
    let target = if threat_model.targeted() {
        Some(choose_target(
            index,
            y,
            classifier.dataset().labels(),
            config.deterministic,
            rng,
        )?)
    } else {
        None
    };

    let x_adv = attack
        .run(x.clone(), y, target)
        .map_err(|source| Error::Attack { index, source })?;
    if !threat_model.check(&x.view(), &x_adv.view())? {
        if config.debug {
            info!("check failed");
        }
        return Ok(Outcome::Rejected);
    }

    let y_adv = classifier
        .classify(&x_adv.view())
        .map_err(|source| Error::Classifier { index, source })?;
    if config.debug {
        info!("true = {}, adv = {}", y, y_adv);
    }
    Ok(Outcome::score(y, y_adv, target))
}
