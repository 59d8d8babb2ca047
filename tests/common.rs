#![allow(dead_code)]
use ndarray::{ArrayD, ArrayViewD};
use robustml::{
    Attack, Classifier, Dataset, ExternalError, InMemoryProvider, Sample, ThreatModel,
};

/// Brightness of an MNIST image encoding label `y`.
pub fn level(y: usize) -> f64 {
    (y as f64 + 0.5) / 10.
}

/// Ten MNIST-shaped samples per round, sample `i` uniformly filled with `level(i % 10)`.
pub fn mnist_provider(len: usize) -> InMemoryProvider {
    let samples = (0..len)
        .map(|i| Sample::new(ArrayD::from_elem(vec![28, 28], level(i % 10)), i % 10))
        .collect();
    InMemoryProvider::new(Dataset::Mnist, samples).unwrap()
}

/// Labels an image by its mean brightness; correct on `mnist_provider` samples.
pub struct BrightnessClassifier {
    pub dataset: Dataset,
    pub threat_model: Box<dyn ThreatModel>,
}

impl BrightnessClassifier {
    pub fn new(threat_model: impl ThreatModel + 'static) -> Self {
        Self {
            dataset: Dataset::Mnist,
            threat_model: Box::new(threat_model),
        }
    }
}

impl Classifier for BrightnessClassifier {
    fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    fn threat_model(&self) -> &dyn ThreatModel {
        self.threat_model.as_ref()
    }

    fn classify(&self, x: &ArrayViewD<f64>) -> Result<usize, ExternalError> {
        let mean = x.mean().ok_or("empty input")?;
        Ok(((mean * 10.).floor().max(0.) as usize).min(9))
    }
}

pub struct IdentityAttack;

impl Attack for IdentityAttack {
    fn run(
        &mut self,
        x: ArrayD<f64>,
        _y: usize,
        _target: Option<usize>,
    ) -> Result<ArrayD<f64>, ExternalError> {
        Ok(x)
    }
}

/// Brightens every pixel by `delta`, modifying its copy in place.
pub struct ShiftAttack {
    pub delta: f64,
}

impl Attack for ShiftAttack {
    fn run(
        &mut self,
        mut x: ArrayD<f64>,
        _y: usize,
        _target: Option<usize>,
    ) -> Result<ArrayD<f64>, ExternalError> {
        x += self.delta;
        Ok(x)
    }
}

/// Repaints the image at the target's brightness and remembers every target.
#[derive(Default)]
pub struct TargetedAttack {
    pub calls: Vec<(usize, Option<usize>)>,
}

impl Attack for TargetedAttack {
    fn run(
        &mut self,
        x: ArrayD<f64>,
        y: usize,
        target: Option<usize>,
    ) -> Result<ArrayD<f64>, ExternalError> {
        self.calls.push((y, target));
        let target = target.ok_or("untargeted call")?;
        Ok(ArrayD::from_elem(x.shape(), level(target)))
    }
}

pub struct FailingAttack;

impl Attack for FailingAttack {
    fn run(
        &mut self,
        _x: ArrayD<f64>,
        _y: usize,
        _target: Option<usize>,
    ) -> Result<ArrayD<f64>, ExternalError> {
        Err("optimizer diverged".into())
    }
}

/// Returns an array of the wrong shape.
pub struct FlattenAttack;

impl Attack for FlattenAttack {
    fn run(
        &mut self,
        x: ArrayD<f64>,
        _y: usize,
        _target: Option<usize>,
    ) -> Result<ArrayD<f64>, ExternalError> {
        let len = x.len();
        Ok(x.into_shape(vec![len])?)
    }
}
