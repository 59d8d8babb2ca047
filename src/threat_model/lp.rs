use super::{ensure_same_shape, ThreatModel, SLOP};
use crate::error::{Error, Result};
use crate::RobustFloat;
use ndarray::{ArrayViewD, Zip};
use ndarray_stats::errors::MultiInputError;
use ndarray_stats::DeviationExt;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Order of the norm bounding a perturbation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Norm {
    /// Number of changed elements.
    L0,
    L1,
    L2,
    LInf,
}

impl Norm {
    pub const fn order(self) -> RobustFloat {
        match self {
            Self::L0 => 0.,
            Self::L1 => 1.,
            Self::L2 => 2.,
            Self::LInf => RobustFloat::INFINITY,
        }
    }

    /// Norm of `original - perturbed`, treating both arrays as flat vectors.
    /// A NaN difference makes every norm except L0 NaN.
    ///
    /// # Errors
    /// `ShapeMismatch` if the arrays have different shapes.
    pub fn distance(
        self,
        original: &ArrayViewD<RobustFloat>,
        perturbed: &ArrayViewD<RobustFloat>,
    ) -> Result<RobustFloat> {
        ensure_same_shape(original, perturbed)?;
        let dist = match self {
            Self::L0 => original
                .count_neq(perturbed)
                .map(|count| count as RobustFloat),
            Self::L1 => original.l1_dist(perturbed),
            Self::L2 => original.l2_dist(perturbed),
            // linf_dist skips NaN differences
            Self::LInf => Ok(Zip::from(original).and(perturbed).fold(
                0.,
                |max: RobustFloat, &o, &p| {
                    let diff = (o - p).abs();
                    if diff.is_nan() || diff > max {
                        diff
                    } else {
                        max
                    }
                },
            )),
        };
        match dist {
            Ok(dist) => Ok(dist),
            Err(MultiInputError::EmptyInput) => Ok(0.),
            Err(MultiInputError::ShapeMismatch(_)) => Err(Error::ShapeMismatch {
                original: original.shape().to_vec(),
                perturbed: perturbed.shape().to_vec(),
            }),
        }
    }
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::L0 => write!(f, "L0"),
            Self::L1 => write!(f, "L1"),
            Self::L2 => write!(f, "L2"),
            Self::LInf => write!(f, "Linf"),
        }
    }
}

/// Bounded L_p perturbation: `x'` is a valid perturbation of `x` iff `x'` is a
/// valid image (every element within `[0, 1]`, up to `SLOP`) and
/// `|| x - x' ||_p <= epsilon` (up to `SLOP`).
///
/// Empty arrays have norm 0 and are always admitted. No dataset has an empty
/// shape, so this only matters when calling `check` directly; admitting them
/// keeps `check(x, x)` true for every `x`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LpSpec")]
pub struct Lp {
    norm: Norm,
    epsilon: RobustFloat,
    targeted: bool,
}

#[derive(Deserialize)]
struct LpSpec {
    norm: Norm,
    epsilon: RobustFloat,
    #[serde(default)]
    targeted: bool,
}

impl TryFrom<LpSpec> for Lp {
    type Error = Error;

    fn try_from(spec: LpSpec) -> Result<Self> {
        Ok(Self::new(spec.norm, spec.epsilon)?.with_targeted(spec.targeted))
    }
}

impl Lp {
    /// Untargeted bounded-norm threat model.
    ///
    /// # Errors
    /// `InvalidThreatModel` if `epsilon` is negative or NaN.
    pub fn new(norm: Norm, epsilon: RobustFloat) -> Result<Self> {
        if epsilon.is_nan() || epsilon < 0. {
            return Err(Error::InvalidThreatModel(format!(
                "{} budget must be non-negative, got {}",
                norm, epsilon
            )));
        }
        Ok(Self {
            norm,
            epsilon,
            targeted: false,
        })
    }

    /// # Errors
    /// See [`Lp::new`].
    pub fn l0(epsilon: RobustFloat) -> Result<Self> {
        Self::new(Norm::L0, epsilon)
    }

    /// # Errors
    /// See [`Lp::new`].
    pub fn l1(epsilon: RobustFloat) -> Result<Self> {
        Self::new(Norm::L1, epsilon)
    }

    /// # Errors
    /// See [`Lp::new`].
    pub fn l2(epsilon: RobustFloat) -> Result<Self> {
        Self::new(Norm::L2, epsilon)
    }

    /// # Errors
    /// See [`Lp::new`].
    pub fn linf(epsilon: RobustFloat) -> Result<Self> {
        Self::new(Norm::LInf, epsilon)
    }

    #[must_use]
    pub const fn with_targeted(mut self, targeted: bool) -> Self {
        self.targeted = targeted;
        self
    }

    pub const fn norm(&self) -> Norm {
        self.norm
    }

    pub const fn epsilon(&self) -> RobustFloat {
        self.epsilon
    }
}

#[typetag::serde]
impl ThreatModel for Lp {
    fn check(
        &self,
        original: &ArrayViewD<RobustFloat>,
        perturbed: &ArrayViewD<RobustFloat>,
    ) -> Result<bool> {
        ensure_same_shape(original, perturbed)?;
        // NaN falls outside the range as well
        if !perturbed.iter().all(|v| (-SLOP..=1. + SLOP).contains(v)) {
            return Ok(false);
        }
        let norm = self.norm.distance(original, perturbed)?;
        Ok(norm <= self.epsilon + SLOP)
    }

    fn targeted(&self) -> bool {
        self.targeted
    }
}

impl fmt::Display for Lp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(epsilon = {}", self.norm, self.epsilon)?;
        if self.targeted {
            write!(f, ", targeted")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, arr2, ArrayD};
    use proptest::prelude::*;

    fn check(threat_model: &Lp, original: &[f64], perturbed: &[f64]) -> bool {
        threat_model
            .check(
                &arr1(original).into_dyn().view(),
                &arr1(perturbed).into_dyn().view(),
            )
            .unwrap()
    }

    #[test]
    fn test_linf_literal() {
        let model = Lp::linf(0.1).unwrap();
        let x = [0.1, 0.2, 0.3];
        assert!(check(&model, &x, &x));
        assert!(check(&model, &x, &[0.1, 0.25, 0.32]));
        assert!(!check(&model, &x, &[0.3, 0.2, 0.3]));
    }

    #[test]
    fn test_targeted_flag() {
        assert!(!Lp::linf(0.1).unwrap().targeted());
        assert!(Lp::linf(0.1).unwrap().with_targeted(true).targeted());
    }

    #[test]
    fn test_range_check_slop() {
        let model = Lp::linf(1.).unwrap();
        let x = [1., 0.];
        assert!(check(&model, &x, &[1. + 0.00009, 0.]));
        assert!(!check(&model, &x, &[1. + 0.001, 0.]));
        assert!(check(&model, &x, &[1., -0.00009]));
        assert!(!check(&model, &x, &[1., -0.001]));
    }

    #[test]
    fn test_range_checked_before_norm() {
        // Zero distance, but the perturbed input is not a valid image
        let model = Lp::l2(10.).unwrap();
        let x = [1.5, 0.5];
        assert!(!check(&model, &x, &x));
    }

    #[test]
    fn test_nan_rejected() {
        let model = Lp::linf(1.).unwrap();
        assert!(!check(&model, &[0.5], &[f64::NAN]));
    }

    #[test]
    fn test_nan_original_rejected_by_every_norm() {
        let x = [f64::NAN, 0.5];
        let x_adv = [0.5, 0.5];
        for threat_model in [Lp::l0(0.1), Lp::l1(0.1), Lp::l2(0.1), Lp::linf(0.1)] {
            let threat_model = threat_model.unwrap();
            assert!(!check(&threat_model, &x, &x_adv), "{}", threat_model);
        }
        let (o, p) = (arr1(&x).into_dyn(), arr1(&x_adv).into_dyn());
        assert!(Norm::LInf.distance(&o.view(), &p.view()).unwrap().is_nan());
    }

    #[test]
    fn test_linf_nan_after_larger_difference() {
        let o = arr1(&[0.0, f64::NAN]).into_dyn();
        let p = arr1(&[0.9, 0.5]).into_dyn();
        assert!(Norm::LInf.distance(&o.view(), &p.view()).unwrap().is_nan());
    }

    #[test]
    fn test_distance_shape_mismatch() {
        let o = arr1(&[0.1, 0.2]).into_dyn();
        let p = arr1(&[0.1]).into_dyn();
        for norm in [Norm::L0, Norm::L1, Norm::L2, Norm::LInf] {
            assert!(matches!(
                norm.distance(&o.view(), &p.view()),
                Err(Error::ShapeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_budget_slop() {
        let x = [0.5, 0.5];
        assert!(check(&Lp::l1(0.1).unwrap(), &x, &[0.55, 0.55 + 0.00005]));
        assert!(!check(&Lp::l1(0.1).unwrap(), &x, &[0.55, 0.551]));
    }

    #[test]
    fn test_norm_distances() {
        let original = arr1(&[0.5, 0.5, 0.5, 0.5]).into_dyn();
        let perturbed = arr1(&[0.5, 0.8, 0.1, 0.5]).into_dyn();
        let (o, p) = (original.view(), perturbed.view());
        assert_abs_diff_eq!(Norm::L0.distance(&o, &p).unwrap(), 2.);
        assert_abs_diff_eq!(Norm::L1.distance(&o, &p).unwrap(), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(
            Norm::L2.distance(&o, &p).unwrap(),
            0.25_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(Norm::LInf.distance(&o, &p).unwrap(), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_l0_counts_changed_pixels() {
        let model = Lp::l0(2.).unwrap();
        let x = [0.; 5];
        assert!(check(&model, &x, &[1., 1., 0., 0., 0.]));
        assert!(!check(&model, &x, &[1., 1., 1., 0., 0.]));
    }

    #[test]
    fn test_multidimensional_arrays_flattened() {
        let model = Lp::l1(0.4).unwrap();
        let original = arr2(&[[0.1, 0.2], [0.3, 0.4]]).into_dyn();
        let perturbed = arr2(&[[0.2, 0.3], [0.4, 0.5]]).into_dyn();
        assert!(model.check(&original.view(), &perturbed.view()).unwrap());
        assert!(!Lp::l1(0.3)
            .unwrap()
            .check(&original.view(), &perturbed.view())
            .unwrap());
    }

    #[test]
    fn test_shape_mismatch() {
        let model = Lp::linf(0.1).unwrap();
        let original = ArrayD::<f64>::zeros(vec![2, 3]);
        let perturbed = ArrayD::<f64>::zeros(vec![3, 2]);
        assert!(matches!(
            model.check(&original.view(), &perturbed.view()),
            Err(Error::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_arrays_admissible() {
        let model = Lp::l2(0.).unwrap();
        let empty = ArrayD::<f64>::zeros(vec![0]);
        assert!(model.check(&empty.view(), &empty.view()).unwrap());
    }

    #[test]
    fn test_invalid_budget() {
        assert!(matches!(Lp::l2(-0.1), Err(Error::InvalidThreatModel(_))));
        assert!(Lp::linf(f64::NAN).is_err());
        assert!(Lp::l0(0.).is_ok());
    }

    #[test]
    fn test_order() {
        assert_eq!(Norm::L0.order(), 0.);
        assert_eq!(Norm::L2.order(), 2.);
        assert!(Norm::LInf.order().is_infinite());
    }

    proptest! {
        #[test]
        fn test_zero_perturbation_admissible(x in image(16), norm in any_norm(), epsilon in 0. .. 1.) {
            let model = Lp::new(norm, epsilon).unwrap();
            let x = x.into_dyn();
            prop_assert!(model.check(&x.view(), &x.view()).unwrap());
        }

        #[test]
        fn test_linf_matches_max_abs_diff(x in image(16), y in image(16), epsilon in 0. .. 1.) {
            let model = Lp::linf(epsilon).unwrap();
            let max_diff = x.iter().zip(y.iter()).map(|(a, b)| (a - b).abs()).fold(0., f64::max);
            let accepted = model.check(&x.into_dyn().view(), &y.into_dyn().view()).unwrap();
            prop_assert_eq!(accepted, max_diff <= epsilon + SLOP);
        }

        #[test]
        fn test_norm_ordering(x in image(16), y in image(16)) {
            // ||d||_inf <= ||d||_2 <= ||d||_1
            let (x, y) = (x.into_dyn(), y.into_dyn());
            let linf = Norm::LInf.distance(&x.view(), &y.view()).unwrap();
            let l2 = Norm::L2.distance(&x.view(), &y.view()).unwrap();
            let l1 = Norm::L1.distance(&x.view(), &y.view()).unwrap();
            prop_assert!(linf <= l2 + 1e-12);
            prop_assert!(l2 <= l1 + 1e-12);
        }
    }
}
