#![cfg(test)]
use crate::threat_model::{Lp, Norm};
use ndarray::Array1;
use proptest::arbitrary::functor::ArbitraryF1;
use proptest::prelude::*;
use proptest::sample::SizeRange;

prop_compose! {
    /// Flat image with every element in [0, 1].
    pub fn image(len: usize)(v in Vec::lift1_with(0. ..=1., SizeRange::new(len..=len))) -> Array1<f64> {
        Array1::from_vec(v)
    }
}

pub fn any_norm() -> impl Strategy<Value = Norm> {
    prop_oneof![
        Just(Norm::L0),
        Just(Norm::L1),
        Just(Norm::L2),
        Just(Norm::LInf),
    ]
}

prop_compose! {
    pub fn lp_threat_model()(norm in any_norm(), epsilon in 0. .. 4., targeted in any::<bool>()) -> Lp {
        Lp::new(norm, epsilon).unwrap().with_targeted(targeted)
    }
}
