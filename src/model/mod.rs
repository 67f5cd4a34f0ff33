//! The two inference artifacts, behind narrow call contracts
//!
//! Both are pre-fit elsewhere, loaded once at startup and immutable for the
//! process lifetime. The pipeline only ever sees these two traits, so it can
//! be exercised with stand-ins independent of any on-disk format.

pub mod net;
pub mod scaler;

use crate::WineSample;

pub use net::{QualityNet, QualityNetConfig, QualityNetModel};
pub use scaler::StandardScaler;

/// Pre-fit normalization applied to a transformed feature vector
pub trait Scaler {
    fn normalize(&self, features: &[f32; WineSample::DIM]) -> [f32; WineSample::DIM];
}

/// Pre-trained predictive function mapping a normalized vector to a score
pub trait QualityModel {
    fn predict(&self, features: &[f32; WineSample::DIM]) -> f32;
}
