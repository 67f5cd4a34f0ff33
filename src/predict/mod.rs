//! Prediction and inference
//!
//! Compose the loaded artifacts into the quality prediction pipeline.

pub mod inference;

pub use inference::{format_prediction, Predictor};
