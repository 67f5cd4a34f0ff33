//! Feature definitions and preprocessing
//!
//! Converts raw measurements into the model-ready feature vector.

pub mod attributes;
pub mod transform;

pub use attributes::Attribute;
pub use transform::transform;
