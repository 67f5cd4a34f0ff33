//! Column-wise preprocessing applied before scaling
//!
//! ln(x + 1) on the skewed concentration columns, identity everywhere else.
//! Runs once per prediction, in attribute position order.

use crate::features::Attribute;
use crate::{Result, VintnerError, WineSample};

/// Apply the fixed preprocessing transform to a raw sample.
///
/// Values destined for the log transform must be greater than -1; anything
/// at or below that is rejected rather than fed to `ln` (which would
/// propagate NaN/-inf through the scaler and model unnoticed).
pub fn transform(sample: &WineSample) -> Result<[f32; WineSample::DIM]> {
    let raw = sample.to_array();
    let mut out = [0.0f32; WineSample::DIM];

    for (i, attr) in Attribute::ALL.iter().enumerate() {
        let value = raw[i];
        out[i] = if attr.log_transformed() {
            if value <= -1.0 {
                return Err(VintnerError::LogDomain {
                    attribute: *attr,
                    value,
                });
            }
            (value + 1.0).ln()
        } else {
            value
        };
    }

    Ok(out)
}
