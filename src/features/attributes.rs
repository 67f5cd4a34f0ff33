//! The eleven wine-chemistry attributes and their input metadata
//!
//! Position order is load-bearing: the scaler and model were fit on
//! vectors laid out exactly as [`Attribute::ALL`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eleven physicochemical measurements, in vector position order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribute {
    FixedAcidity,
    VolatileAcidity,
    CitricAcid,
    ResidualSugar,
    Chlorides,
    FreeSulfurDioxide,
    TotalSulfurDioxide,
    Density,
    Ph,
    Sulphates,
    Alcohol,
}

impl Attribute {
    /// All attributes in vector position order
    pub const ALL: [Attribute; 11] = [
        Attribute::FixedAcidity,
        Attribute::VolatileAcidity,
        Attribute::CitricAcid,
        Attribute::ResidualSugar,
        Attribute::Chlorides,
        Attribute::FreeSulfurDioxide,
        Attribute::TotalSulfurDioxide,
        Attribute::Density,
        Attribute::Ph,
        Attribute::Sulphates,
        Attribute::Alcohol,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Attribute::FixedAcidity => "fixed acidity",
            Attribute::VolatileAcidity => "volatile acidity",
            Attribute::CitricAcid => "citric acid",
            Attribute::ResidualSugar => "residual sugar",
            Attribute::Chlorides => "chlorides",
            Attribute::FreeSulfurDioxide => "free sulfur dioxide",
            Attribute::TotalSulfurDioxide => "total sulfur dioxide",
            Attribute::Density => "density",
            Attribute::Ph => "pH",
            Attribute::Sulphates => "sulphates",
            Attribute::Alcohol => "alcohol",
        }
    }

    /// Advisory input range (inclusive). Input collection uses this to bound
    /// the operator's choices; the pipeline itself does not re-check it.
    pub fn range(&self) -> (f32, f32) {
        match self {
            Attribute::FixedAcidity => (4.0, 16.0),
            Attribute::VolatileAcidity => (0.1, 1.6),
            Attribute::CitricAcid => (0.0, 1.0),
            Attribute::ResidualSugar => (0.5, 15.0),
            Attribute::Chlorides => (0.01, 0.6),
            Attribute::FreeSulfurDioxide => (1.0, 70.0),
            Attribute::TotalSulfurDioxide => (6.0, 300.0),
            Attribute::Density => (0.990, 1.005),
            Attribute::Ph => (2.8, 4.0),
            Attribute::Sulphates => (0.3, 2.0),
            Attribute::Alcohol => (8.0, 15.0),
        }
    }

    /// Preset value shown before the operator has entered anything
    pub fn default_value(&self) -> f32 {
        match self {
            Attribute::FixedAcidity => 7.4,
            Attribute::VolatileAcidity => 0.7,
            Attribute::CitricAcid => 0.0,
            Attribute::ResidualSugar => 2.0,
            Attribute::Chlorides => 0.08,
            Attribute::FreeSulfurDioxide => 15.0,
            Attribute::TotalSulfurDioxide => 46.0,
            Attribute::Density => 0.996,
            Attribute::Ph => 3.3,
            Attribute::Sulphates => 0.6,
            Attribute::Alcohol => 10.0,
        }
    }

    /// Whether this column gets ln(x + 1) before scaling.
    ///
    /// The skewed concentration measurements were log-transformed when the
    /// scaler and model were fit, so the same columns must be transformed
    /// here or predictions are silently corrupted.
    pub fn log_transformed(&self) -> bool {
        matches!(
            self,
            Attribute::ResidualSugar
                | Attribute::Chlorides
                | Attribute::FreeSulfurDioxide
                | Attribute::TotalSulfurDioxide
                | Attribute::Sulphates
        )
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
