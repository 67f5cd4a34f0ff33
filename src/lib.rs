//! Wine quality prediction from physicochemical measurements
//!
//! Feeds eleven wine-chemistry measurements through a fixed preprocessing
//! transform, a pre-fit scaler and a pre-trained model, and maps the
//! resulting score to a three-tier quality category.

pub mod features;
pub mod model;
pub mod predict;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::features::Attribute;

/// A single wine sample: the eleven physicochemical measurements, in the
/// positional order the scaler and model were fit on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WineSample {
    pub fixed_acidity: f32,
    pub volatile_acidity: f32,
    pub citric_acid: f32,
    pub residual_sugar: f32,
    pub chlorides: f32,
    pub free_sulfur_dioxide: f32,
    pub total_sulfur_dioxide: f32,
    pub density: f32,
    pub ph: f32,
    pub sulphates: f32,
    pub alcohol: f32,
}

impl WineSample {
    /// Number of measurements per sample
    pub const DIM: usize = 11;

    /// Build a sample from a flat slice in attribute order.
    ///
    /// Rejects slices that do not have exactly [`Self::DIM`] elements and
    /// values that are not finite real numbers.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        if values.len() != Self::DIM {
            return Err(VintnerError::MalformedInput {
                expected: Self::DIM,
                actual: values.len(),
            });
        }
        for (i, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(VintnerError::NonFiniteInput {
                    attribute: Attribute::ALL[i],
                });
            }
        }
        Ok(WineSample {
            fixed_acidity: values[0],
            volatile_acidity: values[1],
            citric_acid: values[2],
            residual_sugar: values[3],
            chlorides: values[4],
            free_sulfur_dioxide: values[5],
            total_sulfur_dioxide: values[6],
            density: values[7],
            ph: values[8],
            sulphates: values[9],
            alcohol: values[10],
        })
    }

    /// Flatten to an array in attribute order
    pub fn to_array(&self) -> [f32; Self::DIM] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }

    /// The preset measurement values shown to an operator before any input
    pub fn defaults() -> Self {
        WineSample {
            fixed_acidity: 7.4,
            volatile_acidity: 0.7,
            citric_acid: 0.0,
            residual_sugar: 2.0,
            chlorides: 0.08,
            free_sulfur_dioxide: 15.0,
            total_sulfur_dioxide: 46.0,
            density: 0.996,
            ph: 3.3,
            sulphates: 0.6,
            alcohol: 10.0,
        }
    }
}

/// Three-tier quality bucket derived from the model score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityCategory {
    Low,
    Average,
    Excellent,
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityCategory::Low => write!(f, "Low"),
            QualityCategory::Average => write!(f, "Average"),
            QualityCategory::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Model output for a single sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityPrediction {
    pub score: f32,
    pub category: QualityCategory,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum VintnerError {
    #[error("Failed to load artifact {path}: {message}")]
    ArtifactLoad { path: String, message: String },

    #[error("Expected {expected} measurements, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    #[error("Non-finite value for {attribute}")]
    NonFiniteInput { attribute: Attribute },

    #[error("Value {value} for {attribute} is outside the log-transform domain (must be > -1)")]
    LogDomain { attribute: Attribute, value: f32 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VintnerError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub artifacts: ArtifactConfig,
    pub thresholds: ThresholdConfig,
    pub model: ModelConfig,
}

/// Paths to the two serialized artifacts read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    pub scaler_path: String,
    pub model_path: String,
}

/// Score cutoffs for the category mapping, evaluated highest first.
///
/// These assume the model scores on the 0-10 quality scale of the training
/// labels; a retrained model may need different cutoffs, which is why they
/// live in configuration rather than code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub excellent: f32,
    pub average: f32,
}

impl ThresholdConfig {
    /// Map a score to its category, first match wins
    pub fn categorize(&self, score: f32) -> QualityCategory {
        if score >= self.excellent {
            QualityCategory::Excellent
        } else if score >= self.average {
            QualityCategory::Average
        } else {
            QualityCategory::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub hidden_dims: Vec<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            artifacts: ArtifactConfig {
                scaler_path: "model/scaler.json".to_string(),
                model_path: "model/quality_net".to_string(),
            },
            thresholds: ThresholdConfig {
                excellent: 7.0,
                average: 5.0,
            },
            model: ModelConfig {
                hidden_dims: vec![32, 16],
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VintnerError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| VintnerError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VintnerError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
