//! Pre-trained quality regression net loaded from a burn record
//!
//! Architecture: Input(11) → Hidden1 → ReLU → Hidden2 → ReLU → score_head(1)
//!
//! The weights are treated as an opaque artifact: nothing here trains or
//! inspects them, the net only replays the forward pass it was fit with.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder};
use burn::tensor::activation::relu;
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Tensor};

use crate::model::QualityModel;
use crate::{ModelConfig, Result, VintnerError, WineSample};

/// Shape of the quality net, needed to reconstruct it before loading weights
#[derive(Debug, Clone)]
pub struct QualityNetConfig {
    /// Input dimension (feature vector length)
    pub input_dim: usize,
    /// Hidden layer dimensions (e.g., [32, 16] for two layers)
    pub hidden_dims: Vec<usize>,
}

impl Default for QualityNetConfig {
    fn default() -> Self {
        QualityNetConfig {
            input_dim: WineSample::DIM,
            hidden_dims: vec![32, 16],
        }
    }
}

impl QualityNetConfig {
    pub fn from_model_config(config: &ModelConfig) -> Self {
        QualityNetConfig {
            input_dim: WineSample::DIM,
            hidden_dims: config.hidden_dims.clone(),
        }
    }
}

/// A single hidden layer block: Linear → ReLU
#[derive(Module, Debug)]
pub struct HiddenBlock<B: Backend> {
    linear: Linear<B>,
}

impl<B: Backend> HiddenBlock<B> {
    pub fn new(device: &B::Device, in_dim: usize, out_dim: usize) -> Self {
        HiddenBlock {
            linear: LinearConfig::new(in_dim, out_dim).init(device),
        }
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        relu(self.linear.forward(x))
    }
}

/// MLP regressor producing one quality score per sample
#[derive(Module, Debug)]
pub struct QualityNet<B: Backend> {
    hidden1: HiddenBlock<B>,
    hidden2: Option<HiddenBlock<B>>,
    score_head: Linear<B>,
}

impl<B: Backend> QualityNet<B> {
    /// Create a new net with freshly initialized weights
    pub fn new(device: &B::Device, config: QualityNetConfig) -> Self {
        let hidden1 = HiddenBlock::new(
            device,
            config.input_dim,
            config.hidden_dims.first().copied().unwrap_or(32),
        );

        let (hidden2, head_input_dim) = if config.hidden_dims.len() > 1 {
            let h2 = HiddenBlock::new(device, config.hidden_dims[0], config.hidden_dims[1]);
            (Some(h2), config.hidden_dims[1])
        } else {
            (None, config.hidden_dims.first().copied().unwrap_or(32))
        };

        QualityNet {
            hidden1,
            hidden2,
            score_head: LinearConfig::new(head_input_dim, 1).init(device),
        }
    }

    /// Forward pass
    ///
    /// # Arguments
    /// * `features` - Normalized feature vectors [batch, input_dim]
    ///
    /// # Returns
    /// Quality scores [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden1.forward(features);
        let x = if let Some(h2) = &self.hidden2 {
            h2.forward(x)
        } else {
            x
        };
        self.score_head.forward(x)
    }

    /// Save weights to file (burn adds the .mpk extension)
    pub fn save(&self, path: &str) -> Result<()>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        recorder
            .record(self.clone().into_record(), path.into())
            .map_err(|e| VintnerError::ArtifactLoad {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Load weights from file into a net of the configured shape
    pub fn load(device: &B::Device, path: &str, config: QualityNetConfig) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
        let record = recorder
            .load(path.into(), device)
            .map_err(|e| VintnerError::ArtifactLoad {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        let model = Self::new(device, config);
        log::debug!("Loaded quality net from {}", path);
        Ok(model.load_record(record))
    }
}

/// A loaded net plus its device, exposing the predict contract
#[derive(Debug)]
pub struct QualityNetModel<B: Backend> {
    net: QualityNet<B>,
    device: B::Device,
}

impl<B: Backend> QualityNetModel<B> {
    pub fn new(net: QualityNet<B>, device: B::Device) -> Self {
        QualityNetModel { net, device }
    }

    /// Load the model artifact from disk
    pub fn load(device: B::Device, path: &str, config: QualityNetConfig) -> Result<Self>
    where
        B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
        B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
    {
        let net = QualityNet::load(&device, path, config)?;
        Ok(QualityNetModel { net, device })
    }
}

impl<B: Backend> QualityModel for QualityNetModel<B> {
    fn predict(&self, features: &[f32; WineSample::DIM]) -> f32 {
        let input = Tensor::<B, 1>::from_floats(features.as_slice(), &self.device)
            .reshape([1, WineSample::DIM]);
        let score = self.net.forward(input);
        score.into_scalar().elem()
    }
}
