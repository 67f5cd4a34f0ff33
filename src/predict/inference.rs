//! The inference pipeline: transform → normalize → predict → categorize

use burn::tensor::backend::Backend;

use crate::features::transform;
use crate::model::{QualityModel, QualityNetConfig, QualityNetModel, Scaler, StandardScaler};
use crate::{Config, QualityPrediction, Result, ThresholdConfig, WineSample};

/// Predictor holding the two immutable artifacts and the category cutoffs.
///
/// Generic over the artifact contracts so tests can substitute stand-ins;
/// production code loads a [`StandardScaler`] and a [`QualityNetModel`]
/// via [`Predictor::load`]. A predictor holds no other state, so one
/// instance can serve every invocation for the process lifetime.
#[derive(Debug)]
pub struct Predictor<S: Scaler, M: QualityModel> {
    scaler: S,
    model: M,
    thresholds: ThresholdConfig,
}

impl<S: Scaler, M: QualityModel> Predictor<S, M> {
    /// Create a predictor from already-loaded artifacts
    pub fn new(scaler: S, model: M, thresholds: ThresholdConfig) -> Self {
        Predictor {
            scaler,
            model,
            thresholds,
        }
    }

    /// Predict the quality of a single sample.
    ///
    /// Pure function of the sample and the loaded artifacts: applies the
    /// column-wise transform, hands the vector to the scaler, hands the
    /// normalized vector to the model, and maps the score to a category.
    pub fn predict(&self, sample: &WineSample) -> Result<QualityPrediction> {
        let transformed = transform(sample)?;
        let normalized = self.scaler.normalize(&transformed);
        let score = self.model.predict(&normalized);

        log::debug!("score={:.3} for transformed={:?}", score, transformed);

        Ok(QualityPrediction {
            score,
            category: self.thresholds.categorize(score),
        })
    }

    /// Predict from a flat slice of measurements in attribute order
    pub fn predict_slice(&self, values: &[f32]) -> Result<QualityPrediction> {
        let sample = WineSample::from_slice(values)?;
        self.predict(&sample)
    }
}

impl<B: Backend> Predictor<StandardScaler, QualityNetModel<B>>
where
    B::FloatElem: serde::Serialize + serde::de::DeserializeOwned,
    B::IntElem: serde::Serialize + serde::de::DeserializeOwned,
{
    /// Load both artifacts and build the production predictor.
    ///
    /// Any load failure surfaces here, before a prediction is attempted;
    /// the process cannot meaningfully run without both artifacts.
    pub fn load(config: &Config, device: B::Device) -> Result<Self> {
        let scaler = StandardScaler::load(&config.artifacts.scaler_path)?;
        let net_config = QualityNetConfig::from_model_config(&config.model);
        let model = QualityNetModel::load(device, &config.artifacts.model_path, net_config)?;

        log::info!(
            "Loaded artifacts: scaler={} model={}",
            config.artifacts.scaler_path,
            config.artifacts.model_path
        );

        Ok(Predictor::new(scaler, model, config.thresholds))
    }
}

/// Format a prediction for display
pub fn format_prediction(pred: &QualityPrediction) -> String {
    format!(
        r#"
┌─────────────────────────────────────┐
│  Predicted quality:  {:.1}
│  Category:           {}
└─────────────────────────────────────┘
"#,
        pred.score, pred.category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::Attribute;
    use crate::{QualityCategory, VintnerError};

    /// Pass-through scaler stand-in
    struct IdentityScaler;

    impl Scaler for IdentityScaler {
        fn normalize(&self, features: &[f32; WineSample::DIM]) -> [f32; WineSample::DIM] {
            *features
        }
    }

    /// Position-weighted sum, so permuting inputs changes the score
    struct WeightedSumModel;

    impl QualityModel for WeightedSumModel {
        fn predict(&self, features: &[f32; WineSample::DIM]) -> f32 {
            features
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f32 + 1.0) * v)
                .sum()
        }
    }

    /// Always returns the same score, for exercising the category mapping
    struct ConstModel(f32);

    impl QualityModel for ConstModel {
        fn predict(&self, _features: &[f32; WineSample::DIM]) -> f32 {
            self.0
        }
    }

    fn thresholds() -> ThresholdConfig {
        ThresholdConfig {
            excellent: 7.0,
            average: 5.0,
        }
    }

    #[test]
    fn test_pipeline_produces_finite_score() {
        let predictor = Predictor::new(IdentityScaler, WeightedSumModel, thresholds());
        let pred = predictor.predict(&WineSample::defaults()).unwrap();
        assert!(pred.score.is_finite());
        assert!(matches!(
            pred.category,
            QualityCategory::Low | QualityCategory::Average | QualityCategory::Excellent
        ));
    }

    #[test]
    fn test_pipeline_transforms_before_model() {
        // With identity scaling the model must see the transformed vector,
        // not the raw one
        let predictor = Predictor::new(IdentityScaler, WeightedSumModel, thresholds());
        let pred = predictor.predict(&WineSample::defaults()).unwrap();

        let transformed = transform(&WineSample::defaults()).unwrap();
        let expected: f32 = transformed
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f32 + 1.0) * v)
            .sum();
        assert!((pred.score - expected).abs() < 1e-5);

        let raw = WineSample::defaults().to_array();
        let raw_sum: f32 = raw
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f32 + 1.0) * v)
            .sum();
        assert!((pred.score - raw_sum).abs() > 1e-3);
    }

    #[test]
    fn test_position_sensitivity() {
        // Same multiset of values, different positions, different score
        let predictor = Predictor::new(IdentityScaler, WeightedSumModel, thresholds());

        let mut values = WineSample::defaults().to_array();
        let baseline = predictor.predict_slice(&values).unwrap().score;

        values.swap(0, 10); // fixed acidity <-> alcohol
        let permuted = predictor.predict_slice(&values).unwrap().score;

        assert!((baseline - permuted).abs() > 1e-3);
    }

    #[test]
    fn test_category_mapping_through_pipeline() {
        let sample = WineSample::defaults();
        for (score, category) in [
            (7.0, QualityCategory::Excellent),
            (6.999, QualityCategory::Average),
            (5.0, QualityCategory::Average),
            (4.999, QualityCategory::Low),
        ] {
            let predictor = Predictor::new(IdentityScaler, ConstModel(score), thresholds());
            let pred = predictor.predict(&sample).unwrap();
            assert_eq!(pred.category, category, "score {}", score);
        }
    }

    #[test]
    fn test_predict_slice_wrong_arity() {
        let predictor = Predictor::new(IdentityScaler, ConstModel(6.0), thresholds());
        let err = predictor.predict_slice(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, VintnerError::MalformedInput { .. }));
    }

    #[test]
    fn test_log_domain_error_propagates() {
        let predictor = Predictor::new(IdentityScaler, ConstModel(6.0), thresholds());
        let mut sample = WineSample::defaults();
        sample.residual_sugar = -3.0;
        let err = predictor.predict(&sample).unwrap_err();
        match err {
            VintnerError::LogDomain { attribute, .. } => {
                assert_eq!(attribute, Attribute::ResidualSugar);
            }
            other => panic!("Expected LogDomain, got {:?}", other),
        }
    }

    #[test]
    fn test_load_fails_before_prediction() {
        use burn::backend::NdArray;

        let mut config = Config::default();
        config.artifacts.scaler_path = "/nonexistent/scaler.json".to_string();
        config.artifacts.model_path = "/nonexistent/quality_net".to_string();

        let device = Default::default();
        let err = Predictor::<_, QualityNetModel<NdArray<f32>>>::load(&config, device).unwrap_err();
        assert!(matches!(err, VintnerError::ArtifactLoad { .. }));
    }
}
