//! Pre-fit standardization scaler loaded from a JSON artifact

use serde::{Deserialize, Serialize};

use crate::model::Scaler;
use crate::{Result, VintnerError, WineSample};

/// Per-column z-score scaler: (x - mean) / std, fit on the training data.
///
/// The artifact file records one mean and one std per feature column, in
/// the same position order as the feature vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl StandardScaler {
    /// Build a scaler from explicit parameters, checking dimensions
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Result<Self> {
        if mean.len() != WineSample::DIM || std.len() != WineSample::DIM {
            return Err(VintnerError::MalformedInput {
                expected: WineSample::DIM,
                actual: mean.len().min(std.len()),
            });
        }
        Ok(StandardScaler { mean, std })
    }

    /// Load the scaler artifact from disk.
    ///
    /// Any failure (missing file, corrupt JSON, wrong column count, zero
    /// variance) is an artifact-load error: the process cannot predict
    /// without a usable scaler.
    pub fn load(path: &str) -> Result<Self> {
        let artifact_err = |message: String| VintnerError::ArtifactLoad {
            path: path.to_string(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| artifact_err(e.to_string()))?;
        let scaler: StandardScaler =
            serde_json::from_str(&content).map_err(|e| artifact_err(e.to_string()))?;

        if scaler.mean.len() != WineSample::DIM || scaler.std.len() != WineSample::DIM {
            return Err(artifact_err(format!(
                "expected {} columns, found {} means and {} stds",
                WineSample::DIM,
                scaler.mean.len(),
                scaler.std.len()
            )));
        }
        if scaler.std.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(artifact_err("zero or non-finite std column".to_string()));
        }

        log::debug!("Loaded scaler from {}", path);
        Ok(scaler)
    }

    /// Save the scaler artifact to disk
    pub fn save(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| VintnerError::Config(format!("Failed to serialize scaler: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn normalize(&self, features: &[f32; WineSample::DIM]) -> [f32; WineSample::DIM] {
        let mut out = [0.0f32; WineSample::DIM];
        for i in 0..WineSample::DIM {
            out[i] = (features[i] - self.mean[i]) / self.std[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_scaler() -> StandardScaler {
        StandardScaler::new(vec![1.0; WineSample::DIM], vec![2.0; WineSample::DIM]).unwrap()
    }

    #[test]
    fn test_normalize() {
        let scaler = test_scaler();
        let features = [3.0f32; WineSample::DIM];
        let normalized = scaler.normalize(&features);
        for v in normalized {
            assert_eq!(v, 1.0); // (3 - 1) / 2
        }
    }

    #[test]
    fn test_new_wrong_dims() {
        let err = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, VintnerError::MalformedInput { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = StandardScaler::load("/nonexistent/scaler.json").unwrap_err();
        match err {
            VintnerError::ArtifactLoad { path, .. } => {
                assert_eq!(path, "/nonexistent/scaler.json");
            }
            other => panic!("Expected ArtifactLoad, got {:?}", other),
        }
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = StandardScaler::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, VintnerError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_load_wrong_column_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        std::fs::write(&path, r#"{"mean": [0.0, 1.0], "std": [1.0, 1.0]}"#).unwrap();

        let err = StandardScaler::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, VintnerError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_load_zero_std() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");
        let mut scaler = test_scaler();
        scaler.std[4] = 0.0;
        scaler.save(path.to_str().unwrap()).unwrap();

        let err = StandardScaler::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, VintnerError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaler.json");

        let scaler = StandardScaler::new(
            (0..WineSample::DIM).map(|i| i as f32).collect(),
            vec![1.5; WineSample::DIM],
        )
        .unwrap();
        scaler.save(path.to_str().unwrap()).unwrap();

        let loaded = StandardScaler::load(path.to_str().unwrap()).unwrap();
        let features = [2.0f32; WineSample::DIM];
        assert_eq!(scaler.normalize(&features), loaded.normalize(&features));
    }
}
