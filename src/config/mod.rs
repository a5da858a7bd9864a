use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Tunable thresholds for every stage of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub alignment: AlignmentConfig,
    pub analysis: AnalysisConfig,
    pub features: FeatureConfig,
    pub prosody: ProsodyConfig,
    pub similarity: SimilarityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    /// Largest (R+1)*(H+1) cost table the aligner will allocate.
    pub max_cells: usize,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            max_cells: 4_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum inter-word gap reported as a pause, in seconds.
    pub min_pause_secs: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_pause_secs: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub frame_ms: f64,
    pub min_pitch_hz: f64,
    pub max_pitch_hz: f64,
    /// Absolute floor on frame energy (sum of squares) below which a frame is unvoiced.
    pub energy_floor: f64,
    /// Fraction of frame energy the autocorrelation peak must exceed.
    pub voicing_ratio: f64,
    pub min_pause_secs: f64,
    pub disfluency_markers: Vec<String>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            frame_ms: 10.0,
            min_pitch_hz: 75.0,
            max_pitch_hz: 500.0,
            energy_floor: 1e-4,
            voicing_ratio: 0.3,
            min_pause_secs: 0.2,
            disfluency_markers: ["um", "uh", "er", "ah", "like", "you know"]
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProsodyConfig {
    pub scorer_version: String,
    /// Peak-to-mean energy ratio above which a word counts as stressed.
    pub stress_energy_ratio: f64,
    /// Share of words expected to carry stress.
    pub expected_stress_ratio: f64,
    pub optimal_min_wpm: f64,
    pub optimal_max_wpm: f64,
    pub long_pause_secs: f64,
    pub weights: DimensionWeights,
}

impl Default for ProsodyConfig {
    fn default() -> Self {
        Self {
            scorer_version: "1.0.0".to_string(),
            stress_energy_ratio: 1.3,
            expected_stress_ratio: 0.65,
            optimal_min_wpm: 140.0,
            optimal_max_wpm: 180.0,
            long_pause_secs: 0.5,
            weights: DimensionWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub rhythm: f64,
    pub intonation: f64,
    pub stress: f64,
    pub pacing: f64,
    pub fluency: f64,
}

impl DimensionWeights {
    pub fn total(&self) -> f64 {
        self.rhythm + self.intonation + self.stress + self.pacing + self.fluency
    }
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            rhythm: 0.20,
            intonation: 0.20,
            stress: 0.15,
            pacing: 0.25,
            fluency: 0.20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Weight of text similarity; mean recognizer confidence takes the rest.
    pub similarity_weight: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            similarity_weight: 0.7,
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.alignment.max_cells > 0,
            "alignment.max_cells must be positive"
        );
        ensure!(
            self.analysis.min_pause_secs >= 0.0,
            "analysis.min_pause_secs must be non-negative"
        );
        let features = &self.features;
        ensure!(features.frame_ms > 0.0, "features.frame_ms must be positive");
        ensure!(
            features.min_pitch_hz > 0.0 && features.max_pitch_hz > features.min_pitch_hz,
            "features pitch bounds must satisfy 0 < min_pitch_hz < max_pitch_hz (got {} - {})",
            features.min_pitch_hz,
            features.max_pitch_hz
        );
        ensure!(
            features.energy_floor >= 0.0,
            "features.energy_floor must be non-negative"
        );
        ensure!(
            (0.0..=1.0).contains(&features.voicing_ratio),
            "features.voicing_ratio must lie in [0, 1]"
        );
        ensure!(
            features.min_pause_secs >= 0.0,
            "features.min_pause_secs must be non-negative"
        );
        let prosody = &self.prosody;
        ensure!(
            prosody.stress_energy_ratio > 0.0,
            "prosody.stress_energy_ratio must be positive"
        );
        ensure!(
            prosody.expected_stress_ratio > 0.0 && prosody.expected_stress_ratio <= 1.0,
            "prosody.expected_stress_ratio must lie in (0, 1]"
        );
        ensure!(
            prosody.optimal_min_wpm > 0.0 && prosody.optimal_max_wpm >= prosody.optimal_min_wpm,
            "prosody optimal WPM band is inverted"
        );
        ensure!(
            prosody.long_pause_secs >= 0.0,
            "prosody.long_pause_secs must be non-negative"
        );
        ensure!(
            (prosody.weights.total() - 1.0).abs() < 1e-6,
            "prosody weights must sum to 1.0 (got {:.4})",
            prosody.weights.total()
        );
        ensure!(
            (0.0..=1.0).contains(&self.similarity.similarity_weight),
            "similarity.similarity_weight must lie in [0, 1]"
        );
        Ok(())
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source: Option<PathBuf>,
    pub evaluation: EvaluationConfig,
}

impl AppConfig {
    /// Loads the JSON config at `path`, or defaults when no path is given.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let evaluation = match path.as_deref() {
            Some(custom) => read_config(custom)?,
            None => EvaluationConfig::default(),
        };
        evaluation
            .validate()
            .context("evaluation configuration is invalid")?;
        Ok(Self {
            source: path,
            evaluation,
        })
    }
}

fn read_config(path: &Path) -> Result<EvaluationConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config file {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, EvaluationConfig};
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::load(None).unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.evaluation, EvaluationConfig::default());
        assert!((config.evaluation.prosody.weights.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"prosody": {{"stress_energy_ratio": 1.5}}, "features": {{"frame_ms": 20.0}}}}"#
        )
        .unwrap();
        let config = AppConfig::load(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(config.evaluation.prosody.stress_energy_ratio, 1.5);
        assert_eq!(config.evaluation.prosody.expected_stress_ratio, 0.65);
        assert_eq!(config.evaluation.features.frame_ms, 20.0);
        assert_eq!(config.evaluation.features.min_pitch_hz, 75.0);
    }

    #[test]
    fn rejects_unbalanced_weights() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"prosody": {{"weights": {{"pacing": 0.9}}}}}}"#).unwrap();
        assert!(AppConfig::load(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn rejects_negative_long_pause() {
        let mut config = EvaluationConfig::default();
        config.prosody.long_pause_secs = -0.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("long_pause_secs"));
    }

    #[test]
    fn rejects_missing_file() {
        let missing = std::env::temp_dir().join("elocution-missing-config.json");
        assert!(AppConfig::load(Some(missing)).is_err());
    }
}
