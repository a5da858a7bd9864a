use serde::Serialize;

use crate::evaluation::features::ProsodyFeatures;

use super::stats::RunningStats;

/// Mean frame-to-frame pitch jump (Hz) at which smoothness reaches zero.
const SMOOTHNESS_SCALE_HZ: f64 = 50.0;
const RANGE_WEIGHT: f64 = 0.6;
const VARIATION_WEIGHT: f64 = 0.2;
const SMOOTHNESS_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntonationDiagnostics {
    pub voiced_frames: usize,
    pub mean_pitch_hz: f64,
    pub pitch_range_hz: f64,
    pub pitch_variance: f64,
    pub pitch_cv: f64,
    pub smoothness: f64,
    pub interpretation: String,
}

pub fn score(features: &ProsodyFeatures) -> (f64, IntonationDiagnostics) {
    let voiced: Vec<f64> = features
        .pitch_contour
        .iter()
        .filter(|point| point.voiced && point.frequency > 0.0)
        .map(|point| point.frequency)
        .collect();

    if voiced.is_empty() {
        return (
            0.0,
            IntonationDiagnostics {
                voiced_frames: 0,
                mean_pitch_hz: 0.0,
                pitch_range_hz: 0.0,
                pitch_variance: 0.0,
                pitch_cv: 0.0,
                smoothness: 0.0,
                interpretation: "No voiced speech detected".to_string(),
            },
        );
    }

    let stats: RunningStats = voiced.iter().copied().collect();
    let range = stats.range();
    let cv = stats.coefficient_of_variation();
    let smoothness = smoothness(&voiced);
    let (range_score, interpretation) = range_score(range);
    let score = RANGE_WEIGHT * range_score
        + VARIATION_WEIGHT * variation_score(cv)
        + SMOOTHNESS_WEIGHT * smoothness;

    (
        score.clamp(0.0, 1.0),
        IntonationDiagnostics {
            voiced_frames: voiced.len(),
            mean_pitch_hz: stats.mean(),
            pitch_range_hz: range,
            pitch_variance: stats.variance(),
            pitch_cv: cv,
            smoothness,
            interpretation: interpretation.to_string(),
        },
    )
}

fn smoothness(voiced: &[f64]) -> f64 {
    if voiced.len() < 2 {
        return 1.0;
    }
    let total: f64 = voiced.windows(2).map(|pair| (pair[1] - pair[0]).abs()).sum();
    let mean_delta = total / (voiced.len() - 1) as f64;
    (1.0 - mean_delta / SMOOTHNESS_SCALE_HZ).max(0.0)
}

fn range_score(range_hz: f64) -> (f64, &'static str) {
    if range_hz <= 20.0 {
        (0.3, "Pitch is nearly monotone")
    } else if range_hz < 30.0 {
        (0.6, "Pitch varies only slightly")
    } else if range_hz <= 80.0 {
        (1.0, "Pitch range is natural and expressive")
    } else if range_hz <= 120.0 {
        (0.9, "Pitch range is wide but still natural")
    } else {
        (0.7, "Pitch swings are exaggerated")
    }
}

fn variation_score(cv: f64) -> f64 {
    if cv < 0.05 {
        0.3
    } else if cv <= 0.15 {
        1.0
    } else {
        0.7
    }
}
